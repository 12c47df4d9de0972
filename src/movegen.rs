//! 走法生成
//!
//! - 兵：向前三个方向走一格；吃子可以六个方向，连续吃子直到无子可吃
//! - 王：沿六个方向飞行；吃子时可以落在被吃棋子之后的任意空格
//!
//! 连吃搜索在棋盘上"试走"每一跳（移动棋子但不移走被吃的子），
//! 递归结束后由 [`TentativeHop`] 在 drop 时撤销，任何返回路径都会恢复棋盘。

use crate::board::Board;
use crate::cell::CellGraph;
use crate::moves::{Capture, Hop, Move};
use crate::types::{Color, Direction, Piece, Position};
use std::collections::HashSet;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// 单个棋子的普通走法（不吃子）
pub(crate) fn regular_moves(board: &Board, from: Position) -> Vec<Move> {
    let Some(piece) = board.piece(from) else {
        return Vec::new();
    };
    let graph = board.graph();
    let mut moves = Vec::new();

    if piece.is_king() {
        for direction in Direction::ALL {
            let mut cursor = graph.neighbor(from, direction);
            while let Some(to) = cursor {
                if board.piece(to).is_some() {
                    break;
                }
                moves.push(Move::new(simple_hop(graph, piece, from, to, direction)));
                cursor = graph.neighbor(to, direction);
            }
        }
    } else {
        for direction in piece.color.forward_directions() {
            if let Some(to) = graph.neighbor(from, direction) {
                if board.piece(to).is_none() {
                    moves.push(Move::new(simple_hop(graph, piece, from, to, direction)));
                }
            }
        }
    }
    moves
}

fn simple_hop(graph: &CellGraph, piece: Piece, from: Position, to: Position, direction: Direction) -> Hop {
    let was_king = piece.is_king();
    Hop {
        from,
        to,
        direction,
        capture: None,
        was_king,
        promotes: was_king || graph.is_promotion_cell(to, piece.color),
    }
}

/// 单个棋子的全部吃子链（只返回无法再延伸的完整链）
///
/// 生成期间会试走棋盘，返回前棋盘已恢复原状
pub(crate) fn capture_moves(board: &mut Board, from: Position) -> Vec<Move> {
    let Some(piece) = board.piece(from) else {
        return Vec::new();
    };
    let mut search = CaptureSearch {
        graph: Arc::clone(board.graph_arc()),
        board,
        origin: from,
        color: piece.color,
        captured: Vec::new(),
        chain: Vec::new(),
        found: Vec::new(),
        seen: HashSet::new(),
    };
    search.expand();
    search.found
}

/// 棋子是否至少有一个吃子（只找第一跳，不展开整条链）
pub(crate) fn has_capture(board: &Board, from: Position) -> bool {
    let Some(piece) = board.piece(from) else {
        return false;
    };
    let graph = board.graph();
    let is_enemy = |pos: Position| board.piece(pos).is_some_and(|p| p.color != piece.color);
    let is_empty = |pos: Option<Position>| pos.is_some_and(|p| board.piece(p).is_none());

    Direction::ALL.iter().any(|&direction| {
        let mut over = graph.neighbor(from, direction);
        if piece.is_king() {
            while let Some(p) = over {
                if board.piece(p).is_some() {
                    break;
                }
                over = graph.neighbor(p, direction);
            }
        }
        match over {
            Some(over) => is_enemy(over) && is_empty(graph.neighbor(over, direction)),
            None => false,
        }
    })
}

/// 连吃回溯搜索的状态
struct CaptureSearch<'a> {
    graph: Arc<CellGraph>,
    board: &'a mut Board,
    origin: Position,
    color: Color,
    /// 本条链已吃掉（但仍在棋盘上）的棋子位置
    captured: Vec<Position>,
    chain: Vec<Hop>,
    found: Vec<Move>,
    /// 按完整记号去重
    seen: HashSet<String>,
}

impl<'a> CaptureSearch<'a> {
    /// 当前链头（棋子此刻所在的格子）
    fn head(&self) -> Position {
        self.chain.last().map_or(self.origin, |h| h.to)
    }

    /// 链上发生过升变（或本来就是王）后按王的规则继续
    fn king_rules(&self) -> bool {
        match self.chain.last() {
            Some(hop) => hop.was_king || hop.promotes,
            None => self.board.piece(self.origin).is_some_and(|p| p.is_king()),
        }
    }

    /// 不允许沿来路立即折返
    fn is_reverse(&self, direction: Direction) -> bool {
        self.chain
            .last()
            .is_some_and(|h| h.direction == direction.opposite())
    }

    fn is_target(&self, pos: Position) -> Option<Piece> {
        self.board
            .piece(pos)
            .filter(|p| p.color != self.color && !self.captured.contains(&pos))
    }

    fn is_empty(&self, pos: Position) -> bool {
        self.board.piece(pos).is_none()
    }

    fn hop(&self, to: Position, direction: Direction, capture: Capture) -> Hop {
        let from = self.head();
        let inherited = self.chain.last().is_some_and(|h| h.promotes);
        let was_king = inherited || self.board.piece(from).is_some_and(|p| p.is_king());
        Hop {
            from,
            to,
            direction,
            capture: Some(capture),
            was_king,
            promotes: was_king || self.graph.is_promotion_cell(to, self.color),
        }
    }

    fn current_move(&self) -> Move {
        Move::from_hops(self.chain.clone())
    }

    fn record(&mut self, mv: Move) {
        if self.seen.insert(mv.to_string()) {
            self.found.push(mv);
        }
    }

    /// 从链头继续展开，返回是否产生了新的一跳
    fn expand(&mut self) -> bool {
        if self.king_rules() {
            self.expand_king()
        } else {
            self.expand_man()
        }
    }

    fn expand_man(&mut self) -> bool {
        let head = self.head();
        let mut extended = false;

        for direction in Direction::ALL {
            if self.is_reverse(direction) {
                continue;
            }
            let Some(over) = self.graph.neighbor(head, direction) else {
                continue;
            };
            let Some(to) = self.graph.neighbor(over, direction) else {
                continue;
            };
            let Some(piece) = self.is_target(over) else {
                continue;
            };
            if !self.is_empty(to) {
                continue;
            }

            let hop = self.hop(to, direction, Capture { position: over, piece });
            extended = true;
            let mut branch = TentativeHop::apply(self, hop);
            if !branch.expand() {
                let mv = branch.current_move();
                branch.record(mv);
            }
        }
        extended
    }

    fn expand_king(&mut self) -> bool {
        let head = self.head();
        let mut extended = false;

        for direction in Direction::ALL {
            if self.is_reverse(direction) {
                continue;
            }

            // 越过空格找到第一个棋子
            let mut cursor = self.graph.neighbor(head, direction);
            while let Some(p) = cursor {
                if !self.is_empty(p) {
                    break;
                }
                cursor = self.graph.neighbor(p, direction);
            }
            let Some(over) = cursor else {
                continue;
            };
            let Some(piece) = self.is_target(over) else {
                continue;
            };

            // 被吃棋子之后的每个空格都是一个落点
            let mut branches = Vec::new();
            let mut continued = false;
            let mut landing = self.graph.neighbor(over, direction);
            while let Some(to) = landing {
                if !self.is_empty(to) {
                    break;
                }
                let hop = self.hop(to, direction, Capture { position: over, piece });
                extended = true;
                let mut branch = TentativeHop::apply(self, hop);
                branches.push(branch.current_move());
                if branch.expand() {
                    continued = true;
                }
                drop(branch);
                landing = self.graph.neighbor(to, direction);
            }

            // 同一方向上只要有一个落点能继续吃，其余落点都不算完整走法
            if !continued {
                for mv in branches {
                    self.record(mv);
                }
            }
        }
        extended
    }
}

/// 试走的一跳，drop 时撤销
struct TentativeHop<'s, 'a> {
    search: &'s mut CaptureSearch<'a>,
}

impl<'s, 'a> TentativeHop<'s, 'a> {
    fn apply(search: &'s mut CaptureSearch<'a>, hop: Hop) -> Self {
        search.board.apply_hop_tentative(&hop);
        if let Some(capture) = hop.capture {
            search.captured.push(capture.position);
        }
        search.chain.push(hop);
        TentativeHop { search }
    }
}

impl<'s, 'a> Deref for TentativeHop<'s, 'a> {
    type Target = CaptureSearch<'a>;

    fn deref(&self) -> &CaptureSearch<'a> {
        self.search
    }
}

impl<'s, 'a> DerefMut for TentativeHop<'s, 'a> {
    fn deref_mut(&mut self) -> &mut CaptureSearch<'a> {
        self.search
    }
}

impl Drop for TentativeHop<'_, '_> {
    fn drop(&mut self) {
        if let Some(hop) = self.search.chain.pop() {
            self.search.board.rollback_hop(&hop);
            if hop.capture.is_some() {
                self.search.captured.pop();
            }
        }
    }
}
