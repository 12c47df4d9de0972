//! 六角跳棋棋盘
//!
//! 使用按行优先排列的数组存储棋子，格子拓扑由同尺寸共享的 [`CellGraph`] 提供。

use crate::cell::CellGraph;
use crate::error::{EngineError, Result};
use crate::fen::{parse_position, render_position};
use crate::movegen;
use crate::moves::{Capture, Hop, Move};
use crate::state::PositionState;
use crate::types::{BoardSize, Color, Piece, Position, Rank};
use std::fmt;
use std::sync::Arc;

/// 棋盘
#[derive(Clone)]
pub struct Board {
    graph: Arc<CellGraph>,
    /// 行优先的格子数组（a1, b1, ..., a2, ...）
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn new(size: BoardSize) -> Board {
        Board {
            graph: CellGraph::shared(size),
            squares: vec![None; size.cells()],
        }
    }

    /// 创建初始局面：前一半格子放 A 方兵，后一半放 B 方兵
    pub fn with_initial_pieces(size: BoardSize) -> Board {
        let mut board = Board::new(size);
        let cells = size.cells();
        let half = size.initial_pieces() / 2;
        for i in 0..half {
            board.squares[i] = Some(Piece::man(Color::A));
            board.squares[cells - 1 - i] = Some(Piece::man(Color::B));
        }
        board
    }

    /// 从 HC-FEN 字符串创建棋盘
    pub fn from_fen(fen: &str) -> Result<Board> {
        parse_position(fen)
    }

    /// 转换为 HC-FEN 字符串
    pub fn to_fen(&self) -> String {
        render_position(self)
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.graph.size()
    }

    #[inline]
    pub fn graph(&self) -> &CellGraph {
        &self.graph
    }

    #[inline]
    pub(crate) fn graph_arc(&self) -> &Arc<CellGraph> {
        &self.graph
    }

    // ========================================================================
    // 格子与棋子
    // ========================================================================

    /// 按格子名查找位置
    pub fn resolve(&self, name: &str) -> Result<Position> {
        self.graph
            .find(name)
            .ok_or_else(|| EngineError::UnknownCell(name.to_string()))
    }

    pub fn cell_exists(&self, name: &str) -> bool {
        self.graph.find(name).is_some()
    }

    /// 获取指定位置的棋子（位置不在棋盘上返回 None）
    #[inline]
    pub fn piece(&self, pos: Position) -> Option<Piece> {
        if self.graph.contains(pos) {
            self.squares[self.graph.index(pos)]
        } else {
            None
        }
    }

    #[inline]
    fn set(&mut self, pos: Position, piece: Option<Piece>) {
        let index = self.graph.index(pos);
        self.squares[index] = piece;
    }

    #[inline]
    fn take(&mut self, pos: Position) -> Option<Piece> {
        let index = self.graph.index(pos);
        self.squares[index].take()
    }

    /// 按格子名获取棋子
    pub fn piece_at(&self, name: &str) -> Result<Option<Piece>> {
        Ok(self.piece(self.resolve(name)?))
    }

    pub fn is_cell_empty(&self, name: &str) -> Result<bool> {
        Ok(self.piece_at(name)?.is_none())
    }

    /// 放置棋子（覆盖原有棋子）
    pub fn add_piece(&mut self, name: &str, color: Color, rank: Rank) -> Result<()> {
        let pos = self.resolve(name)?;
        self.set(pos, Some(Piece { color, rank }));
        Ok(())
    }

    /// 移除棋子，返回被移除的棋子
    pub fn remove_piece(&mut self, name: &str) -> Result<Option<Piece>> {
        let pos = self.resolve(name)?;
        Ok(self.take(pos))
    }

    pub fn clear(&mut self) {
        self.squares.iter_mut().for_each(|s| *s = None);
    }

    /// 获取所有棋子（行优先顺序）
    pub fn pieces(&self, color: Option<Color>) -> Vec<(Position, Piece)> {
        self.graph
            .cells()
            .iter()
            .zip(self.squares.iter())
            .filter_map(|(cell, square)| square.map(|p| (cell.position, p)))
            .filter(|(_, p)| color.map_or(true, |c| p.color == c))
            .collect()
    }

    /// 是否为该尺寸的标准初始局面
    pub fn is_initial_position(&self) -> bool {
        self.squares == Board::with_initial_pieces(self.size()).squares
    }

    /// 统计局面快照
    pub fn state(&self) -> PositionState {
        PositionState::build(self)
    }

    // ========================================================================
    // 走法生成
    // ========================================================================

    /// 双方全部合法走法（先 A 后 B）
    pub fn available_moves(&self) -> Vec<Move> {
        let mut scratch = self.clone();
        let mut moves = scratch.generate_moves(Color::A);
        moves.extend(scratch.generate_moves(Color::B));
        moves
    }

    /// 指定阵营的合法走法（有吃必吃）
    pub fn available_moves_for_color(&self, color: Color) -> Vec<Move> {
        self.clone().generate_moves(color)
    }

    /// 双方所有棋子的吃子走法
    pub fn available_capture_moves(&self) -> Vec<Move> {
        let mut scratch = self.clone();
        let positions: Vec<Position> = self.pieces(None).into_iter().map(|(p, _)| p).collect();
        positions
            .into_iter()
            .flat_map(|p| movegen::capture_moves(&mut scratch, p))
            .collect()
    }

    /// 单个棋子的普通走法
    pub fn piece_regular_moves(&self, name: &str) -> Result<Vec<Move>> {
        let pos = self.resolve(name)?;
        Ok(movegen::regular_moves(self, pos))
    }

    /// 单个棋子的吃子走法
    pub fn piece_capture_moves(&self, name: &str) -> Result<Vec<Move>> {
        let pos = self.resolve(name)?;
        Ok(movegen::capture_moves(&mut self.clone(), pos))
    }

    /// 在当前棋盘上原地生成走法（生成结束后棋盘复原）
    pub(crate) fn generate_moves(&mut self, color: Color) -> Vec<Move> {
        let own: Vec<Position> = self.pieces(Some(color)).into_iter().map(|(p, _)| p).collect();

        let mut moves = Vec::new();
        for &pos in &own {
            moves.extend(movegen::capture_moves(self, pos));
        }
        if !moves.is_empty() {
            return moves;
        }

        for &pos in &own {
            moves.extend(movegen::regular_moves(self, pos));
        }
        moves
    }

    /// 是否有任意一方存在吃子
    pub fn has_any_capture(&self) -> bool {
        self.pieces(None)
            .into_iter()
            .any(|(p, _)| movegen::has_capture(self, p))
    }

    // ========================================================================
    // 构造与校验走法
    // ========================================================================

    /// 找出从 from 到 to 之间会被吃掉的棋子
    ///
    /// 兵：跳跃方向上紧邻的格子；王：沿射线遇到的第一个棋子。
    /// 该棋子必须属于对方且位于终点之前。
    pub fn detect_capture(&self, from: &str, to: &str) -> Result<Position> {
        let (src, dst) = (self.resolve(from)?, self.resolve(to)?);
        let piece = self
            .piece(src)
            .ok_or_else(|| EngineError::EmptyCell(from.to_string()))?;
        if self.piece(dst).is_some() {
            return Err(EngineError::OccupiedCell(to.to_string()));
        }
        let hop = Hop::new(src, dst, None, false, false)?;

        let no_capture = || EngineError::NoCapturePiece {
            from: from.to_string(),
            to: to.to_string(),
        };

        let mut cursor = self.graph.neighbor(src, hop.direction);
        if piece.is_king() {
            while let Some(p) = cursor {
                if p == dst || self.piece(p).is_some() {
                    break;
                }
                cursor = self.graph.neighbor(p, hop.direction);
            }
        }

        match cursor {
            Some(p) if p != dst => match self.piece(p) {
                Some(victim) if victim.color != piece.color => Ok(p),
                _ => Err(no_capture()),
            },
            _ => Err(no_capture()),
        }
    }

    fn capture_on(&self, color: Color, capture: Option<&str>, from: &str, to: &str) -> Result<Option<Capture>> {
        let Some(name) = capture else {
            return Ok(None);
        };
        let position = self.resolve(name)?;
        match self.piece(position) {
            Some(piece) if piece.color != color => Ok(Some(Capture { position, piece })),
            _ => Err(EngineError::NoCapturePiece {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// 构造一个单跳走法（不校验是否合法）
    ///
    /// `capture` 为被吃棋子所在的格子名
    pub fn new_move(&self, from: &str, to: &str, capture: Option<&str>) -> Result<Move> {
        let src = self.resolve(from)?;
        let dst = self.resolve(to)?;
        let piece = self
            .piece(src)
            .ok_or_else(|| EngineError::EmptyCell(from.to_string()))?;
        let capture = self.capture_on(piece.color, capture, from, to)?;
        let was_king = piece.is_king();
        let promotes = was_king || self.graph.is_promotion_cell(dst, piece.color);
        Ok(Move::new(Hop::new(src, dst, capture, was_king, promotes)?))
    }

    /// 在已构造的走法末尾追加一跳
    ///
    /// 棋子仍在走法起点上，阵营和等级都从起点读取
    pub fn extend_move(&self, mv: &mut Move, to: &str, capture: Option<&str>) -> Result<()> {
        let dst = self.resolve(to)?;
        let from = mv.to();
        let piece = self
            .piece(mv.from())
            .ok_or_else(|| EngineError::EmptyCell(mv.from().name()))?;
        let capture = self.capture_on(piece.color, capture, &from.name(), to)?;
        let was_king = piece.is_king();
        let promotes = was_king || self.graph.is_promotion_cell(dst, piece.color);
        mv.push(Hop::new(from, dst, capture, was_king, promotes)?)
    }

    fn legal_moves(&self, color: Option<Color>) -> Vec<Move> {
        match color {
            Some(c) => self.available_moves_for_color(c),
            None => self.available_moves(),
        }
    }

    /// 走法是否在当前合法走法中
    pub fn is_valid_move(&self, mv: &Move, color: Option<Color>) -> bool {
        let notation = mv.to_string();
        self.legal_moves(color)
            .iter()
            .any(|m| m.to_string() == notation)
    }

    /// 记号是否对应当前合法走法（语法错误返回 false）
    pub fn is_valid_notation(&self, notation: &str, color: Option<Color>) -> bool {
        crate::moves::is_notation_valid(notation)
            && self
                .legal_moves(color)
                .iter()
                .any(|m| m.to_string() == notation)
    }

    /// 从记号构造走法
    ///
    /// 语法错误返回 `InvalidNotation`，语法正确但不合法返回 `IllegalMove`
    pub fn build_move(&self, notation: &str) -> Result<Move> {
        if !crate::moves::is_notation_valid(notation) {
            return Err(EngineError::InvalidNotation(notation.to_string()));
        }
        self.available_moves()
            .into_iter()
            .find(|m| m.to_string() == notation)
            .ok_or_else(|| EngineError::IllegalMove(notation.to_string()))
    }

    // ========================================================================
    // 执行与撤销
    // ========================================================================

    /// 试走一跳：移动棋子（可能升变），不移走被吃的棋子
    pub(crate) fn apply_hop_tentative(&mut self, hop: &Hop) {
        if let Some(mut piece) = self.take(hop.from) {
            if hop.promotes {
                piece.rank = Rank::King;
            }
            self.set(hop.to, Some(piece));
        }
    }

    /// 撤销一跳：棋子回到起点并恢复原等级，被吃的棋子放回原处
    pub(crate) fn rollback_hop(&mut self, hop: &Hop) {
        if let Some(mut piece) = self.take(hop.to) {
            if !hop.was_king {
                piece.rank = Rank::Man;
            }
            self.set(hop.from, Some(piece));
        }
        if let Some(capture) = hop.capture {
            self.set(capture.position, Some(capture.piece));
        }
    }

    fn remove_captures(&mut self, hops: &[Hop]) {
        for capture in hops.iter().filter_map(|h| h.capture) {
            self.set(capture.position, None);
        }
    }

    /// 跳的起点、终点和被吃格子都必须在本棋盘上（走法可能来自其他尺寸的棋盘）
    fn check_hop_cells(&self, hop: &Hop) -> Result<()> {
        let capture = hop.capture.map(|c| c.position);
        for pos in [Some(hop.from), Some(hop.to), capture].into_iter().flatten() {
            if !self.graph.contains(pos) {
                return Err(EngineError::UnknownCell(pos.name()));
            }
        }
        Ok(())
    }

    fn check_hop_index(mv: &Move, index: usize) -> Result<()> {
        if index >= mv.len() {
            return Err(EngineError::HopOutOfRange {
                index,
                len: mv.len(),
            });
        }
        Ok(())
    }

    /// 执行走法中的一跳
    ///
    /// 只有执行最后一跳时才移走整条链上被吃的棋子
    pub fn make_hop(&mut self, mv: &Move, index: usize) -> Result<()> {
        Self::check_hop_index(mv, index)?;
        let hop = mv.hops()[index];
        self.check_hop_cells(&hop)?;
        if self.piece(hop.from).is_none() {
            return Err(EngineError::EmptyCell(hop.from.name()));
        }
        if self.piece(hop.to).is_some() {
            return Err(EngineError::OccupiedCell(hop.to.name()));
        }
        self.apply_hop_tentative(&hop);
        if index + 1 == mv.len() {
            self.remove_captures(&mv.hops()[..=index]);
        }
        Ok(())
    }

    /// 撤销走法中的一跳
    pub fn undo_hop(&mut self, mv: &Move, index: usize) -> Result<()> {
        Self::check_hop_index(mv, index)?;
        let hop = &mv.hops()[index];
        self.check_hop_cells(hop)?;
        self.rollback_hop(hop);
        Ok(())
    }

    /// 执行完整走法（必须是当前合法走法）
    pub fn make_move(&mut self, mv: &Move) -> Result<()> {
        let notation = mv.to_string();
        let legal = self
            .available_moves()
            .into_iter()
            .find(|m| m.to_string() == notation)
            .ok_or(EngineError::IllegalMove(notation))?;
        self.apply_move(&legal);
        Ok(())
    }

    /// 执行已知合法的走法（搜索内部使用）
    pub(crate) fn apply_move(&mut self, mv: &Move) {
        for hop in mv.hops() {
            self.apply_hop_tentative(hop);
        }
        self.remove_captures(mv.hops());
    }

    /// 撤销完整走法（从最后一跳到第一跳）
    pub fn undo_move(&mut self, mv: &Move) {
        for hop in mv.hops().iter().rev() {
            self.rollback_hop(hop);
        }
    }

    /// 和棋条件：无人能吃子，且只剩一方 1 王对另一方 1~2 王
    pub fn is_draw_condition(&self) -> bool {
        if self.has_any_capture() {
            return false;
        }
        let state = self.state();
        let (a, b) = (Color::A.index(), Color::B.index());
        if state.men[a] != 0 || state.men[b] != 0 {
            return false;
        }
        ((1..=2).contains(&state.kings[a]) && state.kings[b] == 1)
            || (state.kings[a] == 1 && (1..=2).contains(&state.kings[b]))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

/// 从 HC-FEN 获取指定阵营的合法走法记号
pub fn get_legal_moves_from_fen(fen: &str, color: Option<Color>) -> Result<Vec<String>> {
    let board = Board::from_fen(fen)?;
    Ok(board
        .legal_moves(color)
        .iter()
        .map(|m| m.to_string())
        .collect())
}
