//! Minimax AI 策略
//!
//! 根节点走法分成若干块并行搜索，每块使用独立的棋盘副本；
//! 块内是顺序的深度优先搜索，可选 Alpha-Beta 剪枝。

use super::eval::{evaluate, SCORE_MAX, SCORE_MIN};
use super::{make_rng, pick_best, sort_and_truncate, AIConfig, AIStrategy, RandomAI, ScoredMove, SearchControl, SearchMode};
use crate::board::Board;
use crate::error::{EngineError, Result};
use crate::moves::Move;
use crate::state::PositionState;
use crate::types::Color;
use log::{debug, info, trace};
use rayon::prelude::*;

/// Minimax AI
pub struct MinimaxAI {
    depth: u32,
    mode: SearchMode,
    seed: Option<u64>,
    workers: usize,
    control: SearchControl,
    /// 开局局面直接随机走
    opening: RandomAI,
}

impl MinimaxAI {
    pub fn new(config: &AIConfig, control: SearchControl) -> Self {
        MinimaxAI {
            depth: config.depth,
            mode: config.mode,
            seed: config.seed,
            workers: config.workers.max(1),
            control,
            opening: RandomAI::new(config.seed),
        }
    }

    /// 对根节点的每个走法评分（按生成顺序返回）
    fn score_root_moves(&self, board: &Board, color: Color) -> Result<Vec<ScoredMove>> {
        if self.depth == 0 {
            return Err(EngineError::InvalidDepth(self.depth));
        }
        self.control.reset();

        if board.is_initial_position() {
            trace!("initial position, picking a random move for {}", color);
            return self.opening.select_moves(board, color, usize::MAX);
        }

        let mut scratch = board.clone();
        let moves = scratch.generate_moves(color);
        match moves.len() {
            0 => return Ok(Vec::new()),
            1 => {
                trace!("single legal move {} for {}", moves[0], color);
                let start = scratch.state();
                scratch.apply_move(&moves[0]);
                let score = evaluate(&start, &scratch.state(), color);
                return Ok(moves
                    .into_iter()
                    .map(|mv| ScoredMove { mv, score })
                    .collect());
            }
            _ => {}
        }

        let part_size = ((moves.len() + self.workers - 1) / self.workers).max(1);
        debug!(
            "searching {} root moves for {} in chunks of {} (depth {}, {:?})",
            moves.len(),
            color,
            part_size,
            self.depth,
            self.mode
        );

        let scored: Vec<ScoredMove> = moves
            .par_chunks(part_size)
            .flat_map_iter(|chunk| {
                let mut searcher = Searcher::new(board.clone(), self.mode, &self.control);
                searcher.score_chunk(chunk, color, self.depth * 2)
            })
            .collect();

        for sm in &scored {
            debug!("  {} => {}", sm.mv, sm.score);
        }
        Ok(scored)
    }
}

impl AIStrategy for MinimaxAI {
    fn select_moves(&self, board: &Board, color: Color, n: usize) -> Result<Vec<ScoredMove>> {
        let mut scored = self.score_root_moves(board, color)?;
        sort_and_truncate(&mut scored, n);
        Ok(scored)
    }

    /// 在所有最高分走法中随机选择一个
    fn select_best_move(&self, board: &Board, color: Color) -> Result<Option<ScoredMove>> {
        let scored = self.score_root_moves(board, color)?;
        let best = pick_best(scored, &mut make_rng(self.seed));
        if let Some(sm) = &best {
            info!(
                "best move for {}: {} (score {}, {} nodes)",
                color,
                sm.mv,
                sm.score,
                self.control.nodes()
            );
        }
        Ok(best)
    }
}

/// 单个分块的搜索器，持有自己的棋盘副本
struct Searcher<'a> {
    board: Board,
    /// 搜索开始时的局面快照（用于失兵惩罚）
    start: PositionState,
    mode: SearchMode,
    control: &'a SearchControl,
}

impl<'a> Searcher<'a> {
    fn new(board: Board, mode: SearchMode, control: &'a SearchControl) -> Self {
        let start = board.state();
        Searcher {
            board,
            start,
            mode,
            control,
        }
    }

    fn evaluate(&self, color: Color) -> i64 {
        evaluate(&self.start, &self.board.state(), color)
    }

    /// 根节点：每个走法都要得到自己的分数，根节点本身不剪枝
    ///
    /// Alpha-Beta 模式下子树窗口的下界比当前最佳低 1 分，
    /// 与最佳同分的走法因此拿到精确分数，同分集合与完整搜索一致。
    fn score_chunk(&mut self, moves: &[Move], color: Color, depth: u32) -> Vec<ScoredMove> {
        let mut best = SCORE_MIN;
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            if self.control.is_interrupted() {
                scored.push(ScoredMove {
                    mv: mv.clone(),
                    score: SCORE_MIN,
                });
                continue;
            }
            let alpha = match self.mode {
                SearchMode::AlphaBeta => best - 1,
                SearchMode::Exhaustive => SCORE_MIN,
            };
            let score = self.child(mv, color, depth, alpha, SCORE_MAX);
            best = best.max(score);
            scored.push(ScoredMove {
                mv: mv.clone(),
                score,
            });
        }
        scored
    }

    /// 走一步，搜索对方的回应，再撤销
    fn child(&mut self, mv: &Move, color: Color, depth: u32, alpha: i64, beta: i64) -> i64 {
        self.board.apply_move(mv);
        let score = self.search(color.opposite(), depth - 1, alpha, beta);
        self.board.undo_move(mv);
        score
    }

    /// `depth` 为剩余半回合数，偶数层是根方（极大层）
    fn search(&mut self, color: Color, depth: u32, mut alpha: i64, mut beta: i64) -> i64 {
        self.control.count_node();
        if depth == 0 {
            return self.evaluate(color);
        }

        let maximizing = depth % 2 == 0;
        let mut score = if maximizing { SCORE_MIN } else { SCORE_MAX };
        let moves = self.board.generate_moves(color);

        for mv in &moves {
            if self.control.is_interrupted() {
                return match self.mode {
                    SearchMode::AlphaBeta => self.evaluate(color),
                    SearchMode::Exhaustive => score,
                };
            }
            let value = self.child(mv, color, depth, alpha, beta);
            if maximizing {
                score = score.max(value);
                alpha = alpha.max(score);
            } else {
                score = score.min(value);
                beta = beta.min(score);
            }
            if self.mode == SearchMode::AlphaBeta && beta <= alpha {
                break;
            }
        }
        score
    }
}
