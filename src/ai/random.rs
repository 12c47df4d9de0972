//! 随机 AI 策略

use super::{make_rng, sort_and_truncate, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::error::Result;
use crate::types::Color;
use rand::prelude::*;

/// 随机 AI - 从合法走法中均匀随机选择
pub struct RandomAI {
    seed: Option<u64>,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        RandomAI { seed }
    }
}

impl AIStrategy for RandomAI {
    /// 打乱后的合法走法，评分都为 0
    fn select_moves(&self, board: &Board, color: Color, n: usize) -> Result<Vec<ScoredMove>> {
        let mut moves = board.available_moves_for_color(color);
        let mut rng = make_rng(self.seed);
        moves.shuffle(&mut rng);

        let mut scored: Vec<ScoredMove> = moves
            .into_iter()
            .map(|mv| ScoredMove { mv, score: 0 })
            .collect();

        sort_and_truncate(&mut scored, n);
        Ok(scored)
    }
}
