//! AI 策略模块
//!
//! 提供 Minimax（完整搜索 / Alpha-Beta 剪枝）与随机两种策略

pub mod eval;
mod minimax;
mod random;

pub use eval::{evaluate, SCORE_MAX, SCORE_MIN};
pub use minimax::MinimaxAI;
pub use random::RandomAI;

use crate::board::Board;
use crate::error::{EngineError, Result};
use crate::moves::Move;
use crate::types::Color;
use rand::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// 搜索模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Alpha-Beta 剪枝
    #[default]
    AlphaBeta,
    /// 完整 Minimax，不剪枝
    Exhaustive,
}

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 搜索深度（完整回合数，内部按半回合翻倍）
    pub depth: u32,
    pub mode: SearchMode,
    /// 随机种子（同分走法的选择）
    pub seed: Option<u64>,
    /// 根节点并行分块数
    pub workers: usize,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            depth: 2,
            mode: SearchMode::AlphaBeta,
            seed: None,
            workers: 4,
        }
    }
}

/// 走法评分
#[derive(Debug, Clone)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i64,
}

/// 搜索控制：中断标志 + 节点计数，可在线程间共享
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    interrupted: Arc<AtomicBool>,
    nodes: Arc<AtomicU64>,
}

impl SearchControl {
    /// 请求中断正在进行的搜索
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Relaxed)
    }

    /// 新一轮搜索开始时清零
    pub(crate) fn reset(&self) {
        self.interrupted.store(false, Ordering::Relaxed);
        self.nodes.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn count_node(&self) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
    }

    /// 上一次搜索访问的节点数
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }
}

/// AI 策略接口
pub trait AIStrategy: Send + Sync {
    /// 选择走法（返回按评分从高到低排列的走法列表）
    fn select_moves(&self, board: &Board, color: Color, n: usize) -> Result<Vec<ScoredMove>>;

    /// 选择最佳走法
    fn select_best_move(&self, board: &Board, color: Color) -> Result<Option<ScoredMove>> {
        Ok(self.select_moves(board, color, 1)?.into_iter().next())
    }
}

/// 排序辅助函数（稳定排序，同分保持生成顺序）
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, n: usize) {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(n);
}

/// 在最高分的走法中随机选一个
pub(crate) fn pick_best<R: Rng>(scored: Vec<ScoredMove>, rng: &mut R) -> Option<ScoredMove> {
    let best = scored.iter().map(|s| s.score).max()?;
    let ties: Vec<ScoredMove> = scored.into_iter().filter(|s| s.score == best).collect();
    let index = rng.gen_range(0..ties.len());
    ties.into_iter().nth(index)
}

/// 有种子时每次调用都从同一状态开始，否则取系统熵
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy>,
    control: SearchControl,
}

impl AIEngine {
    /// 创建随机 AI
    pub fn random(seed: Option<u64>) -> Self {
        AIEngine {
            strategy: Box::new(RandomAI::new(seed)),
            control: SearchControl::default(),
        }
    }

    /// 创建 Minimax AI（搜索模式取自配置）
    pub fn minimax(config: &AIConfig) -> Self {
        let control = SearchControl::default();
        AIEngine {
            strategy: Box::new(MinimaxAI::new(config, control.clone())),
            control,
        }
    }

    /// 从策略名称创建
    pub fn from_strategy(name: &str, config: &AIConfig) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "random" => Ok(Self::random(config.seed)),
            "alphabeta" | "minimax" => Ok(Self::minimax(&AIConfig {
                mode: SearchMode::AlphaBeta,
                ..config.clone()
            })),
            "full" | "exhaustive" => Ok(Self::minimax(&AIConfig {
                mode: SearchMode::Exhaustive,
                ..config.clone()
            })),
            _ => Err(EngineError::UnknownStrategy(name.to_string())),
        }
    }

    /// 中断句柄，可交给其他线程在搜索过程中调用 `interrupt()`
    pub fn control(&self) -> SearchControl {
        self.control.clone()
    }

    pub fn interrupt(&self) {
        self.control.interrupt();
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.control.nodes()
    }

    /// 为指定阵营选择最佳走法，无合法走法时返回 None
    pub fn find_best_move(&self, board: &Board, color: Color) -> Result<Option<ScoredMove>> {
        self.strategy.select_best_move(board, color)
    }

    pub fn select_moves(&self, board: &Board, color: Color, n: usize) -> Result<Vec<ScoredMove>> {
        self.strategy.select_moves(board, color, n)
    }

    /// 从 HC-FEN 选择走法（返回带评分的走法记号）
    pub fn select_moves_fen(&self, fen: &str, color: Color, n: usize) -> Result<Vec<(String, i64)>> {
        let board = Board::from_fen(fen)?;
        let moves = self.strategy.select_moves(&board, color, n)?;
        Ok(moves
            .into_iter()
            .map(|sm| (sm.mv.to_string(), sm.score))
            .collect())
    }

    /// 从 HC-FEN 选择最佳走法
    pub fn select_best_move_fen(&self, fen: &str, color: Color) -> Result<Option<String>> {
        let board = Board::from_fen(fen)?;
        Ok(self
            .strategy
            .select_best_move(&board, color)?
            .map(|sm| sm.mv.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions::*;

    fn engine(name: &str, depth: u32) -> AIEngine {
        let config = AIConfig {
            depth,
            seed: Some(7),
            ..Default::default()
        };
        AIEngine::from_strategy(name, &config).unwrap()
    }

    #[test]
    fn test_random_ai() {
        let ai = AIEngine::random(Some(42));
        let moves = ai.select_moves_fen(START_6X6, Color::A, 5).unwrap();
        assert_eq!(moves.len(), 5);
        let board = Board::from_fen(START_6X6).unwrap();
        for (mv, _) in moves {
            assert!(board.is_valid_notation(&mv, Some(Color::A)));
        }
    }

    #[test]
    fn test_unknown_strategy() {
        let err = AIEngine::from_strategy("mcts", &AIConfig::default())
            .err()
            .unwrap();
        assert_eq!(err, EngineError::UnknownStrategy("mcts".to_string()));
    }

    #[test]
    fn test_strategy_names() {
        for name in ["random", "alphabeta", "minimax", "full", "exhaustive", "AlphaBeta"] {
            assert!(AIEngine::from_strategy(name, &AIConfig::default()).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_chain_capture() {
        let ai = engine("alphabeta", 4);
        let best = ai.select_best_move_fen(AI_CHAIN_6X6, Color::A).unwrap();
        assert_eq!(best.as_deref(), Some("b1:d2:b3:b5"));
        assert!(ai.nodes_searched() > 0);
    }

    #[test]
    fn test_long_chain_with_promotion() {
        let ai = engine("alphabeta", 2);
        let board = Board::from_fen(LONG_CHAIN_6X6).unwrap();
        let best = ai.find_best_move(&board, Color::A).unwrap().unwrap();
        assert_eq!(best.mv.to_string(), "d4:d6:f5:f3:f1:a4");
        let mut after = board.clone();
        after.make_move(&best.mv).unwrap();
        assert_eq!(after.to_fen(), "6x6//-a//A//");
    }

    #[test]
    fn test_tie_set_membership() {
        let ai = engine("alphabeta", 2);
        for _ in 0..3 {
            let best = ai
                .select_best_move_fen(PROMOTE_MID_CHAIN_6X6, Color::A)
                .unwrap()
                .unwrap();
            assert!(
                ["d5:f6:f1:d2:d4", "d5:f6:f1:d2:d5", "d5:f6:f1:d2:d6"].contains(&best.as_str()),
                "{}",
                best
            );
        }
    }

    #[test]
    fn test_deep_tie_set() {
        let ai = engine("alphabeta", 4);
        let best = ai
            .select_best_move_fen(AI_TIE_6X6, Color::A)
            .unwrap()
            .unwrap();
        assert!(
            [
                "d4:d6:f5:f3:c2:a1:a4",
                "d4:d6:f5:f1:a4:a2:c1",
                "d4:d6:f5:f1:a4:a1:c2"
            ]
            .contains(&best.as_str()),
            "{}",
            best
        );
    }

    #[test]
    fn test_quiet_position() {
        let ai = engine("alphabeta", 4);
        let fen = ai.select_best_move_fen(AI_QUIET_6X6, Color::A).unwrap().unwrap();
        let after = crate::fen::apply_move_to_fen(AI_QUIET_6X6, &fen).unwrap();
        assert_eq!(after, "6x6//--a--a/----b/----b//--a");

        let ai = engine("alphabeta", 2);
        let best = ai.select_best_move_fen(AI_QUIET_6X6, Color::A).unwrap().unwrap();
        assert!(["e2-d2", "e2-f2"].contains(&best.as_str()), "{}", best);
    }

    #[test]
    fn test_king_run() {
        let ai = engine("alphabeta", 4);
        let best = ai.select_best_move_fen(AI_KING_RUN_6X6, Color::A).unwrap().unwrap();
        let after = crate::fen::apply_move_to_fen(AI_KING_RUN_6X6, &best).unwrap();
        assert_eq!(after, "6x6///-----A/--b//");
    }

    #[test]
    fn test_defence() {
        let ai = engine("alphabeta", 4);
        let best = ai.select_best_move_fen(AI_DEFENCE_6X6, Color::B).unwrap().unwrap();
        assert!(
            ["f2-f1", "f4-e4", "f4-f3", "b5-a5", "b5-b4", "b5-c5", "f5-e5"].contains(&best.as_str()),
            "{}",
            best
        );
    }

    #[test]
    fn test_last_man() {
        let ai = engine("alphabeta", 2);
        let best = ai.select_best_move_fen(AI_LAST_MAN_6X6, Color::B).unwrap().unwrap();
        assert!(["a6-a5", "a6-b5"].contains(&best.as_str()), "{}", best);
    }

    #[test]
    fn test_invalid_depth() {
        let ai = engine("alphabeta", 0);
        let err = ai.select_best_move_fen(CHAIN_6X6, Color::A).unwrap_err();
        assert_eq!(err, EngineError::InvalidDepth(0));
    }

    #[test]
    fn test_opening_is_random_legal_move() {
        let ai = engine("alphabeta", 3);
        let board = Board::from_fen(START_8X8).unwrap();
        let best = ai.find_best_move(&board, Color::B).unwrap().unwrap();
        assert!(board.is_valid_move(&best.mv, Some(Color::B)));
        // 开局直接随机，不做搜索
        assert_eq!(ai.nodes_searched(), 0);
    }

    #[test]
    fn test_no_moves() {
        let ai = engine("alphabeta", 2);
        let board = Board::from_fen("6x6/a/////").unwrap();
        assert!(ai.find_best_move(&board, Color::B).unwrap().is_none());
    }

    #[test]
    fn test_interrupted_search_still_answers() {
        let ai = engine("exhaustive", 3);
        let board = Board::from_fen(AI_DEFENCE_6X6).unwrap();
        let control = ai.control();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(5));
            control.interrupt();
        });
        let best = ai.find_best_move(&board, Color::B).unwrap();
        handle.join().unwrap();
        let best = best.unwrap();
        assert!(board.is_valid_move(&best.mv, Some(Color::B)));
    }
}
