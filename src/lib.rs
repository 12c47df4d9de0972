//! Hex Checkers AI Engine
//!
//! 六角（砖墙）跳棋规则引擎 + 并行 Minimax/Alpha-Beta AI，支持 HC-FEN 输入输出

pub mod ai;
pub mod board;
pub mod cell;
pub mod error;
pub mod fen;
mod movegen;
pub mod moves;
pub mod render;
pub mod state;
pub mod test_positions;
pub mod types;

pub use ai::{
    evaluate, AIConfig, AIEngine, AIStrategy, MinimaxAI, RandomAI, ScoredMove, SearchControl,
    SearchMode, SCORE_MAX, SCORE_MIN,
};
pub use board::{get_legal_moves_from_fen, Board};
pub use cell::{Cell, CellGraph};
pub use error::{EngineError, Result};
pub use fen::{apply_move_to_fen, initial_position, is_position_valid, parse_position, render_position};
pub use moves::{is_notation_valid, Capture, Hop, Move};
pub use render::render_ascii;
pub use state::PositionState;
pub use types::{BoardSize, Color, Direction, Piece, Position, Rank};
