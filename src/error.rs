//! 引擎错误类型
//!
//! 结构性错误（无法解析）与走法非法（当前局面不允许）分开表示

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid board representation \"{0}\".")]
    InvalidPosition(String),

    #[error("Invalid move notation \"{0}\".")]
    InvalidNotation(String),

    #[error("Cell \"{0}\" does not exist on this board.")]
    UnknownCell(String),

    #[error("Source and destination are the same cell \"{0}\".")]
    SameCell(String),

    #[error("Cell \"{0}\" is empty.")]
    EmptyCell(String),

    #[error("Cell \"{0}\" is occupied.")]
    OccupiedCell(String),

    #[error("No piece to capture between \"{from}\" and \"{to}\".")]
    NoCapturePiece { from: String, to: String },

    #[error("Hop must start at \"{expected}\", got \"{found}\".")]
    BrokenChain { expected: String, found: String },

    #[error("Hop index {index} out of range for a move of {len} hops.")]
    HopOutOfRange { index: usize, len: usize },

    #[error("Unknown strategy: {0}. Available: alphabeta, minimax, full, exhaustive, random")]
    UnknownStrategy(String),

    #[error("Move \"{0}\" is not legal in this position.")]
    IllegalMove(String),

    #[error("Incorrect depth value \"{0}\". Should greater than 0.")]
    InvalidDepth(u32),
}

impl EngineError {
    /// 语法正确但当前局面不合法的走法
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, EngineError::IllegalMove(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
