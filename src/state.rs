//! 局面快照：按阵营统计兵、王以及有吃子机会的棋子数

use crate::board::Board;
use crate::movegen;
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionState {
    /// 下标为 [`Color::index`]
    pub men: [u32; 2],
    pub kings: [u32; 2],
    /// 当前至少有一个吃子走法的棋子数
    pub capture_pieces: [u32; 2],
}

impl PositionState {
    pub fn build(board: &Board) -> PositionState {
        let mut state = PositionState::default();
        for (pos, piece) in board.pieces(None) {
            let i = piece.color.index();
            if piece.is_king() {
                state.kings[i] += 1;
            } else {
                state.men[i] += 1;
            }
            if movegen::has_capture(board, pos) {
                state.capture_pieces[i] += 1;
            }
        }
        state
    }

    #[inline]
    pub fn men(&self, color: Color) -> u32 {
        self.men[color.index()]
    }

    #[inline]
    pub fn kings(&self, color: Color) -> u32 {
        self.kings[color.index()]
    }

    #[inline]
    pub fn pieces(&self, color: Color) -> u32 {
        self.men(color) + self.kings(color)
    }

    #[inline]
    pub fn capture_pieces(&self, color: Color) -> u32 {
        self.capture_pieces[color.index()]
    }
}
