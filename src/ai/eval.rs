//! 局面评估
//!
//! 子力差 + 相对搜索起点的失兵惩罚 + 双方可吃子棋子数之差

use crate::state::PositionState;
use crate::types::Color;

/// 兵价值
pub const MAN_VALUE: i64 = 100;
/// 王价值
pub const KING_VALUE: i64 = MAN_VALUE * 2;

/// 己方无子
pub const SCORE_MIN: i64 = -((1 << 53) - 1);
/// 对方无子
pub const SCORE_MAX: i64 = (1 << 53) - 1;

/// 以 `color` 的视角评估 `now`，`start` 是搜索开始时的快照
pub fn evaluate(start: &PositionState, now: &PositionState, color: Color) -> i64 {
    let opponent = color.opposite();
    let material = |c: Color| now.men(c) as i64 * MAN_VALUE + now.kings(c) as i64 * KING_VALUE;

    let mut score = if now.pieces(color) == 0 {
        SCORE_MIN
    } else if now.pieces(opponent) == 0 {
        SCORE_MAX
    } else {
        material(color) - material(opponent)
    };

    // 升变也会让兵数减少，同样计入
    let lost = start.men(color) as i64 - now.men(color) as i64;
    if lost > 0 {
        score -= lost * MAN_VALUE;
    }

    score += now.capture_pieces(color) as i64;
    score -= now.capture_pieces(opponent) as i64;
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn state(fen: &str) -> PositionState {
        Board::from_fen(fen).unwrap().state()
    }

    #[test]
    fn test_material() {
        let s = state("6x6/aA/////bbb");
        assert_eq!(evaluate(&s, &s, Color::A), 300 - 300);
        let s = state("6x6/aA/////b");
        assert_eq!(evaluate(&s, &s, Color::A), 200);
        assert_eq!(evaluate(&s, &s, Color::B), -200);
    }

    #[test]
    fn test_terminal_scores() {
        let s = state("6x6/a/////");
        assert_eq!(evaluate(&s, &s, Color::A), SCORE_MAX);
        assert_eq!(evaluate(&s, &s, Color::B), SCORE_MIN);
    }

    #[test]
    fn test_lost_men_penalty() {
        let start = state("6x6/aa/////bb");
        let now = state("6x6/a/////bb");
        // 子力 -100，失兵 -100
        assert_eq!(evaluate(&start, &now, Color::A), -200);
        // 对方失兵不影响己方
        assert_eq!(evaluate(&start, &now, Color::B), 100);
    }

    #[test]
    fn test_capture_pieces_term() {
        // b1 与 c2 互相可吃
        let s = state("6x6/-a/--b////");
        assert_eq!(evaluate(&s, &s, Color::A), 0);
        // 只有 A 的王能吃 c2
        let s = state("6x6/-A/--b/---b///");
        assert_eq!(s.capture_pieces(Color::A), 1);
        assert_eq!(evaluate(&s, &s, Color::A), 200 - 200 + 1 - s.capture_pieces(Color::B) as i64);
    }
}
