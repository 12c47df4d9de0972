//! 六角跳棋测试局面库
//!
//! 提供命名的 HC-FEN 测试局面，供测试、基准测试和命令行调试使用
//!
//! 命名规范:
//! - START_*: 各尺寸初始局面
//! - CAPTURE_* / CHAIN_* / KING_*: 吃子与连吃
//! - AI_*: 搜索测试
//! - DRAW_*: 和棋条件

// =============================================================================
// 初始局面 (START)
// =============================================================================

pub const START_6X6: &str = "6x6/aaaaaa/aaaaaa///bbbbbb/bbbbbb";
pub const START_6X8: &str = "6x8/aaaaaa/aaaaaa/aaaaaa///bbbbbb/bbbbbb/bbbbbb";
pub const START_8X6: &str = "8x6/aaaaaaaa/aaaaaaaa///bbbbbbbb/bbbbbbbb";
pub const START_8X8: &str = "8x8/aaaaaaaa/aaaaaaaa/aaaaaaaa///bbbbbbbb/bbbbbbbb/bbbbbbbb";
pub const START_8X10: &str =
    "8x10/aaaaaaaa/aaaaaaaa/aaaaaaaa/aaaaaaaa///bbbbbbbb/bbbbbbbb/bbbbbbbb/bbbbbbbb";
pub const START_10X8: &str =
    "10x8/aaaaaaaaaa/aaaaaaaaaa/aaaaaaaaaa///bbbbbbbbbb/bbbbbbbbbb/bbbbbbbbbb";
pub const START_10X10: &str = "10x10/aaaaaaaaaa/aaaaaaaaaa/aaaaaaaaaa/aaaaaaaaaa///bbbbbbbbbb/bbbbbbbbbb/bbbbbbbbbb/bbbbbbbbbb";

// =============================================================================
// 吃子 (CAPTURE / CHAIN / KING)
// =============================================================================

/// 兵 b1 吃 c2，同时 c2 也能反吃 b1
pub const CAPTURE_6X6: &str = "6x6/-a/--b////";

/// 三个方向都能吃
pub const CAPTURE_FAN_6X6: &str = "6x6/-aaa/--b////";

/// 兵三连吃，另有一条两连吃分支
pub const CHAIN_6X6: &str = "6x6/-a/--b/--b-b/-b//";

/// 王的多分支连吃，可以落回出发格
pub const KING_WEB_6X6: &str = "6x6/-A/--b/-b//--b/";

/// 兵在连吃中途升变，之后按王的规则继续
pub const PROMOTE_MID_CHAIN_6X6: &str = "6x6/---a/----b/---b/-----b/---a/----b";

/// 五连吃并升变
pub const LONG_CHAIN_6X6: &str = "6x6//-a---b/-b/---a-b/---b/----b";

/// 王长距离吃两子
pub const KING_DOUBLE_6X6: &str = "6x6///B/-b//-----A";

// =============================================================================
// 搜索 (AI)
// =============================================================================

/// A 方 4 层搜索应走 b1:d2:b3:b5
pub const AI_CHAIN_6X6: &str = CHAIN_6X6;

/// 升变方向的三种连吃得分相同
pub const AI_TIE_6X6: &str = "6x6/-b/-a-b/b/---a-b/---b/b---b";

/// 安静局面，双方都没有吃子
pub const AI_QUIET_6X6: &str = "6x6//--a-a/----b/----b//--a";

/// A 方唯一的兵连吃多子，中途升变
pub const AI_KING_RUN_6X6: &str = "6x6//b--a/---bb/--b/-b--b/----b";

/// B 方防守
pub const AI_DEFENCE_6X6: &str = "6x6//---a-b/-a-aa/a-a--b/-b---b/";

/// B 方只剩一个兵，面对 A 方的王
pub const AI_LAST_MAN_6X6: &str = "6x6/---a-a/-a/a/a//bA";

// =============================================================================
// 和棋 (DRAW)
// =============================================================================

/// 一王对一王
pub const DRAW_KINGS_6X6: &str = "6x6/A/////-----B";

/// 两王对一王
pub const DRAW_TWO_KINGS_6X6: &str = "6x6/AA/////-----B";

// =============================================================================
// 汇总
// =============================================================================

pub const START_POSITIONS: &[&str] = &[
    START_6X6,
    START_6X8,
    START_8X6,
    START_8X8,
    START_8X10,
    START_10X8,
    START_10X10,
];

pub const ALL_POSITIONS: &[&str] = &[
    START_6X6,
    START_8X8,
    CAPTURE_6X6,
    CAPTURE_FAN_6X6,
    CHAIN_6X6,
    KING_WEB_6X6,
    PROMOTE_MID_CHAIN_6X6,
    LONG_CHAIN_6X6,
    KING_DOUBLE_6X6,
    AI_TIE_6X6,
    AI_QUIET_6X6,
    AI_KING_RUN_6X6,
    AI_DEFENCE_6X6,
    AI_LAST_MAN_6X6,
    DRAW_KINGS_6X6,
    DRAW_TWO_KINGS_6X6,
];

/// 按名称查找局面（命令行使用）
pub fn by_name(name: &str) -> Option<&'static str> {
    let fen = match name.to_uppercase().as_str() {
        "START" | "START_6X6" => START_6X6,
        "START_6X8" => START_6X8,
        "START_8X6" => START_8X6,
        "START_8X8" => START_8X8,
        "START_8X10" => START_8X10,
        "START_10X8" => START_10X8,
        "START_10X10" => START_10X10,
        "CAPTURE_6X6" => CAPTURE_6X6,
        "CAPTURE_FAN_6X6" => CAPTURE_FAN_6X6,
        "CHAIN_6X6" => CHAIN_6X6,
        "KING_WEB_6X6" => KING_WEB_6X6,
        "PROMOTE_MID_CHAIN_6X6" => PROMOTE_MID_CHAIN_6X6,
        "LONG_CHAIN_6X6" => LONG_CHAIN_6X6,
        "KING_DOUBLE_6X6" => KING_DOUBLE_6X6,
        "AI_TIE_6X6" => AI_TIE_6X6,
        "AI_QUIET_6X6" => AI_QUIET_6X6,
        "AI_KING_RUN_6X6" => AI_KING_RUN_6X6,
        "AI_DEFENCE_6X6" => AI_DEFENCE_6X6,
        "AI_LAST_MAN_6X6" => AI_LAST_MAN_6X6,
        "DRAW_KINGS_6X6" => DRAW_KINGS_6X6,
        "DRAW_TWO_KINGS_6X6" => DRAW_TWO_KINGS_6X6,
        _ => return None,
    };
    Some(fen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::fen::render_position;

    #[test]
    fn test_all_positions_valid() {
        for fen in ALL_POSITIONS.iter().chain(START_POSITIONS) {
            let board = Board::from_fen(fen);
            assert!(board.is_ok(), "{} invalid: {:?}", fen, board.err());
            assert_eq!(render_position(&board.unwrap()), *fen);
        }
    }

    #[test]
    fn test_start_positions_are_initial() {
        for fen in START_POSITIONS {
            assert!(Board::from_fen(fen).unwrap().is_initial_position(), "{}", fen);
        }
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("start"), Some(START_6X6));
        assert_eq!(by_name("chain_6x6"), Some(CHAIN_6X6));
        assert_eq!(by_name("nope"), None);
    }
}
