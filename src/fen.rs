//! HC-FEN 解析和生成
//!
//! 格式: `<尺寸>/<第1行>/<第2行>/.../<第H行>`
//!
//! - 尺寸：`列x行`，如 `6x6`、`8x10`
//! - 行从第 1 行（A 方底线）开始，每行从 a 列开始
//! - 棋子符号：a(A方兵) A(A方王) b(B方兵) B(B方王)
//! - 空格：`-`，行尾的空格省略

use crate::board::Board;
use crate::error::{EngineError, Result};
use crate::types::{BoardSize, Piece, Position};

/// 解析 HC-FEN 字符串
pub fn parse_position(fen: &str) -> Result<Board> {
    let invalid = || EngineError::InvalidPosition(fen.to_string());

    let mut parts = fen.split('/');
    let size = parts
        .next()
        .and_then(BoardSize::from_marker)
        .ok_or_else(invalid)?;
    let rows: Vec<&str> = parts.collect();
    if rows.len() != size.rows() as usize {
        return Err(invalid());
    }

    let mut board = Board::new(size);
    for (r, line) in rows.iter().enumerate() {
        if line.chars().count() > size.cols() as usize {
            return Err(invalid());
        }
        for (c, ch) in line.chars().enumerate() {
            if ch == '-' {
                continue;
            }
            let piece = Piece::from_sign(ch).ok_or_else(invalid)?;
            let pos = Position::new(r as u8 + 1, c as u8 + 1);
            board.add_piece(&pos.name(), piece.color, piece.rank)?;
        }
    }
    Ok(board)
}

/// 检查 HC-FEN 字符串是否有效
pub fn is_position_valid(fen: &str) -> bool {
    parse_position(fen).is_ok()
}

/// 生成 HC-FEN 字符串
pub fn render_position(board: &Board) -> String {
    let size = board.size();
    let mut fen = size.marker();
    for row in 1..=size.rows() {
        let line: String = (1..=size.cols())
            .map(|col| {
                board
                    .piece(Position::new(row, col))
                    .map_or('-', |p| p.sign())
            })
            .collect();
        fen.push('/');
        fen.push_str(line.trim_end_matches('-'));
    }
    fen
}

/// 指定尺寸的标准初始局面
pub fn initial_position(size: BoardSize) -> String {
    render_position(&Board::with_initial_pieces(size))
}

/// 在 HC-FEN 上执行一个走法，返回新的 HC-FEN
pub fn apply_move_to_fen(fen: &str, notation: &str) -> Result<String> {
    let mut board = parse_position(fen)?;
    let mv = board.build_move(notation)?;
    board.make_move(&mv)?;
    Ok(render_position(&board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Rank};

    #[test]
    fn test_initial_positions() {
        let expected = [
            (BoardSize::Size6x6, "6x6/aaaaaa/aaaaaa///bbbbbb/bbbbbb"),
            (BoardSize::Size6x8, "6x8/aaaaaa/aaaaaa/aaaaaa///bbbbbb/bbbbbb/bbbbbb"),
            (BoardSize::Size8x6, "8x6/aaaaaaaa/aaaaaaaa///bbbbbbbb/bbbbbbbb"),
            (
                BoardSize::Size8x8,
                "8x8/aaaaaaaa/aaaaaaaa/aaaaaaaa///bbbbbbbb/bbbbbbbb/bbbbbbbb",
            ),
            (
                BoardSize::Size8x10,
                "8x10/aaaaaaaa/aaaaaaaa/aaaaaaaa/aaaaaaaa///bbbbbbbb/bbbbbbbb/bbbbbbbb/bbbbbbbb",
            ),
            (
                BoardSize::Size10x8,
                "10x8/aaaaaaaaaa/aaaaaaaaaa/aaaaaaaaaa///bbbbbbbbbb/bbbbbbbbbb/bbbbbbbbbb",
            ),
            (
                BoardSize::Size10x10,
                "10x10/aaaaaaaaaa/aaaaaaaaaa/aaaaaaaaaa/aaaaaaaaaa///bbbbbbbbbb/bbbbbbbbbb/bbbbbbbbbb/bbbbbbbbbb",
            ),
        ];
        for (size, fen) in expected {
            assert_eq!(initial_position(size), fen);
            assert!(parse_position(fen).unwrap().is_initial_position());
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new(BoardSize::Size6x6);
        assert_eq!(render_position(&board), "6x6//////");
        assert!(parse_position("6x6//////").unwrap().pieces(None).is_empty());
    }

    #[test]
    fn test_parse_pieces() {
        let board = parse_position("6x6/a/a//---a/--B/----bb").unwrap();
        assert_eq!(board.pieces(None).len(), 6);
        assert_eq!(
            board.piece_at("c5").unwrap(),
            Some(Piece {
                color: Color::B,
                rank: Rank::King
            })
        );
        assert_eq!(board.piece_at("d4").unwrap(), Some(Piece::man(Color::A)));
    }

    #[test]
    fn test_roundtrip() {
        for fen in [
            "6x6/a/a//---a/--B/----bb",
            "6x6//-a---b/-b/---a-b/---b/----b",
            "8x10/-a/A-b///////--B/b",
            "10x10/a--------b/////////",
        ] {
            assert_eq!(render_position(&parse_position(fen).unwrap()), fen);
        }
    }

    #[test]
    fn test_trailing_empty_cells_are_trimmed() {
        let board = parse_position("6x6/a-----/---////").unwrap();
        assert_eq!(render_position(&board), "6x6/a/////");
    }

    #[test]
    fn test_invalid_positions() {
        for fen in [
            "",
            "6x6",
            "7x7//////",
            "6X6//////",
            "6x6/////",
            "6x6///////",
            "6x6/aaaaaaa/////",
            "6x6/x/////",
            "6x6/a a/////",
            "6x8/a-----b/a//aa/a-bb/b--bba/b/",
        ] {
            assert!(!is_position_valid(fen), "{} should be invalid", fen);
        }
        // 行数与尺寸不符
        assert_eq!(
            parse_position("8x10/-a/A-b//////--B/b").unwrap_err(),
            EngineError::InvalidPosition("8x10/-a/A-b//////--B/b".to_string())
        );
        let err = parse_position("6x6/q/////").unwrap_err();
        assert_eq!(err.to_string(), "Invalid board representation \"6x6/q/////\".");
    }

    #[test]
    fn test_apply_move_to_fen() {
        let fen = "6x6//-a---b/-b/---a-b/---b/----b";
        assert_eq!(
            apply_move_to_fen(fen, "d4:d6:f5:f3:f1:a4").unwrap(),
            "6x6//-a//A//"
        );
        assert!(apply_move_to_fen(fen, "a1-a2").unwrap_err().is_illegal_move());
    }
}
