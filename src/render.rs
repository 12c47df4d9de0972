//! ASCII 棋盘绘制
//!
//! 每个格子画成一个六边形，偶数列比奇数列高半行：
//!
//! ```text
//!        ___     ___     ___
//!    ___/ b \___/ b \___/ b \
//! 6 / b \___/ b \___/ b \___/
//! ```

use crate::board::Board;
use crate::types::{Color, Position};

const ANSI_RESET: &str = "\u{1b}[0m";
const ANSI_YELLOW: &str = "\u{1b}[33m";
const ANSI_BLUE: &str = "\u{1b}[34m";

/// 绘制棋盘，`colored` 为 true 时 A 方用黄色、B 方用蓝色
pub fn render_ascii(board: &Board, colored: bool) -> String {
    let size = board.size();
    let (rows, cols) = (size.rows(), size.cols());
    let half = cols as usize / 2;

    let sign = |row: u8, col: u8| -> String {
        let piece = board.piece(Position::new(row, col));
        let c = piece.map_or(' ', |p| p.sign());
        if !colored {
            return c.to_string();
        }
        let color = match piece {
            Some(p) if p.color == Color::A => ANSI_YELLOW,
            _ => ANSI_BLUE,
        };
        format!("{}{}{}", color, c, ANSI_RESET)
    };
    // 某一行的偶数列（较高的半行）
    let upper = |row: u8| -> String {
        (1..=cols)
            .filter(|c| c % 2 == 0)
            .map(|c| format!("\\___/ {} ", sign(row, c)))
            .collect()
    };

    let mut lines = Vec::with_capacity(rows as usize * 2 + 4);
    lines.push(format!("       ___{}", "     ___".repeat(half - 1)));
    lines.push(format!(
        "   {}",
        (1..=cols)
            .filter(|c| c % 2 == 0)
            .map(|c| format!("___/ {} \\", sign(rows, c)))
            .collect::<String>()
    ));

    for row in (1..=rows).rev() {
        let odd: String = (1..=cols)
            .filter(|c| c % 2 == 1)
            .map(|c| format!("/ {} \\___", sign(row, c)))
            .collect();
        lines.push(format!("{} {}/", row % 10, odd));
        if row > 1 {
            lines.push(format!("  {}\\", upper(row - 1)));
        }
    }

    lines.push(format!("  {}", vec!["\\___/"; half].join("   ")));
    let letters: Vec<String> = Position::LETTERS[..cols as usize]
        .iter()
        .map(|c| c.to_string())
        .collect();
    lines.push(format!("    {}", letters.join("   ")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoardSize;

    #[test]
    fn test_render_initial_6x6() {
        let board = Board::with_initial_pieces(BoardSize::Size6x6);
        let expected = [
            "       ___     ___     ___",
            "   ___/ b \\___/ b \\___/ b \\",
            "6 / b \\___/ b \\___/ b \\___/",
            "  \\___/ b \\___/ b \\___/ b \\",
            "5 / b \\___/ b \\___/ b \\___/",
            "  \\___/   \\___/   \\___/   \\",
            "4 /   \\___/   \\___/   \\___/",
            "  \\___/   \\___/   \\___/   \\",
            "3 /   \\___/   \\___/   \\___/",
            "  \\___/ a \\___/ a \\___/ a \\",
            "2 / a \\___/ a \\___/ a \\___/",
            "  \\___/ a \\___/ a \\___/ a \\",
            "1 / a \\___/ a \\___/ a \\___/",
            "  \\___/   \\___/   \\___/",
            "    a   b   c   d   e   f",
        ]
        .join("\n");
        assert_eq!(render_ascii(&board, false), expected);
    }

    #[test]
    fn test_render_row_labels_wrap() {
        let board = Board::new(BoardSize::Size10x10);
        let text = render_ascii(&board, false);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].starts_with("0 / "));
        assert!(lines.last().unwrap().ends_with("i   j"));
    }

    #[test]
    fn test_render_colored() {
        let board = Board::from_fen("6x6/a/////-----B").unwrap();
        let text = render_ascii(&board, true);
        assert!(text.contains("\u{1b}[33ma\u{1b}[0m"));
        assert!(text.contains("\u{1b}[34mB\u{1b}[0m"));
    }
}
