//! 六角跳棋核心类型定义
//!
//! 定义棋盘尺寸、阵营、等级、方向、格子坐标与棋子

use std::fmt;

/// 棋子颜色/阵营
///
/// A 方从第 1 行出发向上走，B 方从最后一行出发向下走
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    A,
    B,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::A, Color::B];

    /// 获取对方阵营
    pub fn opposite(&self) -> Color {
        match self {
            Color::A => Color::B,
            Color::B => Color::A,
        }
    }

    /// 数组下标（用于按阵营计数）
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Color::A => 0,
            Color::B => 1,
        }
    }

    /// 兵的前进方向
    pub fn forward_directions(&self) -> [Direction; 3] {
        match self {
            Color::A => Direction::TOP,
            Color::B => Direction::BOTTOM,
        }
    }

    /// 从字符解析（不区分大小写）
    pub fn from_char(c: char) -> Option<Color> {
        match c.to_ascii_lowercase() {
            'a' => Some(Color::A),
            'b' => Some(Color::B),
            _ => None,
        }
    }

    /// 转换为小写字符
    pub fn to_char(&self) -> char {
        match self {
            Color::A => 'a',
            Color::B => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::A => write!(f, "A"),
            Color::B => write!(f, "B"),
        }
    }
}

/// 棋子等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    /// 兵：只能向对方底线移动
    Man,
    /// 王：沿斜线任意距离飞行
    King,
}

/// 六个走子方向
///
/// 棋盘是"砖墙"结构：奇数列比偶数列低半行，因此每个格子最多有六个邻居
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    TopLeft,
    TopMiddle,
    TopRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl Direction {
    /// 走法生成时的遍历顺序
    pub const ALL: [Direction; 6] = [
        Direction::TopLeft,
        Direction::TopMiddle,
        Direction::TopRight,
        Direction::BottomLeft,
        Direction::BottomMiddle,
        Direction::BottomRight,
    ];

    pub const TOP: [Direction; 3] = [
        Direction::TopLeft,
        Direction::TopMiddle,
        Direction::TopRight,
    ];

    pub const BOTTOM: [Direction; 3] = [
        Direction::BottomLeft,
        Direction::BottomMiddle,
        Direction::BottomRight,
    ];

    /// 反方向
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::TopLeft => Direction::BottomRight,
            Direction::TopMiddle => Direction::BottomMiddle,
            Direction::TopRight => Direction::BottomLeft,
            Direction::BottomLeft => Direction::TopRight,
            Direction::BottomMiddle => Direction::TopMiddle,
            Direction::BottomRight => Direction::TopLeft,
        }
    }

    /// 邻居数组下标
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Direction::TopLeft => 0,
            Direction::TopMiddle => 1,
            Direction::TopRight => 2,
            Direction::BottomLeft => 3,
            Direction::BottomMiddle => 4,
            Direction::BottomRight => 5,
        }
    }

    /// 根据两个格子的相对位置判断方向
    ///
    /// 用"半行"高度比较：奇数列格子的高度为 2*row，偶数列为 2*row+1。
    /// 两个格子相同时返回 None。
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        if from == to {
            return None;
        }
        let (fy, ty) = (from.half_row(), to.half_row());
        let direction = if to.col < from.col {
            if ty < fy {
                Direction::BottomLeft
            } else {
                Direction::TopLeft
            }
        } else if to.col == from.col {
            if ty < fy {
                Direction::BottomMiddle
            } else {
                Direction::TopMiddle
            }
        } else if ty < fy {
            Direction::BottomRight
        } else {
            Direction::TopRight
        };
        Some(direction)
    }
}

/// 支持的棋盘尺寸（列 x 行）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardSize {
    Size6x6,
    Size6x8,
    Size8x6,
    Size8x8,
    Size8x10,
    Size10x8,
    Size10x10,
}

impl BoardSize {
    pub const ALL: [BoardSize; 7] = [
        BoardSize::Size6x6,
        BoardSize::Size6x8,
        BoardSize::Size8x6,
        BoardSize::Size8x8,
        BoardSize::Size8x10,
        BoardSize::Size10x8,
        BoardSize::Size10x10,
    ];

    /// 列数
    pub fn cols(&self) -> u8 {
        match self {
            BoardSize::Size6x6 | BoardSize::Size6x8 => 6,
            BoardSize::Size8x6 | BoardSize::Size8x8 | BoardSize::Size8x10 => 8,
            BoardSize::Size10x8 | BoardSize::Size10x10 => 10,
        }
    }

    /// 行数
    pub fn rows(&self) -> u8 {
        match self {
            BoardSize::Size6x6 | BoardSize::Size8x6 => 6,
            BoardSize::Size6x8 | BoardSize::Size8x8 | BoardSize::Size10x8 => 8,
            BoardSize::Size8x10 | BoardSize::Size10x10 => 10,
        }
    }

    /// 格子总数
    pub fn cells(&self) -> usize {
        self.cols() as usize * self.rows() as usize
    }

    /// 初始局面双方棋子总数
    pub fn initial_pieces(&self) -> usize {
        match self {
            BoardSize::Size6x6 => 24,
            BoardSize::Size8x6 => 32,
            BoardSize::Size6x8 => 36,
            BoardSize::Size8x8 => 48,
            BoardSize::Size10x8 => 60,
            BoardSize::Size8x10 => 64,
            BoardSize::Size10x10 => 80,
        }
    }

    /// HC-FEN 中的尺寸标记，如 "6x8"
    pub fn marker(&self) -> String {
        format!("{}x{}", self.cols(), self.rows())
    }

    /// 从尺寸标记解析
    pub fn from_marker(marker: &str) -> Option<BoardSize> {
        BoardSize::ALL.into_iter().find(|size| size.marker() == marker)
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// 格子坐标 (row, col)，均从 1 开始
///
/// 格子名由列字母和行号组成：col 1 → 'a'，所以 (1, 2) 是 "b1"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const LETTERS: [char; 10] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];

    pub fn new(row: u8, col: u8) -> Self {
        Position { row, col }
    }

    /// 检查位置是否在指定尺寸的棋盘内
    pub fn is_on(&self, size: BoardSize) -> bool {
        (1..=size.rows()).contains(&self.row) && (1..=size.cols()).contains(&self.col)
    }

    /// 以半行为单位的高度（奇数列低半行）
    #[inline]
    pub fn half_row(&self) -> i32 {
        2 * self.row as i32 + if self.col % 2 == 0 { 1 } else { 0 }
    }

    /// 从格子名解析（如 "b1"、"j10"）
    pub fn from_name(s: &str) -> Option<Position> {
        let mut chars = s.chars();
        let letter = chars.next()?;
        let col = Position::LETTERS.iter().position(|&c| c == letter)? as u8 + 1;
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row: u8 = digits.parse().ok()?;
        if !(1..=10).contains(&row) {
            return None;
        }
        Some(Position { row, col })
    }

    /// 转换为格子名
    ///
    /// 列号不在 1..=10 内时用 `?` 代替列字母
    pub fn name(&self) -> String {
        let letter = (self.col as usize)
            .checked_sub(1)
            .and_then(|i| Position::LETTERS.get(i))
            .copied()
            .unwrap_or('?');
        format!("{}{}", letter, self.row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::Man,
        }
    }

    pub fn king(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::King,
        }
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// HC-FEN 符号：兵小写，王大写
    pub fn sign(&self) -> char {
        let c = self.color.to_char();
        if self.is_king() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// 从 HC-FEN 符号解析
    pub fn from_sign(c: char) -> Option<Piece> {
        let color = Color::from_char(c)?;
        let rank = if c.is_ascii_uppercase() {
            Rank::King
        } else {
            Rank::Man
        };
        Some(Piece { color, rank })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sign())
    }
}
