//! 走法与走法链
//!
//! 一步"跳"（Hop）是从一个格子到另一个格子的单次移动，可能吃掉一个棋子。
//! 一个完整回合（Move）是首尾相接的若干跳，普通走法只有一跳。

use crate::error::{EngineError, Result};
use crate::types::{Direction, Piece, Position};
use std::fmt;

/// 被吃的棋子及其所在格子（悔棋时用于复原）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub position: Position,
    pub piece: Piece,
}

/// 单次跳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub from: Position,
    pub to: Position,
    pub direction: Direction,
    pub capture: Option<Capture>,
    /// 这一跳之前棋子是否已经是王
    pub was_king: bool,
    /// 这一跳之后棋子是否是王（升变后链上其余跳都保持 true）
    pub promotes: bool,
}

impl Hop {
    pub fn new(
        from: Position,
        to: Position,
        capture: Option<Capture>,
        was_king: bool,
        promotes: bool,
    ) -> Result<Hop> {
        let direction =
            Direction::between(from, to).ok_or_else(|| EngineError::SameCell(from.name()))?;
        Ok(Hop {
            from,
            to,
            direction,
            capture,
            was_king,
            promotes,
        })
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

/// 一个完整回合：按顺序排列的跳
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    hops: Vec<Hop>,
}

impl Move {
    pub fn new(hop: Hop) -> Move {
        Move { hops: vec![hop] }
    }

    /// 由生成器直接构造（调用方保证非空且首尾相接）
    pub(crate) fn from_hops(hops: Vec<Hop>) -> Move {
        debug_assert!(!hops.is_empty());
        Move { hops }
    }

    /// 追加一跳
    ///
    /// 新的一跳必须从上一跳的终点出发；之前发生过升变的话，新的一跳也带上升变标记
    pub fn push(&mut self, mut hop: Hop) -> Result<()> {
        let last = self.last();
        if hop.from != last.to {
            return Err(EngineError::BrokenChain {
                expected: last.to.name(),
                found: hop.from.name(),
            });
        }
        if last.promotes {
            hop.was_king = true;
            hop.promotes = true;
        }
        self.hops.push(hop);
        Ok(())
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn first(&self) -> &Hop {
        &self.hops[0]
    }

    pub fn last(&self) -> &Hop {
        &self.hops[self.hops.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// 起点
    pub fn from(&self) -> Position {
        self.first().from
    }

    /// 终点
    pub fn to(&self) -> Position {
        self.last().to
    }

    /// 链上任意一跳吃子即为吃子走法
    pub fn is_capture(&self) -> bool {
        self.hops.iter().any(Hop::is_capture)
    }

    /// 链上所有被吃的棋子
    pub fn captures(&self) -> impl Iterator<Item = &Capture> {
        self.hops.iter().filter_map(|h| h.capture.as_ref())
    }

    /// 走法记号，如 "b2-c3" 或 "b1:d2:f3"
    pub fn notation(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { ':' } else { '-' };
        write!(f, "{}", self.from())?;
        for hop in &self.hops {
            write!(f, "{}{}", sep, hop.to)?;
        }
        Ok(())
    }
}

/// 检查走法记号的语法
///
/// 格式：列字母 a-j 加不含前导零的行号，然后是一个或多个以 '-' 或 ':' 连接的终点。
/// 这里只检查语法，分隔符是否与吃子一致由局面合法性判断。
pub fn is_notation_valid(s: &str) -> bool {
    let mut cells = 0;
    let mut rest = s;
    loop {
        match cell_token_len(rest) {
            Some(n) => {
                cells += 1;
                rest = &rest[n..];
            }
            None => return false,
        }
        match rest.chars().next() {
            None => return cells >= 2,
            Some('-') | Some(':') => rest = &rest[1..],
            Some(_) => return false,
        }
    }
}

/// 格子名的长度（字母 + 一个非零数字 + 任意个 0），不匹配返回 None
fn cell_token_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || !(b'a'..=b'j').contains(&bytes[0]) || !(b'1'..=b'9').contains(&bytes[1]) {
        return None;
    }
    let zeros = bytes[2..].iter().take_while(|&&b| b == b'0').count();
    Some(2 + zeros)
}
