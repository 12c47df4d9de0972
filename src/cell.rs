//! 格子拓扑
//!
//! 棋盘是"砖墙"结构：奇数列比偶数列低半行，每个格子最多六个邻居。
//! 邻居关系在构造时一次性计算，之后不再改变，同尺寸的棋盘共享同一份图。

use crate::types::{BoardSize, Color, Direction, Position};
use lazy_static::lazy_static;
use std::sync::Arc;

lazy_static! {
    /// 每种尺寸一份预先构建的格子图
    static ref GRAPHS: Vec<Arc<CellGraph>> = BoardSize::ALL
        .iter()
        .map(|&size| Arc::new(CellGraph::build(size)))
        .collect();
}

/// 单个格子：坐标 + 六个方向的邻居
#[derive(Debug, Clone)]
pub struct Cell {
    pub position: Position,
    neighbors: [Option<Position>; 6],
}

impl Cell {
    #[inline]
    pub fn neighbor(&self, direction: Direction) -> Option<Position> {
        self.neighbors[direction.index()]
    }
}

/// 格子图（按行优先顺序存储的格子数组）
#[derive(Debug)]
pub struct CellGraph {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl CellGraph {
    /// 获取共享的格子图
    pub fn shared(size: BoardSize) -> Arc<CellGraph> {
        let index = BoardSize::ALL
            .iter()
            .position(|&s| s == size)
            .unwrap_or_default();
        Arc::clone(&GRAPHS[index])
    }

    /// 构建格子图
    pub fn build(size: BoardSize) -> CellGraph {
        let (rows, cols) = (size.rows(), size.cols());
        let mut cells = Vec::with_capacity(size.cells());

        for row in 1..=rows {
            for col in 1..=cols {
                let at = |r: u8, c: u8| {
                    let p = Position::new(r, c);
                    // r、c 为 0 时同样落在棋盘外
                    if p.is_on(size) {
                        Some(p)
                    } else {
                        None
                    }
                };
                let (up, down) = (row + 1, row.wrapping_sub(1));
                let (left, right) = (col.wrapping_sub(1), col + 1);

                let mut neighbors = [None; 6];
                neighbors[Direction::TopMiddle.index()] = at(up, col);
                neighbors[Direction::BottomMiddle.index()] = at(down, col);
                if col % 2 == 1 {
                    neighbors[Direction::TopLeft.index()] = at(row, left);
                    neighbors[Direction::TopRight.index()] = at(row, right);
                    neighbors[Direction::BottomLeft.index()] = at(down, left);
                    neighbors[Direction::BottomRight.index()] = at(down, right);
                } else {
                    neighbors[Direction::TopLeft.index()] = at(up, left);
                    neighbors[Direction::TopRight.index()] = at(up, right);
                    neighbors[Direction::BottomLeft.index()] = at(row, left);
                    neighbors[Direction::BottomRight.index()] = at(row, right);
                }

                cells.push(Cell {
                    position: Position::new(row, col),
                    neighbors,
                });
            }
        }

        CellGraph { size, cells }
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// 位置 → 数组下标（调用方保证位置在棋盘内）
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        (pos.row as usize - 1) * self.size.cols() as usize + (pos.col as usize - 1)
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_on(self.size)
    }

    /// 按格子名查找
    pub fn find(&self, name: &str) -> Option<Position> {
        Position::from_name(name).filter(|&p| self.contains(p))
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if self.contains(pos) {
            Some(&self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// 指定方向的相邻格子，棋盘边缘返回 None
    #[inline]
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        self.cell(pos).and_then(|c| c.neighbor(direction))
    }

    /// 全部格子（行优先：a1, b1, ..., a2, ...）
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// 是否为该阵营的升变格
    ///
    /// A 方在最后一行的偶数列升变，B 方在第一行的奇数列升变
    pub fn is_promotion_cell(&self, pos: Position, color: Color) -> bool {
        match color {
            Color::A => pos.row == self.size.rows() && pos.col % 2 == 0,
            Color::B => pos.row == 1 && pos.col % 2 == 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 按 TM, TR, BR, BM, BL, TL 顺序拼接邻居名，缺失的用两个空格
    fn siblings(graph: &CellGraph, name: &str) -> String {
        let pos = graph.find(name).unwrap();
        [
            Direction::TopMiddle,
            Direction::TopRight,
            Direction::BottomRight,
            Direction::BottomMiddle,
            Direction::BottomLeft,
            Direction::TopLeft,
        ]
        .iter()
        .map(|&d| match graph.neighbor(pos, d) {
            Some(p) => p.name(),
            None => "  ".to_string(),
        })
        .collect()
    }

    #[test]
    fn test_linking_6x6() {
        let graph = CellGraph::build(BoardSize::Size6x6);
        assert_eq!(siblings(&graph, "a1"), "a2b1        ");
        assert_eq!(siblings(&graph, "b1"), "b2c2c1  a1a2");
        assert_eq!(siblings(&graph, "f1"), "f2      e1e2");
        assert_eq!(siblings(&graph, "b2"), "b3c3c2b1a2a3");
        assert_eq!(siblings(&graph, "a6"), "  b6b5a5    ");
        assert_eq!(siblings(&graph, "b6"), "    c6b5a6  ");
        assert_eq!(siblings(&graph, "f6"), "      f5e6  ");
    }

    #[test]
    fn test_linking_10x10() {
        let graph = CellGraph::build(BoardSize::Size10x10);
        assert_eq!(siblings(&graph, "j9"), "j10    j8i9i10");
        assert_eq!(siblings(&graph, "c10"), "  d10d9c9b9b10");
        assert_eq!(siblings(&graph, "b9"), "b10c10c9b8a9a10");
    }

    #[test]
    fn test_linking_other_sizes() {
        let graph = CellGraph::build(BoardSize::Size6x8);
        assert_eq!(siblings(&graph, "a8"), "  b8b7a7    ");
        assert_eq!(siblings(&graph, "b8"), "    c8b7a8  ");
        assert_eq!(siblings(&graph, "f8"), "      f7e8  ");
        assert_eq!(siblings(&graph, "f1"), "f2      e1e2");
        assert_eq!(siblings(&graph, "e7"), "e8f7f6e6d6d7");

        let graph = CellGraph::build(BoardSize::Size8x6);
        assert_eq!(siblings(&graph, "a1"), "a2b1        ");
        assert_eq!(siblings(&graph, "g6"), "  h6h5g5f5f6");
        assert_eq!(siblings(&graph, "h6"), "      h5g6  ");
        assert_eq!(siblings(&graph, "h1"), "h2      g1g2");

        let graph = CellGraph::build(BoardSize::Size8x8);
        assert_eq!(siblings(&graph, "b8"), "    c8b7a8  ");
        assert_eq!(siblings(&graph, "g1"), "g2h1      f1");
        assert_eq!(siblings(&graph, "h8"), "      h7g8  ");
        assert_eq!(siblings(&graph, "h4"), "h5    h3g4g5");

        let graph = CellGraph::build(BoardSize::Size8x10);
        assert_eq!(siblings(&graph, "a10"), "  b10b9a9    ");
        assert_eq!(siblings(&graph, "b10"), "    c10b9a10  ");
        assert_eq!(siblings(&graph, "h10"), "      h9g10  ");
        assert_eq!(siblings(&graph, "g9"), "g10h9h8g8f8f9");

        let graph = CellGraph::build(BoardSize::Size10x8);
        assert_eq!(siblings(&graph, "i8"), "  j8j7i7h7h8");
        assert_eq!(siblings(&graph, "j8"), "      j7i8  ");
        assert_eq!(siblings(&graph, "j1"), "j2      i1i2");
        assert_eq!(siblings(&graph, "a8"), "  b8b7a7    ");
    }

    #[test]
    fn test_promotion_rows_all_sizes() {
        for size in BoardSize::ALL {
            let graph = CellGraph::shared(size);
            let (rows, cols) = (size.rows(), size.cols());
            for col in 1..=cols {
                let top = Position::new(rows, col);
                let bottom = Position::new(1, col);
                assert_eq!(graph.is_promotion_cell(top, Color::A), col % 2 == 0, "{} {}", size, top);
                assert_eq!(graph.is_promotion_cell(bottom, Color::B), col % 2 == 1, "{} {}", size, bottom);
                assert!(!graph.is_promotion_cell(bottom, Color::A));
                assert!(!graph.is_promotion_cell(top, Color::B));
            }
        }
    }

    #[test]
    fn test_links_are_symmetric() {
        for size in BoardSize::ALL {
            let graph = CellGraph::shared(size);
            assert_eq!(graph.cells().len(), size.cells());
            for cell in graph.cells() {
                for d in Direction::ALL {
                    if let Some(n) = cell.neighbor(d) {
                        assert_eq!(graph.neighbor(n, d.opposite()), Some(cell.position));
                    }
                }
            }
        }
    }

    #[test]
    fn test_neighbor_direction_matches_geometry() {
        for size in BoardSize::ALL {
            let graph = CellGraph::shared(size);
            for cell in graph.cells() {
                for d in Direction::ALL {
                    if let Some(n) = cell.neighbor(d) {
                        assert_eq!(Direction::between(cell.position, n), Some(d));
                    }
                }
            }
        }
    }

    #[test]
    fn test_find() {
        let graph = CellGraph::shared(BoardSize::Size6x8);
        assert!(graph.find("f8").is_some());
        assert!(graph.find("g8").is_none());
        assert!(graph.find("a9").is_none());
        assert_eq!(graph.index(graph.find("a2").unwrap()), 6);
    }

    #[test]
    fn test_promotion_cells() {
        let graph = CellGraph::shared(BoardSize::Size6x6);
        assert!(graph.is_promotion_cell(Position::new(6, 2), Color::A));
        assert!(!graph.is_promotion_cell(Position::new(6, 1), Color::A));
        assert!(graph.is_promotion_cell(Position::new(1, 1), Color::B));
        assert!(!graph.is_promotion_cell(Position::new(1, 2), Color::B));
    }
}
