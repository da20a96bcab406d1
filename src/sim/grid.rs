//! Board geometry
//!
//! Cells are addressed by the pixel coordinate of their top-left corner, so a
//! valid cell position is always a multiple of the cell size.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A cell position in pixels (top-left corner)
pub type Cell = IVec2;

/// Travel direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True when `self` would turn the snake straight back onto `other`
    #[inline]
    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step in cell units (screen coordinates, y grows downward)
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Board dimensions and cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            cell_size: cell_size.max(1),
        }
    }

    pub fn cols(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Pixel position of the cell at (col, row)
    #[inline]
    pub fn cell_at(&self, col: i32, row: i32) -> Cell {
        IVec2::new(col * self.cell_size, row * self.cell_size)
    }

    /// Whether a cell lies inside `[0, width) x [0, height)`
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// The neighbouring cell one step in `dir` (may be off the board)
    #[inline]
    pub fn step(&self, cell: Cell, dir: Direction) -> Cell {
        cell + dir.unit() * self.cell_size
    }

    /// Pixels between the cell's edges and the nearest wall
    pub fn wall_gap(&self, cell: Cell) -> i32 {
        let left = cell.x;
        let top = cell.y;
        let right = self.width - (cell.x + self.cell_size);
        let bottom = self.height - (cell.y + self.cell_size);
        left.min(top).min(right).min(bottom)
    }
}

/// Manhattan distance in pixels
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    let d = a - b;
    d.x.abs() + d.y.abs()
}

/// Chebyshev distance in pixels
#[inline]
pub fn chebyshev(a: Cell, b: Cell) -> i32 {
    let d = a - b;
    d.x.abs().max(d.y.abs())
}
