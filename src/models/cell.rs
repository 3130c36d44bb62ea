// Cell model representing a discrete grid coordinate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a grid coordinate as (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Creates a new cell at the given row and column
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells
    pub fn manhattan_distance_to(&self, other: &Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The four orthogonal neighbours in up, down, left, right order
    pub fn orthogonal_neighbors(&self) -> [Cell; 4] {
        [
            Cell::new(self.row - 1, self.col),
            Cell::new(self.row + 1, self.col),
            Cell::new(self.row, self.col - 1),
            Cell::new(self.row, self.col + 1),
        ]
    }

    /// Checks whether two cells are one grid move apart
    pub fn is_adjacent_to(&self, other: &Cell) -> bool {
        self.manhattan_distance_to(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
