// Grid model: store floor extent plus blocked cells

use crate::error::{PlannerError, Result};
use crate::models::Cell;
use std::collections::HashSet;

/// Rectangular store floor with obstacles
///
/// Obstacles outside the declared extent are rejected at construction
/// rather than clamped, so a malformed map fails before any search runs.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    cols: i32,
    obstacles: HashSet<Cell>,
}

impl Grid {
    /// Creates a grid of `rows x cols` cells with the given obstacles
    pub fn new<I>(rows: i32, cols: i32, obstacles: I) -> Result<Self>
    where
        I: IntoIterator<Item = Cell>,
    {
        if rows <= 0 || cols <= 0 {
            return Err(PlannerError::Configuration(format!(
                "grid extent must be positive, got {} x {}",
                rows, cols
            )));
        }

        let mut grid = Self {
            rows,
            cols,
            obstacles: HashSet::new(),
        };

        for cell in obstacles {
            if !grid.contains(&cell) {
                return Err(PlannerError::Configuration(format!(
                    "obstacle {} lies outside the {} x {} grid",
                    cell, rows, cols
                )));
            }
            grid.obstacles.insert(cell);
        }

        Ok(grid)
    }

    /// Creates a grid without obstacles
    pub fn open(rows: i32, cols: i32) -> Result<Self> {
        Self::new(rows, cols, std::iter::empty())
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of blocked cells
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Checks whether a cell lies inside the extent, ignoring obstacles
    pub fn contains(&self, cell: &Cell) -> bool {
        cell.row >= 0 && cell.row < self.rows && cell.col >= 0 && cell.col < self.cols
    }

    pub fn is_obstacle(&self, cell: &Cell) -> bool {
        self.obstacles.contains(cell)
    }

    /// A cell is valid when it is inside the extent and not blocked
    pub fn is_valid(&self, cell: &Cell) -> bool {
        self.contains(cell) && !self.is_obstacle(cell)
    }

    /// Valid orthogonal neighbours of a cell, in up, down, left, right order
    pub fn neighbors(&self, cell: &Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.orthogonal_neighbors()
            .into_iter()
            .filter(move |n| self.is_valid(n))
    }
}
