// Route model for walked paths through the store grid

use crate::models::Cell;
use serde::Serialize;

/// Ordered sequence of cells, one per grid move, starting at the start cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub cells: Vec<Cell>,
}

impl Route {
    /// A route that stays on a single cell
    pub fn single(cell: Cell) -> Self {
        Self { cells: vec![cell] }
    }

    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Number of grid steps walked
    pub fn distance(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Appends a segment that starts where this route ends, without
    /// duplicating the shared cell. Returns the number of steps added.
    pub fn extend_with(&mut self, segment: &Route) -> usize {
        if segment.cells.len() <= 1 {
            return 0;
        }
        self.cells.extend_from_slice(&segment.cells[1..]);
        segment.distance()
    }

    /// Checks that consecutive cells are exactly one move apart
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_adjacent_to(&w[1]))
    }
}
