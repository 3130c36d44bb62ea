// Distance calculation utilities

use crate::models::Cell;

/// Manhattan distance between two cells
///
/// Admissible and consistent for four-directional unit-cost moves, so it is
/// both the A* heuristic and the greedy ordering key for multi-stop routes.
pub fn manhattan_distance(c1: &Cell, c2: &Cell) -> u32 {
    c1.manhattan_distance_to(c2)
}

/// Index of the cell closest to `from`; ties resolve to the earliest index
pub fn nearest_cell(from: &Cell, candidates: &[Cell]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, cell)| manhattan_distance(from, cell))
        .map(|(index, _)| index)
}
