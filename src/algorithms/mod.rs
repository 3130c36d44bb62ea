pub mod annealing;
pub mod astar;
pub mod budget;
pub mod cost_model;
pub mod multi_goal;

// Common algorithm traits
use crate::error::Result;
use crate::models::{Cell, Grid, Route};

/// Trait for single-pair grid pathfinders
pub trait Pathfinder {
    /// Find a walkable route from `start` to `goal`
    ///
    /// Fails with `InvalidEndpoint` when either cell is blocked or off the
    /// grid and with `NoRouteFound` when the goal is unreachable.
    fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Result<Route>;
}
