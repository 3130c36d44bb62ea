// Multi-stop routing: greedy nearest-goal sequencing over a pathfinder

use log::{debug, warn};

use crate::algorithms::astar::AStarPathfinder;
use crate::algorithms::Pathfinder;
use crate::error::{Endpoint, PlannerError, Result};
use crate::models::{Cell, Grid, Route};
use crate::utils::distance::nearest_cell;

/// A goal that could not be reached and was left out of the route
#[derive(Debug)]
pub struct SkippedGoal {
    pub cell: Cell,
    pub reason: PlannerError,
}

/// Result of routing through several goals
#[derive(Debug)]
pub struct MultiGoalRoute {
    /// Walked cells, starting at the start cell
    pub route: Route,

    /// Sum of per-segment step counts
    pub total_distance: usize,

    /// Goals reached, in visiting order
    pub visited: Vec<Cell>,

    /// Goals dropped because no path reached them
    pub skipped: Vec<SkippedGoal>,
}

/// Sequences goal cells with the nearest-unvisited-goal heuristic
///
/// Visit order is chosen by Manhattan distance only; the real walking path
/// of each leg comes from the pathfinder. This is not an optimal tour.
#[derive(Clone, Debug, Default)]
pub struct MultiGoalRouter<P = AStarPathfinder> {
    pathfinder: P,
}

impl MultiGoalRouter {
    /// Create a router over the default A* pathfinder.
    pub fn with_defaults() -> Self {
        Self::new(AStarPathfinder::with_defaults())
    }
}

impl<P: Pathfinder> MultiGoalRouter<P> {
    pub fn new(pathfinder: P) -> Self {
        Self { pathfinder }
    }

    pub fn pathfinder(&self) -> &P {
        &self.pathfinder
    }

    /// Routes from `start` through every reachable goal
    pub fn route_through(
        &self,
        start: Cell,
        goals: &[Cell],
        grid: &Grid,
    ) -> Result<MultiGoalRoute> {
        if !grid.is_valid(&start) {
            return Err(PlannerError::InvalidEndpoint {
                endpoint: Endpoint::Start,
                cell: start,
            });
        }

        let mut remaining: Vec<Cell> = Vec::with_capacity(goals.len());
        for goal in goals {
            if !remaining.contains(goal) {
                remaining.push(*goal);
            }
        }

        let mut route = Route::single(start);
        let mut total_distance = 0;
        let mut visited = Vec::new();
        let mut skipped = Vec::new();
        let mut current = start;

        while let Some(index) = nearest_cell(&current, &remaining) {
            let goal = remaining.remove(index);

            match self.pathfinder.find_path(grid, current, goal) {
                Ok(segment) => {
                    total_distance += route.extend_with(&segment);
                    visited.push(goal);
                    current = goal;
                }
                Err(reason) => {
                    warn!("Skipping unreachable stop {}: {}", goal, reason);
                    skipped.push(SkippedGoal { cell: goal, reason });
                }
            }
        }

        debug!(
            "Routed through {} of {} stops in {} steps",
            visited.len(),
            visited.len() + skipped.len(),
            total_distance
        );

        Ok(MultiGoalRoute {
            route,
            total_distance,
            visited,
            skipped,
        })
    }
}
