// A* shortest paths on the store grid

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use priority_queue::PriorityQueue;
use serde::Deserialize;

use crate::algorithms::Pathfinder;
use crate::error::{Endpoint, PlannerError, Result};
use crate::models::{Cell, Grid, Route};
use crate::utils::distance::manhattan_distance;

/// Configuration for the A* search.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AStarConfig {
    /// Stop after expanding this many cells; `None` searches until the
    /// frontier is exhausted
    pub max_expansions: Option<usize>,
}

/// Frontier priority: lower f first, then earlier insertion first.
type FrontierKey = Reverse<(u32, u64)>;

/// A* grid pathfinder.
///
/// Four-directional unit-cost moves under the Manhattan heuristic, so route
/// length equals the true shortest distance. Frontier ties on f-score go to
/// the earlier insertion, which makes repeated searches identical.
#[derive(Clone, Debug, Default)]
pub struct AStarPathfinder {
    config: AStarConfig,
}

impl AStarPathfinder {
    pub fn new(config: AStarConfig) -> Self {
        Self { config }
    }

    /// Create a pathfinder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AStarConfig::default())
    }

    fn search(&self, grid: &Grid, start: Cell, goal: Cell) -> Result<Route> {
        let mut frontier: PriorityQueue<Cell, FrontierKey> = PriorityQueue::new();
        let mut g_score: HashMap<Cell, u32> = HashMap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut closed: HashSet<Cell> = HashSet::new();
        let mut sequence: u64 = 0;

        g_score.insert(start, 0);
        frontier.push(start, Reverse((manhattan_distance(&start, &goal), sequence)));

        while let Some((current, _)) = frontier.pop() {
            if current == goal {
                debug!(
                    "A* reached {} from {} after expanding {} cells",
                    goal,
                    start,
                    closed.len()
                );
                return Ok(Self::reconstruct_path(&came_from, start, goal));
            }

            if !closed.insert(current) {
                continue;
            }

            if let Some(limit) = self.config.max_expansions {
                if closed.len() > limit {
                    warn!(
                        "A* gave up between {} and {} after {} expansions",
                        start, goal, limit
                    );
                    break;
                }
            }

            let current_g = g_score[&current];

            for neighbor in grid.neighbors(&current) {
                if closed.contains(&neighbor) {
                    continue;
                }

                let tentative_g = current_g + 1;
                let is_better = match g_score.get(&neighbor) {
                    Some(&known) => tentative_g < known,
                    None => true,
                };

                if is_better {
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);

                    sequence += 1;
                    let f = tentative_g + manhattan_distance(&neighbor, &goal);
                    // Replaces the priority of a cell that is already queued
                    frontier.push(neighbor, Reverse((f, sequence)));
                }
            }
        }

        Err(PlannerError::NoRouteFound { start, goal })
    }

    fn reconstruct_path(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Route {
        let mut cells = vec![goal];
        let mut current = goal;

        while current != start {
            match came_from.get(&current) {
                Some(&previous) => {
                    cells.push(previous);
                    current = previous;
                }
                None => break,
            }
        }

        cells.reverse();
        Route::from_cells(cells)
    }
}

impl Pathfinder for AStarPathfinder {
    fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Result<Route> {
        if !grid.is_valid(&start) {
            return Err(PlannerError::InvalidEndpoint {
                endpoint: Endpoint::Start,
                cell: start,
            });
        }
        if !grid.is_valid(&goal) {
            return Err(PlannerError::InvalidEndpoint {
                endpoint: Endpoint::Goal,
                cell: goal,
            });
        }

        if start == goal {
            return Ok(Route::single(start));
        }

        self.search(grid, start, goal)
    }
}

/// Shortest route between two cells with the default A* configuration.
pub fn find_path(start: Cell, goal: Cell, grid: &Grid) -> Result<Route> {
    AStarPathfinder::with_defaults().find_path(grid, start, goal)
}
