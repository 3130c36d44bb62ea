// In-store trip planning: entrance, shelf stops, checkout

use std::collections::HashMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::algorithms::astar::{AStarConfig, AStarPathfinder};
use crate::algorithms::multi_goal::MultiGoalRouter;
use crate::algorithms::Pathfinder;
use crate::error::{PlannerError, Result};
use crate::models::{Basket, Cell, ItemId, Route, StoreMap};

/// Timing and lookup behaviour of the trip planner
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TripConfig {
    /// Walking time per grid step (default: 2)
    #[serde(default = "default_seconds_per_step")]
    pub seconds_per_step: u64,

    /// Time spent at each pickup stop (default: 10)
    #[serde(default = "default_seconds_per_pickup")]
    pub seconds_per_pickup: u64,

    /// Fail on items missing from the map instead of skipping them
    #[serde(default)]
    pub strict_item_lookup: bool,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            seconds_per_step: default_seconds_per_step(),
            seconds_per_pickup: default_seconds_per_pickup(),
            strict_item_lookup: false,
        }
    }
}

fn default_seconds_per_step() -> u64 {
    2
}
fn default_seconds_per_pickup() -> u64 {
    10
}

/// An item the shopper wants to collect
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u32,
}

/// One request per distinct basket item, in consolidated order
pub fn requests_from_basket(basket: &Basket) -> Vec<ItemRequest> {
    basket
        .consolidate()
        .into_iter()
        .map(|line| ItemRequest {
            item_id: line.id,
            name: line.name,
            quantity: line.quantity,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    Start,
    Advance,
    Pickup { items: Vec<ItemRequest> },
    Checkout,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripStep {
    pub index: usize,
    pub cell: Cell,
    #[serde(flatten)]
    pub action: StepAction,
}

/// Complete walking plan through the store
#[derive(Clone, Debug, Serialize)]
pub struct TripPlan {
    pub route: Route,
    pub steps: Vec<TripStep>,
    pub total_distance: usize,
    pub estimated_seconds: u64,
    pub estimated_time: String,

    /// Shelf cells in visiting order
    pub stops: Vec<Cell>,

    /// Requests collected along the way, in pickup order
    pub collected: Vec<ItemRequest>,

    /// Requests whose item has no location on the map
    pub unlocated: Vec<ItemRequest>,

    /// Requests whose shelf could not be reached
    pub unreachable: Vec<ItemRequest>,
}

/// Plans shopping trips over a store map
///
/// Stops are sequenced by [`MultiGoalRouter`]; the closing leg to the
/// checkout is a plain A* search.
#[derive(Clone, Debug, Default)]
pub struct TripPlanner {
    router: MultiGoalRouter<AStarPathfinder>,
    config: TripConfig,
}

impl TripPlanner {
    pub fn new(config: TripConfig, astar: AStarConfig) -> Self {
        Self {
            router: MultiGoalRouter::new(AStarPathfinder::new(astar)),
            config,
        }
    }

    pub fn config(&self) -> &TripConfig {
        &self.config
    }

    pub fn plan(&self, map: &StoreMap, requests: &[ItemRequest]) -> Result<TripPlan> {
        let grid = map.grid()?;

        // Group requests by shelf cell, keeping first-seen order
        let mut stop_order: Vec<Cell> = Vec::new();
        let mut by_stop: HashMap<Cell, Vec<ItemRequest>> = HashMap::new();
        let mut unlocated = Vec::new();

        for request in requests {
            match map.location_of(request.item_id) {
                Some(cell) => {
                    by_stop
                        .entry(cell)
                        .or_insert_with(|| {
                            stop_order.push(cell);
                            Vec::new()
                        })
                        .push(request.clone());
                }
                None if self.config.strict_item_lookup => {
                    return Err(PlannerError::UnknownItem(request.item_id));
                }
                None => {
                    warn!(
                        "Item {} ({}) is not on map '{}', skipping",
                        request.item_id, request.name, map.name
                    );
                    unlocated.push(request.clone());
                }
            }
        }

        let tour = self.router.route_through(map.entrance, &stop_order, &grid)?;

        let mut route = tour.route;
        let tour_end = route.end().unwrap_or(map.entrance);
        let checkout_leg = self
            .router
            .pathfinder()
            .find_path(&grid, tour_end, map.checkout)?;
        let total_distance = tour.total_distance + route.extend_with(&checkout_leg);

        let unreachable: Vec<ItemRequest> = tour
            .skipped
            .iter()
            .flat_map(|skipped| by_stop.get(&skipped.cell).cloned().unwrap_or_default())
            .collect();

        let mut pending: HashMap<Cell, Vec<ItemRequest>> = tour
            .visited
            .iter()
            .filter_map(|cell| by_stop.get(cell).map(|items| (*cell, items.clone())))
            .collect();

        let mut steps = Vec::with_capacity(route.cells.len());
        let mut collected = Vec::new();
        let last = route.cells.len().saturating_sub(1);

        for (index, &cell) in route.cells.iter().enumerate() {
            let pickup = pending.remove(&cell);
            if let Some(items) = &pickup {
                collected.extend(items.iter().cloned());
            }

            // A shelf on the checkout cell is emptied there, but the step
            // still reads as checkout
            let action = if index == last && cell == map.checkout {
                StepAction::Checkout
            } else if let Some(items) = pickup {
                StepAction::Pickup { items }
            } else if index == 0 {
                StepAction::Start
            } else {
                StepAction::Advance
            };
            steps.push(TripStep {
                index,
                cell,
                action,
            });
        }

        let estimated_seconds = self.config.seconds_per_step * total_distance as u64
            + self.config.seconds_per_pickup * tour.visited.len() as u64;

        info!(
            "Trip on '{}': {} stops, {} steps, {} unlocated, {} unreachable",
            map.name,
            tour.visited.len(),
            total_distance,
            unlocated.len(),
            unreachable.len()
        );

        Ok(TripPlan {
            route,
            steps,
            total_distance,
            estimated_seconds,
            estimated_time: format_duration(estimated_seconds),
            stops: tour.visited,
            collected,
            unlocated,
            unreachable,
        })
    }
}

/// "M min S s", or "S s" under a minute
pub fn format_duration(seconds: u64) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if minutes > 0 {
        format!("{} min {} s", minutes, rest)
    } else {
        format!("{} s", rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Zone;
    use std::collections::BTreeMap;

    fn request(item_id: ItemId, name: &str) -> ItemRequest {
        ItemRequest {
            item_id,
            name: name.to_string(),
            quantity: 1,
        }
    }

    fn create_test_map() -> StoreMap {
        let mut zones = BTreeMap::new();
        zones.insert(
            "bakery".to_string(),
            Zone {
                cell: Cell::new(0, 3),
                items: vec![1, 2],
            },
        );
        zones.insert(
            "dairy".to_string(),
            Zone {
                cell: Cell::new(3, 3),
                items: vec![3],
            },
        );
        StoreMap {
            name: "test".to_string(),
            rows: 5,
            cols: 5,
            entrance: Cell::new(0, 0),
            checkout: Cell::new(4, 0),
            zones,
            obstacles: vec![Cell::new(1, 1), Cell::new(2, 1)],
            corridors: Vec::new(),
        }
    }

    #[test]
    fn test_plan_ends_at_checkout() {
        let map = create_test_map();
        let requests = [request(3, "Milk"), request(1, "Bread")];

        let plan = TripPlanner::default().plan(&map, &requests).unwrap();

        assert_eq!(plan.route.start(), Some(map.entrance));
        assert_eq!(plan.route.end(), Some(map.checkout));
        assert!(plan.route.is_contiguous());
        assert_eq!(plan.steps.len(), plan.route.cells.len());
        assert_eq!(plan.total_distance, plan.route.distance());
        assert_eq!(plan.stops, vec![Cell::new(0, 3), Cell::new(3, 3)]);
        // 3 + 3 + 4 steps
        assert_eq!(plan.total_distance, 10);
        assert_eq!(plan.estimated_seconds, 40);
        assert_eq!(plan.estimated_time, "40 s");

        assert_eq!(plan.steps[0].action, StepAction::Start);
        assert_eq!(plan.steps.last().unwrap().action, StepAction::Checkout);
    }

    #[test]
    fn test_items_on_same_shelf_share_a_stop() {
        let map = create_test_map();
        let requests = [request(1, "Bread"), request(2, "Croissant")];

        let plan = TripPlanner::default().plan(&map, &requests).unwrap();

        let pickups: Vec<&TripStep> = plan
            .steps
            .iter()
            .filter(|s| matches!(s.action, StepAction::Pickup { .. }))
            .collect();
        assert_eq!(pickups.len(), 1);
        assert_eq!(pickups[0].cell, Cell::new(0, 3));
        assert_eq!(plan.collected.len(), 2);
    }

    #[test]
    fn test_unknown_item_is_listed() {
        let map = create_test_map();
        let requests = [request(1, "Bread"), request(99, "Caviar")];

        let plan = TripPlanner::default().plan(&map, &requests).unwrap();

        assert_eq!(plan.unlocated, vec![request(99, "Caviar")]);
        assert_eq!(plan.collected, vec![request(1, "Bread")]);
    }

    #[test]
    fn test_strict_lookup_fails_on_unknown_item() {
        let map = create_test_map();
        let planner = TripPlanner::new(
            TripConfig {
                strict_item_lookup: true,
                ..TripConfig::default()
            },
            AStarConfig::default(),
        );

        let result = planner.plan(&map, &[request(99, "Caviar")]);
        assert!(matches!(result, Err(PlannerError::UnknownItem(99))));
    }

    #[test]
    fn test_unreachable_shelf() {
        let mut map = create_test_map();
        // Wall off (0, 3)
        map.obstacles.extend([Cell::new(0, 2), Cell::new(1, 3), Cell::new(0, 4)]);

        let plan = TripPlanner::default()
            .plan(&map, &[request(1, "Bread"), request(3, "Milk")])
            .unwrap();

        assert_eq!(plan.unreachable, vec![request(1, "Bread")]);
        assert_eq!(plan.stops, vec![Cell::new(3, 3)]);
        assert_eq!(plan.route.end(), Some(map.checkout));
    }

    #[test]
    fn test_blocked_checkout_is_fatal() {
        let mut map = create_test_map();
        map.obstacles.extend([Cell::new(3, 0), Cell::new(4, 1)]);

        let result = TripPlanner::default().plan(&map, &[]);
        assert!(matches!(result, Err(PlannerError::NoRouteFound { .. })));
    }

    #[test]
    fn test_shelf_on_checkout_cell() {
        let mut zones = BTreeMap::new();
        zones.insert(
            "till".to_string(),
            Zone {
                cell: Cell::new(2, 2),
                items: vec![1],
            },
        );
        let map = StoreMap {
            name: "kiosk".to_string(),
            rows: 3,
            cols: 3,
            entrance: Cell::new(0, 0),
            checkout: Cell::new(2, 2),
            zones,
            obstacles: Vec::new(),
            corridors: Vec::new(),
        };

        let plan = TripPlanner::default()
            .plan(&map, &[request(1, "Gum")])
            .unwrap();

        assert_eq!(plan.total_distance, 4);
        assert_eq!(plan.steps.last().unwrap().action, StepAction::Checkout);
        assert_eq!(plan.collected, vec![request(1, "Gum")]);
        assert_eq!(plan.stops, vec![Cell::new(2, 2)]);
        assert!(plan
            .steps
            .iter()
            .all(|s| !matches!(s.action, StepAction::Pickup { .. })));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45 s");
        assert_eq!(format_duration(60), "1 min 0 s");
        assert_eq!(format_duration(135), "2 min 15 s");
    }
}
