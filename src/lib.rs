// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod planning;
pub mod utils;

// Re-exports for convenience
pub use algorithms::annealing::{AnnealingConfig, BasketOptimizer};
pub use algorithms::astar::{find_path, AStarConfig, AStarPathfinder};
pub use algorithms::budget::{AdjusterConfig, BudgetAdjuster};
pub use algorithms::cost_model::CostModel;
pub use algorithms::multi_goal::{MultiGoalRoute, MultiGoalRouter};
pub use algorithms::Pathfinder;
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use models::{Basket, Catalog, CatalogItem, Cell, Grid, Route, StoreMap};
pub use planning::{Recommender, SessionStore, TripPlanner};
