// Planner configuration loaded from TOML

use std::path::Path;

use serde::Deserialize;

use crate::algorithms::annealing::{AnnealingConfig, BasketOptimizer};
use crate::algorithms::astar::AStarConfig;
use crate::algorithms::budget::{AdjusterConfig, BudgetAdjuster};
use crate::error::Result;
use crate::planning::{RecommendationConfig, Recommender, TripConfig, TripPlanner};

/// Top-level settings; every section and field falls back to its default
///
/// ```toml
/// [annealing]
/// initial_temperature = 500.0
/// cooling_factor = 0.9
///
/// [trip]
/// strict_item_lookup = true
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub astar: AStarConfig,

    #[serde(default)]
    pub annealing: AnnealingConfig,

    #[serde(default)]
    pub adjuster: AdjusterConfig,

    #[serde(default)]
    pub recommendations: RecommendationConfig,

    #[serde(default)]
    pub trip: TripConfig,
}

impl PlannerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: PlannerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.annealing.validate()?;
        self.recommendations.validate()
    }

    pub fn recommender(&self) -> Result<Recommender> {
        Recommender::new(
            BasketOptimizer::new(self.annealing.clone())?,
            BudgetAdjuster::new(self.adjuster.clone()),
            self.recommendations.clone(),
        )
    }

    pub fn trip_planner(&self) -> TripPlanner {
        TripPlanner::new(self.trip.clone(), self.astar.clone())
    }
}
