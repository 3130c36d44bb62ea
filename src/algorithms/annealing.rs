// Simulated annealing over basket states

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::algorithms::cost_model::CostModel;
use crate::error::{PlannerError, Result};
use crate::models::{Basket, Catalog, Cost, Price};

/// Number of high-importance items considered for the initial basket
const SEED_CANDIDATES: usize = 5;
const SEED_INCLUSION_PROBABILITY: f64 = 0.5;
const MAX_QUANTITY_DELTA: i64 = 2;

/// Tuning of the annealing schedule.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnnealingConfig {
    /// Starting temperature (default: 1000)
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,

    /// Search halts once the temperature drops to this value (default: 1)
    #[serde(default = "default_min_temperature")]
    pub min_temperature: f64,

    /// Geometric decay factor applied after each level (default: 0.95)
    #[serde(default = "default_cooling_factor")]
    pub cooling_factor: f64,

    /// Moves tried at each temperature level (default: 100)
    #[serde(default = "default_iterations_per_temperature")]
    pub iterations_per_temperature: usize,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: default_initial_temperature(),
            min_temperature: default_min_temperature(),
            cooling_factor: default_cooling_factor(),
            iterations_per_temperature: default_iterations_per_temperature(),
        }
    }
}

fn default_initial_temperature() -> f64 {
    1000.0
}
fn default_min_temperature() -> f64 {
    1.0
}
fn default_cooling_factor() -> f64 {
    0.95
}
fn default_iterations_per_temperature() -> usize {
    100
}

impl AnnealingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_temperature > 0.0) {
            return Err(PlannerError::Configuration(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            )));
        }
        if !(self.initial_temperature > self.min_temperature) {
            return Err(PlannerError::Configuration(format!(
                "initial_temperature {} must exceed min_temperature {}",
                self.initial_temperature, self.min_temperature
            )));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(PlannerError::Configuration(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(PlannerError::Configuration(
                "iterations_per_temperature must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Neighbour moves, drawn uniformly once per iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Append a random item at quantity `1..=2 x typical`
    Add,
    /// Drop a random line, only when more than one line exists
    Remove,
    /// Shift a random line's quantity by `-2..=2`, floored at 1
    Modify,
    /// Swap a random line's item for a random catalog item
    Replace,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Add, Move::Remove, Move::Modify, Move::Replace];

    /// Draws one move uniformly at random
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Move {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Produces a neighbour of `basket`; the input is left untouched.
    ///
    /// An empty basket always grows by one line regardless of the move.
    pub fn apply<R: Rng + ?Sized>(
        self,
        basket: &Basket,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Basket {
        let mut next = basket.clone();

        if self == Move::Add || next.is_empty() {
            if let Some(item) = catalog.items().choose(rng) {
                let max_quantity = item.typical_quantity.saturating_mul(2).max(1);
                let quantity = rng.gen_range(1..=max_quantity);
                next.push(item.clone(), quantity);
            }
            return next;
        }

        match self {
            Move::Add => {}
            Move::Remove => {
                if next.len() > 1 {
                    let index = rng.gen_range(0..next.len());
                    next.remove_line(index);
                }
            }
            Move::Modify => {
                let index = rng.gen_range(0..next.len());
                let delta = rng.gen_range(-MAX_QUANTITY_DELTA..=MAX_QUANTITY_DELTA);
                let current = next.lines()[index].quantity as i64;
                let quantity = (current + delta).max(1);
                next.set_quantity(index, quantity as u32);
            }
            Move::Replace => {
                let index = rng.gen_range(0..next.len());
                if let Some(item) = catalog.items().choose(rng) {
                    next.replace_item(index, item.clone());
                }
            }
        }

        next
    }
}

/// A basket together with its score
#[derive(Clone, Debug)]
pub struct OptimizerState {
    pub basket: Basket,
    pub cost: Cost,
}

/// Result of one annealing run
#[derive(Clone, Debug)]
pub struct AnnealingOutcome {
    /// Best basket seen during the run
    pub best: OptimizerState,

    /// Cost of the randomly seeded starting basket
    pub initial_cost: Cost,

    pub iterations: usize,
    pub accepted_moves: usize,
    pub temperature_levels: usize,
}

/// Simulated annealing basket optimizer
///
/// Worse neighbours are accepted with probability `exp(-delta / T)` and the
/// temperature decays geometrically. The best basket seen is returned, not
/// the last one. All randomness comes from the caller's RNG.
#[derive(Clone, Debug)]
pub struct BasketOptimizer {
    config: AnnealingConfig,
    cost_model: CostModel,
}

impl BasketOptimizer {
    /// Creates an optimizer, rejecting schedules that would not terminate
    pub fn new(config: AnnealingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cost_model: CostModel::new(),
        })
    }

    /// Create an optimizer with the default schedule
    pub fn with_defaults() -> Self {
        Self {
            config: AnnealingConfig::default(),
            cost_model: CostModel::new(),
        }
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Best basket found for the budget and preferred categories
    pub fn optimize<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        target_budget: Price,
        preferred_categories: &[String],
        rng: &mut R,
    ) -> Result<Basket> {
        self.run(catalog, target_budget, preferred_categories, rng)
            .map(|outcome| outcome.best.basket)
    }

    /// Runs the full schedule and reports search statistics
    pub fn run<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        target_budget: Price,
        preferred_categories: &[String],
        rng: &mut R,
    ) -> Result<AnnealingOutcome> {
        if catalog.is_empty() {
            return Err(PlannerError::EmptyCatalog);
        }

        let initial = self.initial_basket(catalog, rng);
        let initial_cost = self.cost_model.score(&initial, target_budget, preferred_categories);

        let mut current = OptimizerState {
            basket: initial,
            cost: initial_cost,
        };
        let mut best = current.clone();

        let mut temperature = self.config.initial_temperature;
        let mut iterations = 0;
        let mut accepted_moves = 0;
        let mut temperature_levels = 0;

        while temperature > self.config.min_temperature {
            for _ in 0..self.config.iterations_per_temperature {
                iterations += 1;

                let neighbor = Move::draw(rng).apply(&current.basket, catalog, rng);
                let neighbor_cost = self
                    .cost_model
                    .score(&neighbor, target_budget, preferred_categories);
                let delta = neighbor_cost - current.cost;

                let accept = if delta < 0.0 {
                    true
                } else {
                    let probability = (-delta / temperature).exp();
                    // NaN never compares below a sample, so it is rejected
                    rng.gen::<f64>() < probability
                };

                if accept {
                    accepted_moves += 1;
                    current = OptimizerState {
                        basket: neighbor,
                        cost: neighbor_cost,
                    };
                    if current.cost < best.cost {
                        best = current.clone();
                    }
                }
            }

            temperature *= self.config.cooling_factor;
            temperature_levels += 1;
        }

        debug!(
            "Annealing finished: budget {:.2}, best cost {:.3} (initial {:.3}), {} of {} moves accepted over {} levels",
            target_budget, best.cost, initial_cost, accepted_moves, iterations, temperature_levels
        );

        Ok(AnnealingOutcome {
            best,
            initial_cost,
            iterations,
            accepted_moves,
            temperature_levels,
        })
    }

    /// Starting basket: each of the most important items joins with
    /// probability one half, at quantity `1..=typical`
    fn initial_basket<R: Rng + ?Sized>(&self, catalog: &Catalog, rng: &mut R) -> Basket {
        let mut basket = Basket::new();
        for item in catalog.most_important(SEED_CANDIDATES) {
            if rng.gen_bool(SEED_INCLUSION_PROBABILITY) {
                let quantity = rng.gen_range(1..=item.typical_quantity.max(1));
                basket.push(item, quantity);
            }
        }
        basket
    }
}
