// Budget recommendations: exact, slightly above and slightly below

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::algorithms::annealing::BasketOptimizer;
use crate::algorithms::budget::BudgetAdjuster;
use crate::error::{PlannerError, Result};
use crate::models::{Basket, Catalog, ConsolidatedLine, Price};

/// Budget multipliers for the off-target variants
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecommendationConfig {
    /// Target of the upper variant relative to the budget (default: 1.03)
    #[serde(default = "default_upper_factor")]
    pub upper_factor: f64,

    /// Target of the lower variant relative to the budget (default: 0.97)
    #[serde(default = "default_lower_factor")]
    pub lower_factor: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            upper_factor: default_upper_factor(),
            lower_factor: default_lower_factor(),
        }
    }
}

fn default_upper_factor() -> f64 {
    1.03
}
fn default_lower_factor() -> f64 {
    0.97
}

impl RecommendationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.upper_factor.is_finite() && self.upper_factor >= 1.0) {
            return Err(PlannerError::Configuration(format!(
                "upper_factor must be at least 1, got {}",
                self.upper_factor
            )));
        }
        if !(self.lower_factor > 0.0 && self.lower_factor <= 1.0) {
            return Err(PlannerError::Configuration(format!(
                "lower_factor must be in (0, 1], got {}",
                self.lower_factor
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Exact,
    Upper,
    Lower,
}

/// One basket proposal, reported against the shopper's budget
#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    pub variant: Variant,
    pub lines: Vec<ConsolidatedLine>,
    pub total: Price,
    /// `total - budget`, rounded to cents
    pub difference: Price,
    pub percent_difference: f64,
    pub item_count: u32,
    pub distinct_count: usize,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RecommendationSet {
    pub budget: Price,
    pub preferred_categories: Vec<String>,
    pub exact: Recommendation,
    pub upper: Recommendation,
    pub lower: Recommendation,
}

impl RecommendationSet {
    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        [&self.exact, &self.upper, &self.lower].into_iter()
    }
}

/// Runs the optimizer once per variant and formats the results
#[derive(Clone, Debug)]
pub struct Recommender {
    optimizer: BasketOptimizer,
    adjuster: BudgetAdjuster,
    config: RecommendationConfig,
}

impl Default for Recommender {
    fn default() -> Self {
        Self {
            optimizer: BasketOptimizer::with_defaults(),
            adjuster: BudgetAdjuster::default(),
            config: RecommendationConfig::default(),
        }
    }
}

impl Recommender {
    pub fn new(
        optimizer: BasketOptimizer,
        adjuster: BudgetAdjuster,
        config: RecommendationConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            optimizer,
            adjuster,
            config,
        })
    }

    /// Builds the three variants for `budget`
    ///
    /// Variant `i` draws from `StdRng::seed_from_u64(seed + i)`, so the
    /// result does not depend on how rayon schedules the work.
    pub fn recommend(
        &self,
        catalog: &Catalog,
        budget: Price,
        preferred_categories: &[String],
        seed: u64,
    ) -> Result<RecommendationSet> {
        if !(budget.is_finite() && budget > 0.0) {
            return Err(PlannerError::Configuration(format!(
                "budget must be a positive amount, got {}",
                budget
            )));
        }
        if catalog.is_empty() {
            return Err(PlannerError::EmptyCatalog);
        }

        let run = |index: u64, variant: Variant| -> Result<Recommendation> {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index));
            let basket =
                self.build_variant(variant, catalog, budget, preferred_categories, &mut rng)?;
            Ok(Self::describe(variant, &basket, budget))
        };

        let (exact, (upper, lower)) = rayon::join(
            || run(0, Variant::Exact),
            || rayon::join(|| run(1, Variant::Upper), || run(2, Variant::Lower)),
        );
        let (exact, upper, lower) = (exact?, upper?, lower?);

        info!(
            "Recommendations for budget {:.2}: exact {:.2}, upper {:.2}, lower {:.2}",
            budget, exact.total, upper.total, lower.total
        );

        Ok(RecommendationSet {
            budget,
            preferred_categories: preferred_categories.to_vec(),
            exact,
            upper,
            lower,
        })
    }

    fn build_variant(
        &self,
        variant: Variant,
        catalog: &Catalog,
        budget: Price,
        preferred_categories: &[String],
        rng: &mut StdRng,
    ) -> Result<Basket> {
        match variant {
            Variant::Exact => {
                let basket = self
                    .optimizer
                    .optimize(catalog, budget, preferred_categories, rng)?;
                Ok(self.adjuster.adjust(&basket, budget, catalog))
            }
            Variant::Upper => {
                let target = budget * self.config.upper_factor;
                self.optimizer
                    .optimize(catalog, target, preferred_categories, rng)
            }
            Variant::Lower => {
                let target = budget * self.config.lower_factor;
                self.optimizer
                    .optimize(catalog, target, preferred_categories, rng)
            }
        }
    }

    fn describe(variant: Variant, basket: &Basket, budget: Price) -> Recommendation {
        let total = round_cents(basket.total_cost());
        let difference = round_cents(total - budget);
        let shown = difference.abs();

        let message = match variant {
            Variant::Exact => format!("Basket adjusted to your budget (difference: {:.2})", shown),
            Variant::Upper if difference > 0.0 => {
                format!("You need {:.2} more to complete this basket", shown)
            }
            Variant::Upper => "Basket slightly above your budget".to_string(),
            Variant::Lower if difference < 0.0 => format!("You will have {:.2} left over", shown),
            Variant::Lower => "Basket adjusted below your budget".to_string(),
        };

        let lines = basket
            .consolidate()
            .into_iter()
            .map(|line| ConsolidatedLine {
                subtotal: round_cents(line.subtotal),
                ..line
            })
            .collect();

        Recommendation {
            variant,
            lines,
            total,
            difference,
            percent_difference: round_cents(difference / budget * 100.0),
            item_count: basket.total_item_count(),
            distinct_count: basket.distinct_item_count(),
            message,
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
