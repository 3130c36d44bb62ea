// Budget adjuster: local search nudging a basket toward an exact total

use std::sync::Arc;

use log::debug;
use serde::Deserialize;

use crate::models::{Basket, Catalog, CatalogItem, Price};

/// Configuration for budget tightening
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdjusterConfig {
    /// Accepted distance between basket total and budget (default: 0.5)
    #[serde(default = "default_tolerance")]
    pub tolerance: Price,

    /// Upper bound on adjustment steps (default: 50)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for AdjusterConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_tolerance() -> Price {
    0.5
}
fn default_max_iterations() -> usize {
    50
}

/// Best-effort refinement after annealing
///
/// Under budget it adds one unit of the item whose price best fills the
/// headroom; over budget it trims the line with the largest subtotal. Each
/// accepted step strictly shrinks the distance to the budget.
#[derive(Clone, Debug, Default)]
pub struct BudgetAdjuster {
    config: AdjusterConfig,
}

impl BudgetAdjuster {
    pub fn new(config: AdjusterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AdjusterConfig {
        &self.config
    }

    /// Tightens with the configured tolerance
    pub fn adjust(&self, basket: &Basket, target_budget: Price, catalog: &Catalog) -> Basket {
        self.tighten(basket, target_budget, catalog, self.config.tolerance)
    }

    pub fn tighten(
        &self,
        basket: &Basket,
        target_budget: Price,
        catalog: &Catalog,
        tolerance: Price,
    ) -> Basket {
        let mut adjusted = basket.clone();
        let mut total = adjusted.total_cost();
        let mut steps = 0;

        while (total - target_budget).abs() > tolerance && steps < self.config.max_iterations {
            steps += 1;

            if total < target_budget {
                let headroom = target_budget - total;
                let Some(item) = Self::best_filler(catalog, headroom) else {
                    break;
                };
                total += item.price;
                adjusted.push(item, 1);
            } else {
                let Some(index) = Self::largest_line(&adjusted) else {
                    break;
                };
                let line = &adjusted.lines()[index];
                let unit_price = line.item.price;
                let excess = total - target_budget;

                // Dropping a unit worth more than twice the excess would
                // overshoot further below the budget than we are above it
                if !(unit_price > 0.0 && (excess - unit_price).abs() < excess) {
                    break;
                }

                let quantity = line.quantity;
                adjusted.set_quantity(index, quantity - 1);
                total -= unit_price;
            }
        }

        debug!(
            "Budget adjustment: {:.2} -> {:.2} (target {:.2}) in {} steps",
            basket.total_cost(),
            total,
            target_budget,
            steps
        );

        adjusted
    }

    /// Priced item closest to the headroom without exceeding it; the first
    /// in catalog order wins ties
    fn best_filler(catalog: &Catalog, headroom: Price) -> Option<Arc<CatalogItem>> {
        let mut best: Option<&Arc<CatalogItem>> = None;
        for item in catalog.items() {
            if item.price <= 0.0 || item.price > headroom {
                continue;
            }
            let closer = match best {
                Some(current) => (headroom - item.price) < (headroom - current.price),
                None => true,
            };
            if closer {
                best = Some(item);
            }
        }
        best.cloned()
    }

    /// Index of the line with the highest subtotal; the first wins ties
    fn largest_line(basket: &Basket) -> Option<usize> {
        let mut best: Option<(usize, Price)> = None;
        for (index, line) in basket.lines().iter().enumerate() {
            let subtotal = line.subtotal();
            if best.map_or(true, |(_, top)| subtotal > top) {
                best = Some((index, subtotal));
            }
        }
        best.map(|(index, _)| index)
    }
}
