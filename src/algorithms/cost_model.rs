// Cost model scoring candidate baskets against a budget and preferences

use crate::models::{Basket, Cost, Price};
use serde::Serialize;
use std::collections::HashSet;

/// Quantity beyond `REALISM_FACTOR x typical` counts as unrealistic
const REALISM_FACTOR: u32 = 3;
const REALISM_PENALTY_PER_UNIT: f64 = 10.0;
const IMPORTANCE_SCALE: f64 = 50.0;
const MIN_DISTINCT_ITEMS: usize = 3;
const VARIETY_PENALTY_PER_MISSING: f64 = 30.0;
const CATEGORY_PENALTY_PER_MISSING: f64 = 25.0;

/// Weights applied to each penalty term
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostWeights {
    pub budget: f64,
    pub realism: f64,
    pub importance: f64,
    pub variety: f64,
    pub category: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            budget: 1.0,
            realism: 0.5,
            importance: 0.3,
            variety: 0.4,
            category: 0.6,
        }
    }
}

/// Unweighted penalty terms of one basket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub budget: f64,
    pub realism: f64,
    pub importance: f64,
    pub variety: f64,
    pub category: f64,
}

impl CostBreakdown {
    /// Weighted sum of the five terms
    pub fn weighted_total(&self, weights: &CostWeights) -> Cost {
        self.budget * weights.budget
            + self.realism * weights.realism
            + self.importance * weights.importance
            + self.variety * weights.variety
            + self.category * weights.category
    }
}

/// Scores baskets; lower is better
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    weights: CostWeights,
}

impl CostModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    /// Scalar cost of a basket. An empty basket is infinitely bad.
    pub fn score(
        &self,
        basket: &Basket,
        target_budget: Price,
        preferred_categories: &[String],
    ) -> Cost {
        match self.breakdown(basket, target_budget, preferred_categories) {
            Some(terms) => terms.weighted_total(&self.weights),
            None => f64::INFINITY,
        }
    }

    /// Raw penalty terms, or `None` for an empty basket
    pub fn breakdown(
        &self,
        basket: &Basket,
        target_budget: Price,
        preferred_categories: &[String],
    ) -> Option<CostBreakdown> {
        if basket.is_empty() {
            return None;
        }

        let deviation = basket.total_cost() - target_budget;
        let budget = deviation * deviation;

        let per_item = basket.quantities_by_item();

        let realism: f64 = per_item
            .iter()
            .map(|(item, quantity)| {
                let limit = item.typical_quantity.saturating_mul(REALISM_FACTOR);
                quantity.saturating_sub(limit) as f64 * REALISM_PENALTY_PER_UNIT
            })
            .sum();

        let total_units = basket.total_item_count();
        let weighted_importance: f64 = basket
            .lines()
            .iter()
            .map(|line| line.item.importance * line.quantity as f64)
            .sum();
        let mean_importance = if total_units > 0 {
            weighted_importance / total_units as f64
        } else {
            0.0
        };
        let importance = (1.0 - mean_importance) * IMPORTANCE_SCALE;

        let distinct = per_item.len();
        let variety = if distinct < MIN_DISTINCT_ITEMS {
            (MIN_DISTINCT_ITEMS - distinct) as f64 * VARIETY_PENALTY_PER_MISSING
        } else {
            0.0
        };

        let present: HashSet<&str> = basket
            .lines()
            .iter()
            .map(|line| line.item.category.as_str())
            .collect();
        let missing = preferred_categories
            .iter()
            .map(String::as_str)
            .collect::<HashSet<&str>>()
            .difference(&present)
            .count();
        let category = missing as f64 * CATEGORY_PENALTY_PER_MISSING;

        Some(CostBreakdown {
            budget,
            realism,
            importance,
            variety,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogItem;
    use std::sync::Arc;

    fn item(id: u32, price: f64, category: &str, importance: f64) -> Arc<CatalogItem> {
        Arc::new(
            CatalogItem::new(id, format!("Item {}", id), price, category)
                .with_importance(importance),
        )
    }

    fn categories(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_basket_is_worst() {
        let model = CostModel::new();
        assert_eq!(model.score(&Basket::new(), 50.0, &[]), f64::INFINITY);
    }

    #[test]
    fn test_budget_term_is_quadratic() {
        let model = CostModel::new();
        let mut basket = Basket::new();
        basket.push(item(1, 10.0, "a", 1.0), 1);
        basket.push(item(2, 10.0, "a", 1.0), 1);
        basket.push(item(3, 10.0, "a", 1.0), 1);

        let terms = model.breakdown(&basket, 25.0, &[]).unwrap();
        assert_eq!(terms.budget, 25.0);
        assert_eq!(terms.importance, 0.0);
        assert_eq!(terms.variety, 0.0);
        assert_eq!(model.score(&basket, 25.0, &[]), 25.0);
    }

    #[test]
    fn test_missing_category_contributes_fifteen() {
        let model = CostModel::new();
        let mut basket = Basket::new();
        basket.push(item(1, 10.0, "a", 1.0), 1);
        basket.push(item(2, 10.0, "a", 1.0), 1);
        basket.push(item(3, 10.0, "c", 1.0), 1);

        let preferred = categories(&["a", "b"]);
        let terms = model.breakdown(&basket, 30.0, &preferred).unwrap();

        assert_eq!(terms.category, 25.0);
        assert_eq!(terms.category * model.weights().category, 15.0);
        assert_eq!(model.score(&basket, 30.0, &preferred), 15.0);
    }

    #[test]
    fn test_realism_uses_accumulated_quantity() {
        let model = CostModel::new();
        let rice = Arc::new(CatalogItem::new(1, "Rice", 1.0, "grains").with_typical_quantity(2));

        // 4 + 4 units split across two lines: 8 against a limit of 6
        let mut basket = Basket::new();
        basket.push(Arc::clone(&rice), 4);
        basket.push(rice, 4);

        let terms = model.breakdown(&basket, 8.0, &[]).unwrap();
        assert_eq!(terms.realism, 20.0);
    }

    #[test]
    fn test_importance_and_variety() {
        let model = CostModel::new();
        let mut basket = Basket::new();
        basket.push(item(1, 5.0, "a", 1.0), 3);
        basket.push(item(2, 5.0, "a", 0.0), 1);

        let terms = model.breakdown(&basket, 20.0, &[]).unwrap();
        // Mean importance 0.75
        assert!((terms.importance - 12.5).abs() < 1e-9);
        assert_eq!(terms.variety, 30.0);
    }
}
