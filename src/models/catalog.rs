// Catalog model representing the priced items a store sells

use crate::error::{PlannerError, Result};
use crate::models::{ItemId, Price};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Represents an item that can be placed in a basket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Identifier, unique within a catalog
    pub id: ItemId,

    /// Display name of the item
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Category tag
    pub category: String,

    /// Relative desirability in [0, 1]
    #[serde(default = "default_importance")]
    pub importance: f64,

    /// Quantity a shopper usually buys at once
    #[serde(default = "default_typical_quantity")]
    pub typical_quantity: u32,
}

fn default_importance() -> f64 {
    0.5
}

fn default_typical_quantity() -> u32 {
    1
}

impl CatalogItem {
    /// Creates a new item with default importance and typical quantity
    pub fn new<S: Into<String>, C: Into<String>>(
        id: ItemId,
        name: S,
        price: Price,
        category: C,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            importance: default_importance(),
            typical_quantity: default_typical_quantity(),
        }
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_typical_quantity(mut self, typical_quantity: u32) -> Self {
        self.typical_quantity = typical_quantity;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(PlannerError::Configuration(format!(
                "item {} has invalid price {}",
                self.id, self.price
            )));
        }
        if !(0.0..=1.0).contains(&self.importance) {
            return Err(PlannerError::Configuration(format!(
                "item {} has importance {} outside [0, 1]",
                self.id, self.importance
            )));
        }
        if self.typical_quantity == 0 {
            return Err(PlannerError::Configuration(format!(
                "item {} has a typical quantity of zero",
                self.id
            )));
        }
        Ok(())
    }
}

/// Ordered, validated collection of catalog items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Arc<CatalogItem>>,
}

impl Catalog {
    /// Creates a catalog, rejecting duplicate identifiers and malformed items
    pub fn new(items: Vec<CatalogItem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id) {
                return Err(PlannerError::Configuration(format!(
                    "duplicate item id {} in catalog",
                    item.id
                )));
            }
        }

        Ok(Self {
            items: items.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn items(&self) -> &[Arc<CatalogItem>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by identifier
    pub fn get(&self, id: ItemId) -> Option<&Arc<CatalogItem>> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The `n` most important items, highest first; ties keep catalog order
    pub fn most_important(&self, n: usize) -> Vec<Arc<CatalogItem>> {
        let mut ranked: Vec<Arc<CatalogItem>> = self.items.clone();
        ranked.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }

    /// Distinct categories present in the catalog, sorted
    pub fn categories(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
