// Basket model: candidate selections of catalog items with quantities

use crate::models::{CatalogItem, ItemId, Price};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// A single basket entry
#[derive(Debug, Clone, PartialEq)]
pub struct BasketLine {
    pub item: Arc<CatalogItem>,

    /// Always at least 1
    pub quantity: u32,
}

impl BasketLine {
    /// Price times quantity
    pub fn subtotal(&self) -> Price {
        self.item.price * self.quantity as f64
    }
}

/// One line per distinct item, produced when a basket leaves the optimizer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedLine {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Price,
    pub category: String,
    pub quantity: u32,
    pub subtotal: Price,
}

/// Ordered sequence of basket lines
///
/// The same item may appear in several lines while a search is running;
/// `consolidate` merges them once at the boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    lines: Vec<BasketLine>,
}

impl Basket {
    /// Creates a new empty basket
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[BasketLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends a line; zero quantities are ignored
    pub fn push(&mut self, item: Arc<CatalogItem>, quantity: u32) {
        if quantity > 0 {
            self.lines.push(BasketLine { item, quantity });
        }
    }

    /// Removes and returns the line at `index`
    pub fn remove_line(&mut self, index: usize) -> Option<BasketLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Sets a line's quantity, dropping the line when it reaches zero
    pub fn set_quantity(&mut self, index: usize, quantity: u32) {
        if index >= self.lines.len() {
            return;
        }
        if quantity == 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = quantity;
        }
    }

    /// Replaces the item of a line, keeping its quantity
    pub fn replace_item(&mut self, index: usize, item: Arc<CatalogItem>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.item = item;
        }
    }

    /// Sum of line subtotals
    pub fn total_cost(&self) -> Price {
        self.lines.iter().map(BasketLine::subtotal).sum()
    }

    /// Total number of units across all lines
    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct items
    pub fn distinct_item_count(&self) -> usize {
        let mut ids: Vec<ItemId> = self.lines.iter().map(|l| l.item.id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Accumulated quantity per distinct item, in order of first appearance
    pub fn quantities_by_item(&self) -> Vec<(Arc<CatalogItem>, u32)> {
        let mut index: HashMap<ItemId, usize> = HashMap::new();
        let mut merged: Vec<(Arc<CatalogItem>, u32)> = Vec::new();

        for line in &self.lines {
            match index.get(&line.item.id) {
                Some(&pos) => merged[pos].1 += line.quantity,
                None => {
                    index.insert(line.item.id, merged.len());
                    merged.push((Arc::clone(&line.item), line.quantity));
                }
            }
        }

        merged
    }

    /// Merges duplicate items and sorts the result by category, then name
    pub fn consolidate(&self) -> Vec<ConsolidatedLine> {
        let mut lines: Vec<ConsolidatedLine> = self
            .quantities_by_item()
            .into_iter()
            .map(|(item, quantity)| ConsolidatedLine {
                id: item.id,
                name: item.name.clone(),
                unit_price: item.price,
                category: item.category.clone(),
                quantity,
                subtotal: item.price * quantity as f64,
            })
            .collect();

        lines.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        lines
    }
}
