// Store map model: the floor plan supplied by the map loader

use crate::error::{PlannerError, Result};
use crate::models::{Cell, Grid, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named shelf area holding a set of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Cell a shopper stands on to pick items from this zone
    pub cell: Cell,

    /// Items stocked in this zone
    #[serde(default)]
    pub items: Vec<ItemId>,
}

/// Floor plan of one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMap {
    #[serde(default)]
    pub name: String,

    pub rows: i32,
    pub cols: i32,
    pub entrance: Cell,
    pub checkout: Cell,

    /// Zones keyed by label; lookups scan labels in sorted order
    #[serde(default)]
    pub zones: BTreeMap<String, Zone>,

    #[serde(default)]
    pub obstacles: Vec<Cell>,

    /// Walkable corridors, informational only
    #[serde(default)]
    pub corridors: Vec<Cell>,
}

impl StoreMap {
    /// Builds the pathfinding grid, checking that entrance and checkout are
    /// walkable
    pub fn grid(&self) -> Result<Grid> {
        let grid = Grid::new(self.rows, self.cols, self.obstacles.iter().copied())?;

        for (label, cell) in [("entrance", self.entrance), ("checkout", self.checkout)] {
            if !grid.is_valid(&cell) {
                return Err(PlannerError::Configuration(format!(
                    "{} {} of map '{}' is outside the grid or blocked",
                    label, cell, self.name
                )));
            }
        }

        Ok(grid)
    }

    /// Shelf cell where an item can be picked up
    pub fn location_of(&self, item_id: ItemId) -> Option<Cell> {
        self.zones
            .values()
            .find(|zone| zone.items.contains(&item_id))
            .map(|zone| zone.cell)
    }

    /// Label of the zone stocking an item
    pub fn zone_of(&self, item_id: ItemId) -> Option<&str> {
        self.zones
            .iter()
            .find(|(_, zone)| zone.items.contains(&item_id))
            .map(|(label, _)| label.as_str())
    }
}
