// Models module - exports all model types

mod basket;
mod catalog;
mod cell;
mod grid;
mod route;
mod store_map;

// Re-export model types
pub use self::basket::{Basket, BasketLine, ConsolidatedLine};
pub use self::catalog::{Catalog, CatalogItem};
pub use self::cell::Cell;
pub use self::grid::Grid;
pub use self::route::Route;
pub use self::store_map::{StoreMap, Zone};

// Common type aliases for improved code readability
pub type ItemId = u32;
pub type Price = f64;
pub type Cost = f64;
