// JSON loaders for store maps and catalogs

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{Catalog, CatalogItem, StoreMap};

/// Catalog documents are either a bare item array or `{ "items": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Items(Vec<CatalogItem>),
    Wrapped { items: Vec<CatalogItem> },
}

/// Parse a store map and check that it yields a usable grid
pub fn parse_store_map(json: &str) -> Result<StoreMap> {
    let map: StoreMap = serde_json::from_str(json)?;
    map.grid()?;
    Ok(map)
}

pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let items = match serde_json::from_str::<CatalogDocument>(json)? {
        CatalogDocument::Items(items) | CatalogDocument::Wrapped { items } => items,
    };
    Catalog::new(items)
}

pub fn load_store_map<P: AsRef<Path>>(path: P) -> Result<StoreMap> {
    let path = path.as_ref();
    let map = parse_store_map(&fs::read_to_string(path)?)?;
    info!(
        "Loaded map '{}' ({}x{}, {} zones) from {}",
        map.name,
        map.rows,
        map.cols,
        map.zones.len(),
        path.display()
    );
    Ok(map)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let catalog = parse_catalog(&fs::read_to_string(path)?)?;
    info!("Loaded {} catalog items from {}", catalog.len(), path.display());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::models::Cell;

    const MAP_JSON: &str = r#"{
        "name": "corner shop",
        "rows": 4,
        "cols": 6,
        "entrance": { "row": 0, "col": 0 },
        "checkout": { "row": 3, "col": 0 },
        "zones": {
            "dairy": { "cell": { "row": 1, "col": 4 }, "items": [2, 3] },
            "bakery": { "cell": { "row": 0, "col": 5 }, "items": [1] }
        },
        "obstacles": [{ "row": 1, "col": 2 }, { "row": 2, "col": 2 }]
    }"#;

    #[test]
    fn test_parse_store_map() {
        let map = parse_store_map(MAP_JSON).unwrap();

        assert_eq!(map.name, "corner shop");
        assert_eq!(map.obstacles.len(), 2);
        assert!(map.corridors.is_empty());
        assert_eq!(map.location_of(3), Some(Cell::new(1, 4)));
        assert_eq!(map.zone_of(1), Some("bakery"));
    }

    #[test]
    fn test_map_with_blocked_entrance() {
        let json = MAP_JSON.replace(
            r#""obstacles": [{ "row": 1, "col": 2 }"#,
            r#""obstacles": [{ "row": 0, "col": 0 }"#,
        );
        assert!(matches!(
            parse_store_map(&json),
            Err(PlannerError::Configuration(_))
        ));
    }

    #[test]
    fn test_parse_catalog_both_shapes() {
        let bare = r#"[
            { "id": 1, "name": "Bread", "price": 3.5, "category": "bakery" },
            { "id": 2, "name": "Milk", "price": 6.0, "category": "dairy", "importance": 0.9, "typical_quantity": 2 }
        ]"#;
        let wrapped = format!(r#"{{ "items": {} }}"#, bare);

        for json in [bare, wrapped.as_str()] {
            let catalog = parse_catalog(json).unwrap();
            assert_eq!(catalog.len(), 2);
            assert_eq!(catalog.get(1).unwrap().importance, 0.5);
            assert_eq!(catalog.get(2).unwrap().typical_quantity, 2);
        }
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let json = r#"[
            { "id": 1, "name": "Bread", "price": 3.5, "category": "bakery" },
            { "id": 1, "name": "Bagel", "price": 2.0, "category": "bakery" }
        ]"#;
        assert!(matches!(
            parse_catalog(json),
            Err(PlannerError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_catalog("{ nope"), Err(PlannerError::Json(_))));
        assert!(matches!(
            load_catalog("/nonexistent/catalog.json"),
            Err(PlannerError::Io(_))
        ));
    }
}
