// Integration tests for recommendations feeding a store trip
use store_planner::config::PlannerConfig;
use store_planner::models::{Basket, Catalog, Cell, StoreMap};
use store_planner::planning::{requests_from_basket, ItemRequest, StepAction, TripPlan};
use store_planner::utils::loader::{parse_catalog, parse_store_map};

const MAP_JSON: &str = r#"{
    "name": "test market",
    "rows": 6,
    "cols": 8,
    "entrance": { "row": 5, "col": 0 },
    "checkout": { "row": 5, "col": 7 },
    "zones": {
        "bakery": { "cell": { "row": 0, "col": 1 }, "items": [1] },
        "dairy": { "cell": { "row": 0, "col": 6 }, "items": [2, 3] },
        "produce": { "cell": { "row": 3, "col": 3 }, "items": [4] }
    },
    "obstacles": [
        { "row": 2, "col": 1 }, { "row": 2, "col": 2 }, { "row": 2, "col": 3 },
        { "row": 2, "col": 5 }, { "row": 2, "col": 6 }
    ]
}"#;

const CATALOG_JSON: &str = r#"{ "items": [
    { "id": 1, "name": "Bread", "price": 4.0, "category": "bakery", "importance": 0.8 },
    { "id": 2, "name": "Milk", "price": 6.5, "category": "dairy", "importance": 0.9, "typical_quantity": 2 },
    { "id": 3, "name": "Cheese", "price": 18.0, "category": "dairy", "importance": 0.5 },
    { "id": 4, "name": "Apples", "price": 8.0, "category": "produce", "importance": 0.7 },
    { "id": 5, "name": "Saffron", "price": 25.0, "category": "spices", "importance": 0.2 }
] }"#;

fn fixtures() -> (StoreMap, Catalog) {
    (
        parse_store_map(MAP_JSON).unwrap(),
        parse_catalog(CATALOG_JSON).unwrap(),
    )
}

fn fast_config() -> PlannerConfig {
    PlannerConfig::from_toml_str(
        r#"
        [annealing]
        initial_temperature = 100.0
        cooling_factor = 0.9
        iterations_per_temperature = 50
        "#,
    )
    .unwrap()
}

fn pickups(plan: &TripPlan) -> Vec<(Cell, Vec<ItemRequest>)> {
    plan.steps
        .iter()
        .filter_map(|step| match &step.action {
            StepAction::Pickup { items } => Some((step.cell, items.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_trip_covers_every_located_item() {
    let (map, catalog) = fixtures();
    let mut basket = Basket::new();
    for id in [1, 2, 3, 4] {
        basket.push(catalog.get(id).unwrap().clone(), 1);
    }

    let plan = fast_config()
        .trip_planner()
        .plan(&map, &requests_from_basket(&basket))
        .unwrap();

    assert_eq!(plan.route.start(), Some(map.entrance));
    assert_eq!(plan.route.end(), Some(map.checkout));
    assert!(plan.route.is_contiguous());
    assert_eq!(plan.steps.len(), plan.route.cells.len());
    assert_eq!(plan.stops.len(), 3);
    assert_eq!(plan.collected.len(), 4);
    assert!(plan.unlocated.is_empty() && plan.unreachable.is_empty());

    for (cell, _) in pickups(&plan) {
        assert!(plan.stops.contains(&cell));
    }
    for cell in &plan.route.cells {
        assert!(!map.obstacles.contains(cell));
    }
}

#[test]
fn test_item_missing_from_map_is_reported() {
    let (map, catalog) = fixtures();
    let mut basket = Basket::new();
    basket.push(catalog.get(4).unwrap().clone(), 2);
    basket.push(catalog.get(5).unwrap().clone(), 1);

    let plan = fast_config()
        .trip_planner()
        .plan(&map, &requests_from_basket(&basket))
        .unwrap();

    assert_eq!(plan.unlocated.len(), 1);
    assert_eq!(plan.unlocated[0].item_id, 5);
    assert_eq!(pickups(&plan).len(), 1);
    assert_eq!(plan.route.end(), Some(map.checkout));
}

#[test]
fn test_recommendations_are_reproducible() {
    let (_, catalog) = fixtures();
    let recommender = fast_config().recommender().unwrap();
    let preferred = vec!["dairy".to_string()];

    let first = recommender.recommend(&catalog, 50.0, &preferred, 99).unwrap();
    let second = recommender.recommend(&catalog, 50.0, &preferred, 99).unwrap();

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.lines, b.lines);
        assert_eq!(a.total, b.total);
        assert_eq!(a.difference, b.difference);
    }
    assert_eq!(first.budget, 50.0);
}

#[test]
fn test_recommended_basket_can_be_walked() {
    let (map, catalog) = fixtures();
    let config = fast_config();
    let set = config
        .recommender()
        .unwrap()
        .recommend(&catalog, 40.0, &[], 5)
        .unwrap();

    let mut basket = Basket::new();
    for line in &set.exact.lines {
        basket.push(catalog.get(line.id).unwrap().clone(), line.quantity);
    }
    let requests = requests_from_basket(&basket);
    let plan = config.trip_planner().plan(&map, &requests).unwrap();

    let walked = plan.collected.len() + plan.unlocated.len() + plan.unreachable.len();
    assert_eq!(walked, requests.len());
    assert_eq!(plan.steps.last().map(|s| &s.action), Some(&StepAction::Checkout));
}
