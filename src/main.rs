use std::collections::BTreeMap;
use std::env;
use std::process;

use store_planner::config::PlannerConfig;
use store_planner::models::{Basket, Catalog, CatalogItem, Cell, StoreMap, Zone};
use store_planner::planning::{requests_from_basket, StepAction};
use store_planner::utils::loader::{load_catalog, load_store_map};

const DEFAULT_BUDGET: f64 = 120.0;
const SEED: u64 = 2024;

fn main() {
    // Usage: store-planner [MAP_JSON CATALOG_JSON] [BUDGET]
    let args: Vec<String> = env::args().skip(1).collect();

    let (map, catalog, budget_arg) = if args.len() >= 2 {
        let map = match load_store_map(&args[0]) {
            Ok(map) => map,
            Err(e) => {
                eprintln!("Error loading store map {}: {}", args[0], e);
                process::exit(1);
            }
        };
        let catalog = match load_catalog(&args[1]) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Error loading catalog {}: {}", args[1], e);
                process::exit(1);
            }
        };
        (map, catalog, args.get(2))
    } else {
        match sample_store() {
            Ok((map, catalog)) => (map, catalog, args.first()),
            Err(e) => {
                eprintln!("Error building sample store: {}", e);
                process::exit(1);
            }
        }
    };

    let budget = match budget_arg.map(|s| s.parse::<f64>()) {
        None => DEFAULT_BUDGET,
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            eprintln!("Invalid budget: {}", e);
            process::exit(1);
        }
    };

    let config = PlannerConfig::default();
    let recommender = match config.recommender() {
        Ok(recommender) => recommender,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    println!("Store: {} ({}x{})", map.name, map.rows, map.cols);
    println!("Catalog: {} items, budget {:.2}", catalog.len(), budget);

    let start_time = std::time::Instant::now();
    let recommendations = match recommender.recommend(&catalog, budget, &[], SEED) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Recommendation failed: {}", e);
            process::exit(1);
        }
    };
    println!("\nRecommendations (found in {:.2?}):", start_time.elapsed());
    println!("------------------------------------------");

    for rec in recommendations.iter() {
        println!(
            "{:?}: total {:.2} ({:+.2}, {:+.2}%), {} items / {} distinct",
            rec.variant,
            rec.total,
            rec.difference,
            rec.percent_difference,
            rec.item_count,
            rec.distinct_count
        );
        println!("  {}", rec.message);
        for line in &rec.lines {
            println!(
                "    [{}] {} x{} at {:.2} = {:.2}",
                line.category, line.name, line.quantity, line.unit_price, line.subtotal
            );
        }
    }

    // Walk the store for the exact basket
    let mut basket = Basket::new();
    for line in &recommendations.exact.lines {
        if let Some(item) = catalog.get(line.id) {
            basket.push(item.clone(), line.quantity);
        }
    }
    let requests = requests_from_basket(&basket);

    let plan = match config.trip_planner().plan(&map, &requests) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Trip planning failed: {}", e);
            process::exit(1);
        }
    };

    println!("\nTrip plan:");
    println!("------------------------------------------");
    println!(
        "  {} steps, {} stops, estimated {}",
        plan.total_distance,
        plan.stops.len(),
        plan.estimated_time
    );
    for step in &plan.steps {
        match &step.action {
            StepAction::Start => println!("  {:>3} {} start at entrance", step.index, step.cell),
            StepAction::Pickup { items } => {
                let names: Vec<&str> = items.iter().map(|r| r.name.as_str()).collect();
                println!("  {:>3} {} pick up {}", step.index, step.cell, names.join(", "));
            }
            StepAction::Checkout => println!("  {:>3} {} checkout", step.index, step.cell),
            StepAction::Advance => {}
        }
    }
    for request in &plan.unlocated {
        println!("  WARNING: {} is not on the map", request.name);
    }
    for request in &plan.unreachable {
        println!("  WARNING: could not reach {}", request.name);
    }
}

/// Small built-in store used when no data files are given
fn sample_store() -> store_planner::Result<(StoreMap, Catalog)> {
    let catalog = Catalog::new(vec![
        CatalogItem::new(1, "Rice 1kg", 9.5, "grains").with_importance(0.9),
        CatalogItem::new(2, "Pasta", 7.0, "grains").with_importance(0.6),
        CatalogItem::new(3, "Milk 1L", 6.5, "dairy")
            .with_importance(0.9)
            .with_typical_quantity(2),
        CatalogItem::new(4, "Cheese", 18.0, "dairy").with_importance(0.5),
        CatalogItem::new(5, "Eggs (12)", 15.0, "dairy").with_importance(0.8),
        CatalogItem::new(6, "Bread", 4.0, "bakery")
            .with_importance(0.85)
            .with_typical_quantity(2),
        CatalogItem::new(7, "Apples 1kg", 8.0, "produce").with_importance(0.7),
        CatalogItem::new(8, "Tomatoes 1kg", 6.0, "produce").with_importance(0.6),
        CatalogItem::new(9, "Coffee", 28.0, "drinks").with_importance(0.4),
        CatalogItem::new(10, "Orange juice", 11.0, "drinks").with_importance(0.3),
        CatalogItem::new(11, "Soap", 5.5, "home").with_importance(0.5),
        CatalogItem::new(12, "Chocolate", 9.0, "snacks").with_importance(0.2),
    ])?;

    let zone = |row, col, items: &[u32]| Zone {
        cell: Cell::new(row, col),
        items: items.to_vec(),
    };
    let mut zones = BTreeMap::new();
    zones.insert("bakery".to_string(), zone(0, 8, &[6]));
    zones.insert("dairy".to_string(), zone(2, 9, &[3, 4, 5]));
    zones.insert("drinks".to_string(), zone(6, 5, &[9, 10]));
    zones.insert("grains".to_string(), zone(4, 2, &[1, 2]));
    zones.insert("home".to_string(), zone(6, 9, &[11]));
    zones.insert("produce".to_string(), zone(0, 3, &[7, 8]));
    zones.insert("snacks".to_string(), zone(4, 6, &[12]));

    // Two shelving aisles with a gap in the middle
    let obstacles = (1..8)
        .filter(|col| !(4..=5).contains(col))
        .flat_map(|col| [Cell::new(1, col), Cell::new(5, col)])
        .collect();

    let map = StoreMap {
        name: "Sample market".to_string(),
        rows: 8,
        cols: 10,
        entrance: Cell::new(7, 0),
        checkout: Cell::new(7, 9),
        zones,
        obstacles,
        corridors: Vec::new(),
    };

    Ok((map, catalog))
}
