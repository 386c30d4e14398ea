use std::collections::HashSet;

use chrono::{Datelike, Timelike};
use orderhistory_core::{Catalog, GeneratedOrder, Item};
use orderhistory_generate::sampling::MAX_QUANTITY;
use orderhistory_generate::{GenerateOptions, GenerationEngine, GenerationError, GenerationRequest};

fn catalog(prices: &[f64]) -> Catalog {
    let items = prices
        .iter()
        .enumerate()
        .map(|(index, price)| Item {
            id: format!("{}", index + 1),
            name: format!("Item {}", index + 1),
            price: *price,
        })
        .collect();
    Catalog::new(items).expect("valid catalog")
}

fn generate(catalog: &Catalog, seed: Option<u64>, customers: u64, orders: u64) -> Vec<GeneratedOrder> {
    let engine = GenerationEngine::new(GenerateOptions {
        seed,
        ..GenerateOptions::default()
    });
    engine
        .orders(catalog, &GenerationRequest { customers, orders })
        .expect("build generator")
        .collect::<Result<Vec<_>, _>>()
        .expect("generate orders")
}

fn price_of(catalog: &Catalog, item_id: &str) -> f64 {
    catalog
        .items()
        .iter()
        .find(|item| item.id == item_id)
        .map(|item| item.price)
        .expect("line references a catalog item")
}

#[test]
fn totals_are_exact_sums_of_lines() {
    let catalog = catalog(&[0.1, 0.2, 0.3, 1.99, 7.25, 12.5, 99.99, 0.01]);
    for order in generate(&catalog, Some(42), 50, 2_000) {
        let expected = order.lines.iter().fold(0.0, |total, line| {
            total + price_of(&catalog, &line.item_id) * f64::from(line.quantity)
        });
        assert_eq!(order.order.total.to_bits(), expected.to_bits());
    }
}

#[test]
fn baskets_have_distinct_items_and_valid_quantities() {
    let catalog = catalog(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    for order in generate(&catalog, Some(7), 10, 3_000) {
        let distinct: HashSet<&str> = order.lines.iter().map(|line| line.item_id.as_str()).collect();
        assert_eq!(distinct.len(), order.lines.len());

        assert!(!order.lines.is_empty());
        assert!(order.lines.len() <= order.attempts as usize);
        assert!(order.lines.len() <= catalog.len());
        assert!((1..=catalog.len() as u32).contains(&order.attempts));

        for line in &order.lines {
            assert!((1..=MAX_QUANTITY).contains(&line.quantity));
            assert_eq!(line.order_id, order.order.order_id);
        }
    }
}

#[test]
fn skipped_picks_leave_smaller_baskets() {
    let catalog = catalog(&[1.0, 2.0, 3.0, 4.0]);
    let orders = generate(&catalog, Some(99), 10, 2_000);
    assert!(
        orders.iter().any(|order| order.skipped_picks() > 0),
        "expected at least one repeated pick"
    );
}

#[test]
fn order_ids_are_contiguous_from_power_of_ten() {
    let catalog = catalog(&[1.0, 2.0]);
    let orders = generate(&catalog, Some(1), 37, 500);

    let ids: Vec<i64> = orders.iter().map(|order| order.order.order_id).collect();
    assert_eq!(ids, (100..600).collect::<Vec<i64>>());

    for order in &orders {
        assert!((10..=46).contains(&order.order.customer_id));
    }
}

#[test]
fn hundred_orders_start_at_one_hundred() {
    let catalog = catalog(&[1.0, 2.0, 3.0]);
    let orders = generate(&catalog, None, 20, 100);

    assert_eq!(orders.len(), 100);
    assert!(orders.iter().all(|order| (100..=199).contains(&order.order.order_id)));
}

#[test]
fn single_order_over_three_items() {
    let catalog = catalog(&[1.00, 2.50, 10.00]);
    let orders = generate(&catalog, None, 5, 1);

    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.order.order_id, 1);
    assert!((1..=5).contains(&order.order.customer_id));
    assert!((1..=3).contains(&order.lines.len()));

    let expected = order.lines.iter().fold(0.0, |total, line| {
        total + price_of(&catalog, &line.item_id) * f64::from(line.quantity)
    });
    assert_eq!(order.order.total, expected);
}

#[test]
fn timestamps_stay_in_calendar_bounds() {
    let catalog = catalog(&[1.0]);
    for order in generate(&catalog, Some(5), 3, 2_000) {
        let placed_at = order.order.placed_at;
        assert!((2000..=2014).contains(&placed_at.year()));
        assert!((1..=28).contains(&placed_at.day()));
        assert!(placed_at.hour() < 24);

        let text = order.order.date_text();
        assert_eq!(text.len(), 19);
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[10..11], " ");
    }
}

#[test]
fn unseeded_runs_differ() {
    let catalog = catalog(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let first = generate(&catalog, None, 100, 50);
    let second = generate(&catalog, None, 100, 50);
    assert_ne!(first, second);
}

#[test]
fn seeded_runs_repeat() {
    let catalog = catalog(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(
        generate(&catalog, Some(2024), 100, 50),
        generate(&catalog, Some(2024), 100, 50)
    );
}

#[test]
fn zero_counts_fail_fast() {
    let catalog = catalog(&[1.0]);
    let engine = GenerationEngine::default();

    let err = engine
        .orders(&catalog, &GenerationRequest { customers: 0, orders: 10 })
        .err()
        .expect("zero customers must fail");
    assert!(matches!(err, GenerationError::InvalidArgument(_)));

    let err = engine
        .orders(&catalog, &GenerationRequest { customers: 10, orders: 0 })
        .err()
        .expect("zero orders must fail");
    assert!(matches!(err, GenerationError::InvalidArgument(_)));
}

#[test]
fn empty_catalog_is_rejected() {
    let engine = GenerationEngine::default();
    let err = engine
        .orders(&Catalog::default(), &GenerationRequest { customers: 1, orders: 1 })
        .err()
        .expect("empty catalog must fail");
    assert!(matches!(err, GenerationError::InvalidArgument(_)));
}
