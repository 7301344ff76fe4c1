//! Tests for the refund metrics.

#[path = "../common/mod.rs"]
mod common;

use common::{ctx, marketplace_store, StoreBuilder};
use orderlens::metrics::ScoreCount;
use orderlens::prelude::*;

fn counts(result: MetricResult<orderlens::metrics::ReviewDistribution>) -> Vec<(u8, u64)> {
    result
        .into_data()
        .unwrap()
        .counts
        .into_iter()
        .map(|ScoreCount { score, count }| (score, count))
        .collect()
}

#[test]
fn test_canceled_toys_in_review_range() {
    let store = StoreBuilder::new()
        .product("p1", Some("Toys"))
        .order("o1", "canceled", "2023-02-01", None)
        .order("o2", "canceled", "2023-02-03", None)
        .item("o1", "p1", 10.0)
        .item("o2", "p1", 12.0)
        .review("o1", 2)
        .review("o2", 4)
        .build();

    let result = refund_review_distribution(
        &ctx(FilterParams::default().with_review_score(3, 5)),
        &store,
    );
    assert_eq!(counts(result), vec![(1, 0), (2, 0), (3, 0), (4, 1), (5, 0)]);
}

#[test]
fn test_distribution_counts_every_reviewed_refund_row() {
    let store = marketplace_store();
    let full = refund_review_distribution(&FilterContext::default(), &store)
        .into_data()
        .unwrap();
    assert_eq!(full.total(), 5);
    assert_eq!(full.count(1), Some(2));
    assert_eq!(full.count(2), Some(2));
    assert_eq!(full.count(4), Some(1));

    let narrowed = refund_review_distribution(
        &ctx(FilterParams::default().with_review_score(2, 5)),
        &store,
    )
    .into_data()
    .unwrap();
    assert_eq!(narrowed.total(), 3);
    let scores: Vec<u8> = narrowed.counts.iter().map(|c| c.score).collect();
    assert_eq!(scores, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_distribution_empty_when_range_excludes_all() {
    let store = marketplace_store();
    let result = refund_review_distribution(
        &ctx(FilterParams::default().with_review_score(5, 5)),
        &store,
    );
    assert!(result.is_empty());
}

#[test]
fn test_refunds_by_category() {
    let store = marketplace_store();
    let rows = refunds_by_category(&FilterContext::default(), &store)
        .into_data()
        .unwrap();
    let pairs: Vec<(String, u64)> = rows
        .iter()
        .map(|r| (r.category.to_string(), r.refunds))
        .collect();
    assert_eq!(
        pairs,
        vec![("toys".to_string(), 2), ("books".to_string(), 1)]
    );

    let top1 = refunds_by_category(&ctx(FilterParams::default().with_top_n(1)), &store)
        .into_data()
        .unwrap();
    assert_eq!(top1.len(), 1);
}

#[test]
fn test_refunds_ignore_shipping_range() {
    let store = marketplace_store();
    let ctx = ctx(FilterParams::default().with_shipping_time(0.0, 1.0));
    assert_eq!(
        refunds_by_category(&ctx, &store),
        refunds_by_category(&FilterContext::default(), &store)
    );
}

#[test]
fn test_refunds_compose_with_category_filter() {
    let store = marketplace_store();
    let rows = refunds_by_category(
        &ctx(FilterParams::default().with_categories(["books"])),
        &store,
    )
    .into_data()
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].refunds, 1);

    let none = refunds_by_category(
        &ctx(FilterParams::default().with_categories(["electronics"])),
        &store,
    );
    assert_eq!(none, MetricResult::Empty);
}

#[test]
fn test_no_canceled_orders() {
    let store = StoreBuilder::new()
        .product("p1", Some("toys"))
        .order("o1", "delivered", "2023-01-01", Some(1.0))
        .item("o1", "p1", 5.0)
        .review("o1", 5)
        .build();
    assert!(refunds_by_category(&FilterContext::default(), &store).is_empty());
    assert!(refund_review_distribution(&FilterContext::default(), &store).is_empty());
}
