//! Tests for revenue by category and the monthly revenue trend.

#[path = "../common/mod.rs"]
mod common;

use common::{ctx, marketplace_store, single_order_store, StoreBuilder};
use orderlens::prelude::*;

fn labels(rows: &[orderlens::metrics::CategoryRevenue]) -> Vec<String> {
    rows.iter().map(|r| r.category.to_string()).collect()
}

#[test]
fn test_single_order_revenue() {
    let store = single_order_store();
    let result = revenue_by_category(&FilterContext::default(), &store);

    let rows = result.into_data().expect("revenue should not be empty");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, Category::from("Electronics"));
    assert_eq!(rows[0].revenue, 100.0);
}

#[test]
fn test_revenue_sorted_descending_with_stable_ties() {
    let store = marketplace_store();
    let rows = revenue_by_category(&FilterContext::default(), &store)
        .into_data()
        .unwrap();

    assert_eq!(
        labels(&rows),
        vec!["electronics", "toys", "garden", "books", "unknown"]
    );
    let revenue: Vec<f64> = rows.iter().map(|r| r.revenue).collect();
    assert_eq!(revenue, vec![200.0, 80.0, 70.0, 60.0, 60.0]);
}

#[test]
fn test_revenue_truncated_to_top_n() {
    let store = marketplace_store();
    for n in 1..=7 {
        let rows = revenue_by_category(&ctx(FilterParams::default().with_top_n(n)), &store)
            .into_data()
            .unwrap();
        assert!(rows.len() <= n as usize);
        assert!(rows.windows(2).all(|w| w[0].revenue >= w[1].revenue));
    }
}

#[test]
fn test_revenue_ignores_shipping_and_review_filters() {
    let store = marketplace_store();
    let unfiltered = revenue_by_category(&FilterContext::default(), &store);
    let filtered = revenue_by_category(
        &ctx(FilterParams::default()
            .with_shipping_time(1000.0, 2000.0)
            .with_review_score(5, 5)),
        &store,
    );
    assert_eq!(unfiltered, filtered);
}

#[test]
fn test_revenue_respects_category_filter() {
    let store = marketplace_store();
    let rows = revenue_by_category(
        &ctx(FilterParams::default().with_categories(["toys", "unknown"])),
        &store,
    )
    .into_data()
    .unwrap();
    assert_eq!(labels(&rows), vec!["toys", "unknown"]);
}

#[test]
fn test_revenue_empty_for_unmatched_category() {
    let store = marketplace_store();
    let result = revenue_by_category(
        &ctx(FilterParams::default().with_categories(["furniture"])),
        &store,
    );
    assert_eq!(result, MetricResult::Empty);
}

#[test]
fn test_revenue_is_idempotent() {
    let store = marketplace_store();
    let ctx = ctx(FilterParams::default().with_top_n(3));
    assert_eq!(
        revenue_by_category(&ctx, &store),
        revenue_by_category(&ctx, &store)
    );
    assert_eq!(revenue_trend(&ctx, &store), revenue_trend(&ctx, &store));
    assert_eq!(
        shipping_time_by_category(&ctx, &store),
        shipping_time_by_category(&ctx, &store)
    );
    assert_eq!(
        shipping_time_vs_review(&ctx, &store),
        shipping_time_vs_review(&ctx, &store)
    );
    assert_eq!(
        refunds_by_category(&ctx, &store),
        refunds_by_category(&ctx, &store)
    );
    assert_eq!(
        refund_review_distribution(&ctx, &store),
        refund_review_distribution(&ctx, &store)
    );
}

#[test]
fn test_literal_unknown_label_merges_with_blank_category() {
    let store = StoreBuilder::new()
        .product("p1", Some("unknown"))
        .product("p2", None)
        .product("p3", Some("toys"))
        .order("o1", "delivered", "2023-01-05", Some(2.0))
        .item("o1", "p1", 50.0)
        .item("o1", "p2", 20.0)
        .item("o1", "p3", 10.0)
        .build();

    assert_eq!(store.categories(), vec![Category::from("toys"), Category::Unknown]);

    let rows = revenue_by_category(&FilterContext::default(), &store)
        .into_data()
        .unwrap();
    assert_eq!(labels(&rows), vec!["unknown", "toys"]);
    assert_eq!(rows[0].revenue, 70.0);

    let selected = revenue_by_category(
        &ctx(FilterParams::default().with_categories(["unknown"])),
        &store,
    )
    .into_data()
    .unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].category, Category::Unknown);
    assert_eq!(selected[0].revenue, 70.0);
}

#[test]
fn test_trend_axis_is_contiguous_and_zero_filled() {
    let store = marketplace_store();
    let trend = revenue_trend(&FilterContext::default(), &store)
        .into_data()
        .unwrap();

    let months: Vec<String> = trend.months.iter().map(ToString::to_string).collect();
    assert_eq!(months, vec!["2023-01", "2023-02", "2023-03", "2023-04"]);
    for series in &trend.series {
        assert_eq!(series.revenue.len(), trend.months.len());
    }

    let electronics = &trend.series[0];
    assert_eq!(electronics.category, Category::from("electronics"));
    assert_eq!(electronics.revenue, vec![120.0, 0.0, 0.0, 80.0]);
}

#[test]
fn test_trend_keeps_top_n_categories_by_total() {
    let store = marketplace_store();
    let trend = revenue_trend(&ctx(FilterParams::default().with_top_n(2)), &store)
        .into_data()
        .unwrap();

    let categories: Vec<String> = trend.series.iter().map(|s| s.category.to_string()).collect();
    assert_eq!(categories, vec!["electronics", "toys"]);
    assert_eq!(trend.series[1].revenue, vec![30.0, 50.0, 0.0, 0.0]);
}

#[test]
fn test_trend_empty_without_rows() {
    let store = StoreBuilder::new()
        .order("o1", "delivered", "2023-01-01", Some(1.0))
        .product("p1", Some("toys"))
        .build();
    assert!(revenue_trend(&FilterContext::default(), &store).is_empty());
}
