//! Tests for filter validation.

use orderlens::filter::{
    CategoryFilter, FilterContext, FilterParams, ScoreRange, ShippingRange, ALL_CATEGORIES,
    DEFAULT_TOP_N,
};
use orderlens::model::Category;

#[test]
fn test_default_context() {
    let ctx = FilterContext::default();
    assert_eq!(ctx.top_n(), DEFAULT_TOP_N);
    assert_eq!(ctx.categories(), &CategoryFilter::All);
    assert_eq!(ctx.shipping_time(), ShippingRange::UNBOUNDED);
    assert_eq!(ctx.review_score(), ScoreRange::FULL);
}

#[test]
fn test_non_positive_top_n_resets_to_default() {
    for top_n in [0, -1, i64::MIN] {
        let ctx = FilterContext::new(FilterParams::default().with_top_n(top_n));
        assert_eq!(ctx.top_n(), DEFAULT_TOP_N);
    }
}

#[test]
fn test_top_n_has_no_upper_bound() {
    let ctx = FilterContext::new(FilterParams::default().with_top_n(250));
    assert_eq!(ctx.top_n(), 250);
}

#[test]
fn test_all_categories_sentinel_wins() {
    let filter = CategoryFilter::from_selection(["toys", ALL_CATEGORIES]);
    assert_eq!(filter, CategoryFilter::All);
    assert!(filter.allows(&Category::Unknown));
}

#[test]
fn test_empty_selection_is_unrestricted() {
    let ctx = FilterContext::new(FilterParams::default().with_categories(Vec::<String>::new()));
    assert_eq!(ctx.categories(), &CategoryFilter::All);
}

#[test]
fn test_blank_selection_entries_are_skipped() {
    let filter = CategoryFilter::from_selection(["", "  ", "toys"]);
    assert!(filter.allows(&Category::from("toys")));
    assert!(!filter.allows(&Category::Unknown));

    assert_eq!(CategoryFilter::from_selection([""]), CategoryFilter::All);
}

#[test]
fn test_subset_matches_exact_labels() {
    let filter = CategoryFilter::from_selection(["toys", "books"]);
    assert!(filter.allows(&Category::from("toys")));
    assert!(!filter.allows(&Category::from("Toys")));
    assert!(!filter.allows(&Category::Unknown));
}

#[test]
fn test_inverted_shipping_range_is_swapped() {
    let range = ShippingRange::new(20.0, 5.0);
    assert_eq!((range.min(), range.max()), (5.0, 20.0));
    assert!(range.contains(5.0));
    assert!(range.contains(20.0));
    assert!(!range.contains(20.5));
}

#[test]
fn test_inverted_review_range_is_swapped() {
    let ctx = FilterContext::new(FilterParams::default().with_review_score(4, 2));
    let range = ctx.review_score();
    assert_eq!((range.min(), range.max()), (2, 4));
    assert!(range.contains(3));
    assert!(!range.contains(5));
}

#[test]
fn test_review_range_is_clamped() {
    let range = ScoreRange::new(0, 9);
    assert_eq!(range, ScoreRange::FULL);
}
