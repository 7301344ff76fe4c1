//! Shipping time by category and shipping time vs. review score.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::debug;

use super::{Mean, MetricResult};
use crate::dataset::DatasetStore;
use crate::filter::FilterContext;
use crate::join::{join_with_reviews, FactTable};
use crate::model::Category;

/// Number of categories in each of the fastest and slowest views.
pub const SHIPPING_VIEW_SIZE: usize = 5;

/// Mean shipping time of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShipping {
    pub category: Category,
    pub avg_shipping_days: f64,
}

/// The fastest and slowest categories, both in ascending order of mean
/// shipping time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingTimeByCategory {
    pub fastest: Vec<CategoryShipping>,
    pub slowest: Vec<CategoryShipping>,
}

/// Mean review score of all reviews at one shipping time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingReviewPoint {
    pub shipping_time: f64,
    pub avg_review_score: f64,
}

/// Mean shipping time per category inside the shipping range.
///
/// The views hold up to [`SHIPPING_VIEW_SIZE`] categories each regardless of
/// top-N, and overlap when fewer than twice that many categories remain.
pub fn shipping_time_by_category(
    ctx: &FilterContext,
    store: &DatasetStore,
) -> MetricResult<ShippingTimeByCategory> {
    let facts = FactTable::build(store, ctx);
    let rows = facts.within_shipping_range(ctx.shipping_time());

    let mut means: BTreeMap<&Category, Mean> = BTreeMap::new();
    for row in &rows {
        if let Some(days) = row.shipping_time() {
            means.entry(row.category()).or_default().add(days);
        }
    }
    if means.is_empty() {
        debug!("shipping time by category: no rows in range");
        return MetricResult::Empty;
    }

    let mut ranked: Vec<CategoryShipping> = means
        .into_iter()
        .map(|(category, mean)| CategoryShipping {
            category: category.clone(),
            avg_shipping_days: mean.value(),
        })
        .collect();
    ranked.sort_by(|a, b| a.avg_shipping_days.total_cmp(&b.avg_shipping_days));

    let fastest = ranked.iter().take(SHIPPING_VIEW_SIZE).cloned().collect();
    let slowest = ranked[ranked.len().saturating_sub(SHIPPING_VIEW_SIZE)..].to_vec();

    MetricResult::Data(ShippingTimeByCategory { fastest, slowest })
}

/// Mean review score per distinct shipping time inside the shipping range.
pub fn shipping_time_vs_review(
    ctx: &FilterContext,
    store: &DatasetStore,
) -> MetricResult<Vec<ShippingReviewPoint>> {
    let facts = FactTable::build(store, ctx);
    let rows = facts.within_shipping_range(ctx.shipping_time());
    let reviewed = join_with_reviews(&rows, store);

    let mut means: BTreeMap<OrderedFloat<f64>, Mean> = BTreeMap::new();
    for r in &reviewed {
        if let Some(days) = r.row.shipping_time() {
            means
                .entry(OrderedFloat(days))
                .or_default()
                .add(f64::from(r.review_score()));
        }
    }

    let points: Vec<ShippingReviewPoint> = means
        .into_iter()
        .map(|(days, mean)| ShippingReviewPoint {
            shipping_time: days.into_inner(),
            avg_review_score: mean.value(),
        })
        .collect();

    if points.is_empty() {
        debug!("shipping time vs review: no reviewed rows in range");
    }
    MetricResult::from_rows(points)
}
