//! Revenue by category and revenue trend by month.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::MetricResult;
use crate::dataset::DatasetStore;
use crate::filter::FilterContext;
use crate::join::FactTable;
use crate::model::{Category, YearMonth};

/// Total revenue of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub category: Category,
    pub revenue: f64,
}

/// Monthly revenue of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub category: Category,
    /// One value per entry of [`RevenueTrend::months`], zero when idle.
    pub revenue: Vec<f64>,
}

/// Revenue per month for the top categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueTrend {
    /// Contiguous month axis from the first to the last active month.
    pub months: Vec<YearMonth>,
    /// Series ranked by total revenue, highest first.
    pub series: Vec<TrendSeries>,
}

/// Sum of item prices per category, highest first, truncated to top-N.
pub fn revenue_by_category(
    ctx: &FilterContext,
    store: &DatasetStore,
) -> MetricResult<Vec<CategoryRevenue>> {
    let facts = FactTable::build(store, ctx);

    let mut totals: BTreeMap<&Category, f64> = BTreeMap::new();
    for row in facts.rows() {
        *totals.entry(row.category()).or_default() += row.price();
    }

    let mut ranked: Vec<CategoryRevenue> = totals
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue {
            category: category.clone(),
            revenue,
        })
        .collect();
    ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranked.truncate(ctx.top_n());

    if ranked.is_empty() {
        debug!("revenue by category: no rows");
    }
    MetricResult::from_rows(ranked)
}

/// Monthly revenue of the top-N categories, zero-filled over a contiguous
/// month axis.
pub fn revenue_trend(ctx: &FilterContext, store: &DatasetStore) -> MetricResult<RevenueTrend> {
    let facts = FactTable::build(store, ctx);

    let mut by_category: BTreeMap<&Category, BTreeMap<YearMonth, f64>> = BTreeMap::new();
    for row in facts.rows() {
        *by_category
            .entry(row.category())
            .or_default()
            .entry(row.purchase_month())
            .or_default() += row.price();
    }

    let active = by_category.values().flat_map(|months| months.keys().copied());
    let (first, last) = match (active.clone().min(), active.max()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            debug!("revenue trend: no rows");
            return MetricResult::Empty;
        }
    };
    let months = YearMonth::span(first, last);

    let mut ranked: Vec<(&Category, f64, &BTreeMap<YearMonth, f64>)> = by_category
        .iter()
        .map(|(&category, monthly)| (category, monthly.values().sum(), monthly))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(ctx.top_n());

    let series = ranked
        .into_iter()
        .map(|(category, _, monthly)| TrendSeries {
            category: category.clone(),
            revenue: months
                .iter()
                .map(|m| monthly.get(m).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    MetricResult::Data(RevenueTrend { months, series })
}
