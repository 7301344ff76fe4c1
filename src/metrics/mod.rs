//! The six metric computers.
//!
//! Every computer is a pure function of `(&FilterContext, &DatasetStore)`
//! that rebuilds its joins from the base tables and returns either a result
//! table or [`MetricResult::Empty`] when no rows survive the filters.
//!
//! Grouping goes through ordered maps and ranking uses stable sorts, so
//! ties keep ascending category order and repeated runs are identical.

mod refunds;
mod revenue;
mod shipping;

pub use refunds::{
    refund_review_distribution, refunds_by_category, CategoryRefunds, ReviewDistribution,
    ScoreCount,
};
pub use revenue::{revenue_by_category, revenue_trend, CategoryRevenue, RevenueTrend, TrendSeries};
pub use shipping::{
    shipping_time_by_category, shipping_time_vs_review, CategoryShipping, ShippingReviewPoint,
    ShippingTimeByCategory, SHIPPING_VIEW_SIZE,
};

use serde::Serialize;

/// Outcome of a metric: a result table, or "no data for current filters".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum MetricResult<T> {
    Data(T),
    Empty,
}

impl<T> MetricResult<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, MetricResult::Empty)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            MetricResult::Data(data) => Some(data),
            MetricResult::Empty => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            MetricResult::Data(data) => Some(data),
            MetricResult::Empty => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> MetricResult<U> {
        match self {
            MetricResult::Data(data) => MetricResult::Data(f(data)),
            MetricResult::Empty => MetricResult::Empty,
        }
    }
}

impl<T> MetricResult<Vec<T>> {
    /// `Empty` for an empty table, `Data` otherwise.
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            MetricResult::Empty
        } else {
            MetricResult::Data(rows)
        }
    }
}

/// Running sum and count for a mean.
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: u64,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        self.sum / self.count as f64
    }
}
