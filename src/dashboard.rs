//! Runs the metric computers for one filter selection and labels the
//! results for the render collaborator.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dataset::DatasetStore;
use crate::filter::FilterContext;
use crate::metrics::{
    self, CategoryRefunds, CategoryRevenue, MetricResult, ReviewDistribution, RevenueTrend,
    ShippingReviewPoint, ShippingTimeByCategory,
};

/// The six dashboard metrics, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    RevenueByCategory,
    RevenueTrend,
    ShippingTimeByCategory,
    ShippingTimeVsReview,
    RefundsByCategory,
    RefundReviewDistribution,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::RevenueByCategory,
        Metric::RevenueTrend,
        Metric::ShippingTimeByCategory,
        Metric::ShippingTimeVsReview,
        Metric::RefundsByCategory,
        Metric::RefundReviewDistribution,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::RevenueByCategory => "revenue_by_category",
            Metric::RevenueTrend => "revenue_trend",
            Metric::ShippingTimeByCategory => "shipping_time_by_category",
            Metric::ShippingTimeVsReview => "shipping_time_vs_review",
            Metric::RefundsByCategory => "refunds_by_category",
            Metric::RefundReviewDistribution => "refund_review_distribution",
        }
    }

    /// Chart title.
    pub fn title(&self, top_n: usize) -> String {
        match self {
            Metric::RevenueByCategory => format!("Top {top_n} Product Categories by Revenue"),
            Metric::RevenueTrend => "Revenue Trend Over Time by Top Product Categories".into(),
            Metric::ShippingTimeByCategory => "Average Shipping Time per Product Category".into(),
            Metric::ShippingTimeVsReview => "Shipping Time vs Customer Review Score".into(),
            Metric::RefundsByCategory => "Product Categories with Highest Refunds".into(),
            Metric::RefundReviewDistribution => "Review Scores for Returned Products".into(),
        }
    }

    /// Message shown in place of the chart when the result is empty.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Metric::RevenueByCategory => "No revenue data available for the selected filters.",
            Metric::RevenueTrend => "No trend data available for the selected filters.",
            Metric::ShippingTimeByCategory => "No shipping data available for the selected filters.",
            Metric::ShippingTimeVsReview | Metric::RefundReviewDistribution => {
                "No review data available for the selected filters."
            }
            Metric::RefundsByCategory => "No refund data available for the selected filters.",
        }
    }

    pub fn compute(&self, ctx: &FilterContext, store: &DatasetStore) -> PanelData {
        match self {
            Metric::RevenueByCategory => {
                PanelData::RevenueByCategory(metrics::revenue_by_category(ctx, store))
            }
            Metric::RevenueTrend => PanelData::RevenueTrend(metrics::revenue_trend(ctx, store)),
            Metric::ShippingTimeByCategory => {
                PanelData::ShippingTimeByCategory(metrics::shipping_time_by_category(ctx, store))
            }
            Metric::ShippingTimeVsReview => {
                PanelData::ShippingTimeVsReview(metrics::shipping_time_vs_review(ctx, store))
            }
            Metric::RefundsByCategory => {
                PanelData::RefundsByCategory(metrics::refunds_by_category(ctx, store))
            }
            Metric::RefundReviewDistribution => {
                PanelData::RefundReviewDistribution(metrics::refund_review_distribution(ctx, store))
            }
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// Result of one metric, typed by metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PanelData {
    RevenueByCategory(MetricResult<Vec<CategoryRevenue>>),
    RevenueTrend(MetricResult<RevenueTrend>),
    ShippingTimeByCategory(MetricResult<ShippingTimeByCategory>),
    ShippingTimeVsReview(MetricResult<Vec<ShippingReviewPoint>>),
    RefundsByCategory(MetricResult<Vec<CategoryRefunds>>),
    RefundReviewDistribution(MetricResult<ReviewDistribution>),
}

impl PanelData {
    pub fn is_empty(&self) -> bool {
        match self {
            PanelData::RevenueByCategory(r) => r.is_empty(),
            PanelData::RevenueTrend(r) => r.is_empty(),
            PanelData::ShippingTimeByCategory(r) => r.is_empty(),
            PanelData::ShippingTimeVsReview(r) => r.is_empty(),
            PanelData::RefundsByCategory(r) => r.is_empty(),
            PanelData::RefundReviewDistribution(r) => r.is_empty(),
        }
    }
}

/// One chart of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub metric: Metric,
    pub title: String,
    /// Set only when the result is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub result: PanelData,
}

/// Every computed panel together with the filters that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub filters: FilterContext,
    pub panels: Vec<Panel>,
}

impl DashboardReport {
    pub fn panel(&self, metric: Metric) -> Option<&Panel> {
        self.panels.iter().find(|p| p.metric == metric)
    }
}

/// Entry point for a full recomputation after a filter change.
pub struct Dashboard;

impl Dashboard {
    pub fn compute(store: &DatasetStore, ctx: &FilterContext) -> DashboardReport {
        Self::compute_only(store, ctx, &Metric::ALL)
    }

    /// Compute a subset of the metrics, in the order given.
    pub fn compute_only(
        store: &DatasetStore,
        ctx: &FilterContext,
        metrics: &[Metric],
    ) -> DashboardReport {
        let panels = metrics
            .iter()
            .map(|metric| {
                let result = metric.compute(ctx, store);
                Panel {
                    metric: *metric,
                    title: metric.title(ctx.top_n()),
                    message: result.is_empty().then(|| metric.empty_message()),
                    result,
                }
            })
            .collect();

        DashboardReport {
            filters: ctx.clone(),
            panels,
        }
    }
}
