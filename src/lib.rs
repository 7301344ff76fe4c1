//! # orderlens
//!
//! Filterable descriptive analytics over an e-commerce order dataset.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    DatasetStore                          │
//! │   (orders, order items, products, reviews — read-only)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [join, under a FilterContext]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Fact table: items ⋈ products ⋈ orders             │
//! │                (⋈ reviews where needed)                  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metrics]
//! ┌─────────────────────────────────────────────────────────┐
//! │      Six result tables, each Data(table) or Empty        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [dashboard + render]
//! ┌─────────────────────────────────────────────────────────┐
//! │               Text / JSON for the chart layer            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Every filter change builds a new [`FilterContext`] and recomputes from the
//! base tables; nothing is carried over between runs.

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod filter;
pub mod join;
pub mod metrics;
pub mod model;
pub mod render;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::dashboard::{Dashboard, DashboardReport, Metric, Panel, PanelData};
    pub use crate::dataset::{DatasetSource, DatasetStore, LoadError, TableKind};
    pub use crate::filter::{CategoryFilter, FilterContext, FilterParams, ScoreRange, ShippingRange};
    pub use crate::metrics::{
        refund_review_distribution, refunds_by_category, revenue_by_category, revenue_trend,
        shipping_time_by_category, shipping_time_vs_review, MetricResult,
    };
    pub use crate::model::{Category, Order, OrderItem, OrderStatus, Product, Review, YearMonth};
}

// Also export at crate root for convenience
pub use dashboard::{Dashboard, DashboardReport, Metric};
pub use dataset::{DatasetStore, LoadError};
pub use filter::{FilterContext, FilterParams};
pub use metrics::MetricResult;
