use chrono::{DateTime, Utc};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::YearMonth;

/// Order lifecycle status.
///
/// Labels are matched exactly; anything outside the known set (including
/// other spellings such as `Canceled` or `cancelled`) is kept verbatim in
/// `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Created,
    Approved,
    Invoiced,
    Processing,
    Shipped,
    Delivered,
    Unavailable,
    Canceled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Approved => "approved",
            OrderStatus::Invoiced => "invoiced",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Unavailable => "unavailable",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Other(label) => label,
        }
    }

    /// Canceled orders are what the refund metrics count.
    pub fn is_refund(&self) -> bool {
        matches!(self, OrderStatus::Canceled)
    }
}

impl FromStr for OrderStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim() {
            "created" => OrderStatus::Created,
            "approved" => OrderStatus::Approved,
            "invoiced" => OrderStatus::Invoiced,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "unavailable" => OrderStatus::Unavailable,
            "canceled" => OrderStatus::Canceled,
            _ => OrderStatus::Other(s.trim().to_string()),
        };
        Ok(status)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order header.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub status: OrderStatus,
    pub purchased_at: DateTime<Utc>,
    /// Days from purchase to delivery; `None` while delivery is incomplete.
    pub shipping_time: Option<f64>,
}

impl Order {
    pub fn new(
        order_id: impl Into<String>,
        status: OrderStatus,
        purchased_at: DateTime<Utc>,
        shipping_time: Option<f64>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            status,
            purchased_at,
            shipping_time,
        }
    }

    pub fn purchase_month(&self) -> YearMonth {
        YearMonth::of(&self.purchased_at)
    }
}
