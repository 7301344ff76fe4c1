//! Base entities of the order dataset.
//!
//! Every entity is immutable once loaded. Derived views (joins, filtered
//! fact rows) borrow from these instead of copying them.

pub mod category;
pub mod month;
pub mod order;

pub use category::Category;
pub use month::YearMonth;
pub use order::{Order, OrderStatus};

/// A single order line item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub order_id: String,
    pub product_id: String,
    /// Price in currency units.
    pub price: f64,
}

/// A catalog product and its (possibly unknown) category.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: String,
    pub category: Category,
}

/// A customer review. An order may have zero, one or many of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub order_id: String,
    /// Score on the 1-5 scale.
    pub review_score: u8,
}

impl OrderItem {
    pub fn new(order_id: impl Into<String>, product_id: impl Into<String>, price: f64) -> Self {
        Self {
            order_id: order_id.into(),
            product_id: product_id.into(),
            price,
        }
    }
}

impl Product {
    pub fn new(product_id: impl Into<String>, category: Category) -> Self {
        Self {
            product_id: product_id.into(),
            category,
        }
    }
}

impl Review {
    pub fn new(order_id: impl Into<String>, review_score: u8) -> Self {
        Self {
            order_id: order_id.into(),
            review_score,
        }
    }
}
