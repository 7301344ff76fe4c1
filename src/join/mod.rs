//! The Join Engine.
//!
//! Builds borrowed, row-oriented views over the [`DatasetStore`]:
//!
//! ```text
//! OrderItem ⋈ Product (category-filtered)   -> ItemProduct
//!           ⋈ Order                          -> FactRow      (the fact table)
//!           ⋈ Review                         -> Reviewed<T>  (fans out per review)
//! ```
//!
//! All joins are inner joins. Rows without a partner on the other side are
//! dropped, never reported as errors. Each join keeps the row order of its
//! left input so downstream aggregation is deterministic.

use std::collections::HashMap;

use tracing::debug;

use crate::dataset::DatasetStore;
use crate::filter::{CategoryFilter, FilterContext, ShippingRange};
use crate::model::{Category, Order, OrderItem, Product, Review, YearMonth};

/// Rows that can be joined to other tables through their order id.
pub trait OrderKeyed {
    fn order_id(&self) -> &str;
}

/// A line item with its product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemProduct<'a> {
    pub item: &'a OrderItem,
    pub product: &'a Product,
}

/// One row of the fact table: line item, product and order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactRow<'a> {
    pub item: &'a OrderItem,
    pub product: &'a Product,
    pub order: &'a Order,
}

impl<'a> FactRow<'a> {
    pub fn category(&self) -> &'a Category {
        &self.product.category
    }

    pub fn price(&self) -> f64 {
        self.item.price
    }

    pub fn shipping_time(&self) -> Option<f64> {
        self.order.shipping_time
    }

    pub fn purchase_month(&self) -> YearMonth {
        self.order.purchase_month()
    }

    pub fn is_refund(&self) -> bool {
        self.order.status.is_refund()
    }
}

/// A row joined with one of its order's reviews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reviewed<'a, T> {
    pub row: T,
    pub review: &'a Review,
}

impl Reviewed<'_, FactRow<'_>> {
    pub fn review_score(&self) -> u8 {
        self.review.review_score
    }
}

impl OrderKeyed for ItemProduct<'_> {
    fn order_id(&self) -> &str {
        &self.item.order_id
    }
}

impl OrderKeyed for FactRow<'_> {
    fn order_id(&self) -> &str {
        &self.order.order_id
    }
}

/// Inner-join line items with the products that pass the category filter.
pub fn join_line_items_with_products<'a>(
    store: &'a DatasetStore,
    categories: &CategoryFilter,
) -> Vec<ItemProduct<'a>> {
    let mut products: HashMap<&str, &Product> = HashMap::new();
    for product in store.products() {
        if categories.allows(&product.category) {
            products.entry(product.product_id.as_str()).or_insert(product);
        }
    }

    let joined: Vec<ItemProduct<'a>> = store
        .items()
        .iter()
        .filter_map(|item| {
            products
                .get(item.product_id.as_str())
                .map(|&product| ItemProduct { item, product })
        })
        .collect();

    debug!(
        items = store.items().len(),
        joined = joined.len(),
        "joined line items with products"
    );
    joined
}

/// Inner-join item/product rows with their orders.
pub fn join_with_orders<'a>(items: &[ItemProduct<'a>], store: &'a DatasetStore) -> Vec<FactRow<'a>> {
    let mut orders: HashMap<&str, &Order> = HashMap::with_capacity(store.orders().len());
    for order in store.orders() {
        orders.entry(order.order_id.as_str()).or_insert(order);
    }

    let joined: Vec<FactRow<'a>> = items
        .iter()
        .filter_map(|ip| {
            orders.get(ip.item.order_id.as_str()).map(|&order| FactRow {
                item: ip.item,
                product: ip.product,
                order,
            })
        })
        .collect();

    debug!(
        input = items.len(),
        joined = joined.len(),
        "joined with orders"
    );
    joined
}

/// Inner-join rows with every review of their order.
///
/// An order with several reviews produces one output row per review.
pub fn join_with_reviews<'a, T>(rows: &[T], store: &'a DatasetStore) -> Vec<Reviewed<'a, T>>
where
    T: OrderKeyed + Copy,
{
    let mut reviews: HashMap<&str, Vec<&Review>> = HashMap::new();
    for review in store.reviews() {
        reviews
            .entry(review.order_id.as_str())
            .or_default()
            .push(review);
    }

    let joined: Vec<Reviewed<'a, T>> = rows
        .iter()
        .flat_map(|row| {
            reviews
                .get(row.order_id())
                .into_iter()
                .flatten()
                .map(move |&review| Reviewed { row: *row, review })
        })
        .collect();

    debug!(
        input = rows.len(),
        joined = joined.len(),
        "joined with reviews"
    );
    joined
}

/// Line items ⋈ products ⋈ orders under the current category filter.
#[derive(Debug, Clone)]
pub struct FactTable<'a> {
    rows: Vec<FactRow<'a>>,
}

impl<'a> FactTable<'a> {
    pub fn build(store: &'a DatasetStore, ctx: &FilterContext) -> Self {
        let items = join_line_items_with_products(store, ctx.categories());
        Self {
            rows: join_with_orders(&items, store),
        }
    }

    pub fn rows(&self) -> &[FactRow<'a>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with a known shipping time inside `range`.
    pub fn within_shipping_range(&self, range: ShippingRange) -> Vec<FactRow<'a>> {
        self.rows
            .iter()
            .filter(|row| row.shipping_time().is_some_and(|t| range.contains(t)))
            .copied()
            .collect()
    }

    /// Rows belonging to canceled orders.
    ///
    /// Status is a property of the whole order: every line item of a
    /// canceled order counts as refunded.
    pub fn refunds(&self) -> Vec<FactRow<'a>> {
        self.rows.iter().filter(|row| row.is_refund()).copied().collect()
    }
}
