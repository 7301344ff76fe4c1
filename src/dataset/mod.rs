//! The Dataset Store: four immutable base tables loaded once at startup.
//!
//! Tables are read from header-named UTF-8 CSV files. Only the columns the
//! metrics need are required; extra columns are ignored.
//!
//! ```text
//! orders        order_id, order_status, order_purchase_timestamp, shipping_time
//! order_items   order_id, product_id, price
//! products      product_id, product_category_name_english
//! reviews       order_id, review_score
//! ```

mod csv_source;
mod timestamp;

pub use timestamp::parse_timestamp;

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::model::{Category, Order, OrderItem, Product, Review};

/// Errors raised while loading the base tables. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to open {table} table at {}: {source}", .path.display())]
    Open {
        table: TableKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Table {table} is missing required column '{column}'")]
    MissingColumn {
        table: TableKind,
        column: &'static str,
    },

    #[error("Malformed row in {table} table: {source}")]
    Csv {
        table: TableKind,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid purchase timestamp '{value}' for order {order_id}")]
    InvalidTimestamp { order_id: String, value: String },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// The four base tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Orders,
    OrderItems,
    Products,
    Reviews,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Orders,
        TableKind::OrderItems,
        TableKind::Products,
        TableKind::Reviews,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TableKind::Orders => "orders",
            TableKind::OrderItems => "order_items",
            TableKind::Products => "products",
            TableKind::Reviews => "reviews",
        }
    }

    /// Columns that must be present in the header row.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Orders => &[
                "order_id",
                "order_status",
                "order_purchase_timestamp",
                "shipping_time",
            ],
            TableKind::OrderItems => &["order_id", "product_id", "price"],
            TableKind::Products => &["product_id", "product_category_name_english"],
            TableKind::Reviews => &["order_id", "review_score"],
        }
    }

    /// File name used when a dataset directory is given without overrides.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            TableKind::Orders => "orders_cleaned.csv",
            TableKind::OrderItems => "order_items.csv",
            TableKind::Products => "products_cleaned.csv",
            TableKind::Reviews => "order_reviews_cleaned.csv",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// File locations of the four tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub orders: PathBuf,
    pub order_items: PathBuf,
    pub products: PathBuf,
    pub reviews: PathBuf,
}

impl DatasetSource {
    /// All four tables under `dir` with their default file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            orders: dir.join(TableKind::Orders.default_file_name()),
            order_items: dir.join(TableKind::OrderItems.default_file_name()),
            products: dir.join(TableKind::Products.default_file_name()),
            reviews: dir.join(TableKind::Reviews.default_file_name()),
        }
    }

    pub fn path(&self, table: TableKind) -> &Path {
        match table {
            TableKind::Orders => &self.orders,
            TableKind::OrderItems => &self.order_items,
            TableKind::Products => &self.products,
            TableKind::Reviews => &self.reviews,
        }
    }
}

/// Read-only store of the base tables.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    products: Vec<Product>,
    reviews: Vec<Review>,
}

impl DatasetStore {
    /// Build a store from already-materialized tables.
    pub fn from_tables(
        orders: Vec<Order>,
        items: Vec<OrderItem>,
        products: Vec<Product>,
        reviews: Vec<Review>,
    ) -> Self {
        Self {
            orders,
            items,
            products,
            reviews,
        }
    }

    /// Load all four tables from CSV files.
    pub fn load(source: &DatasetSource) -> LoadResult<Self> {
        let open = |table: TableKind| {
            let path = source.path(table);
            File::open(path).map_err(|e| LoadError::Open {
                table,
                path: path.to_path_buf(),
                source: e,
            })
        };

        let store = Self::from_readers(
            open(TableKind::Orders)?,
            open(TableKind::OrderItems)?,
            open(TableKind::Products)?,
            open(TableKind::Reviews)?,
        )?;
        info!(
            orders = store.orders.len(),
            items = store.items.len(),
            products = store.products.len(),
            reviews = store.reviews.len(),
            "dataset loaded"
        );
        Ok(store)
    }

    /// Load all four tables from CSV readers.
    pub fn from_readers<O, I, P, R>(orders: O, items: I, products: P, reviews: R) -> LoadResult<Self>
    where
        O: Read,
        I: Read,
        P: Read,
        R: Read,
    {
        Ok(Self {
            orders: csv_source::read_orders(orders)?,
            items: csv_source::read_items(items)?,
            products: csv_source::read_products(products)?,
            reviews: csv_source::read_reviews(reviews)?,
        })
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Distinct product categories, sorted, for the category picker.
    pub fn categories(&self) -> Vec<Category> {
        self.products
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whole-day bounds of the shipping time column, for the range slider.
    ///
    /// Returns `None` when no order has a shipping time.
    pub fn shipping_time_bounds(&self) -> Option<(i64, i64)> {
        let mut times = self
            .orders
            .iter()
            .filter_map(|o| o.shipping_time)
            .filter(|t| t.is_finite());
        let first = times.next()?;
        let (min, max) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some((min.floor() as i64, max.ceil() as i64))
    }
}
