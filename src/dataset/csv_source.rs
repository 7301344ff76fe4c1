//! CSV decoding of the base tables.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{parse_timestamp, LoadError, LoadResult, TableKind};
use crate::model::{Category, Order, OrderItem, OrderStatus, Product, Review};

#[derive(Debug, Deserialize)]
struct OrderRecord {
    order_id: String,
    order_status: String,
    order_purchase_timestamp: String,
    // Unparseable values count as "not yet delivered".
    #[serde(deserialize_with = "csv::invalid_option")]
    shipping_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ItemRecord {
    order_id: String,
    product_id: String,
    price: f64,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    product_id: String,
    product_category_name_english: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReviewRecord {
    order_id: String,
    review_score: u8,
}

/// Check the header row, then decode every record.
fn read_records<R: Read, T: DeserializeOwned>(table: TableKind, reader: R) -> LoadResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| LoadError::Csv { table, source })?
        .clone();
    for &column in table.required_columns() {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn { table, column });
        }
    }

    rdr.deserialize()
        .map(|record| record.map_err(|source| LoadError::Csv { table, source }))
        .collect()
}

pub(super) fn read_orders<R: Read>(reader: R) -> LoadResult<Vec<Order>> {
    read_records::<_, OrderRecord>(TableKind::Orders, reader)?
        .into_iter()
        .map(|r| {
            let purchased_at = parse_timestamp(&r.order_purchase_timestamp).ok_or_else(|| {
                LoadError::InvalidTimestamp {
                    order_id: r.order_id.clone(),
                    value: r.order_purchase_timestamp.clone(),
                }
            })?;
            let status = r.order_status.parse::<OrderStatus>().unwrap_or_else(|e| match e {});
            Ok(Order::new(r.order_id, status, purchased_at, r.shipping_time))
        })
        .collect()
}

pub(super) fn read_items<R: Read>(reader: R) -> LoadResult<Vec<OrderItem>> {
    Ok(read_records::<_, ItemRecord>(TableKind::OrderItems, reader)?
        .into_iter()
        .map(|r| OrderItem::new(r.order_id, r.product_id, r.price))
        .collect())
}

pub(super) fn read_products<R: Read>(reader: R) -> LoadResult<Vec<Product>> {
    Ok(read_records::<_, ProductRecord>(TableKind::Products, reader)?
        .into_iter()
        .map(|r| {
            Product::new(
                r.product_id,
                Category::from_label(r.product_category_name_english.as_deref()),
            )
        })
        .collect())
}

pub(super) fn read_reviews<R: Read>(reader: R) -> LoadResult<Vec<Review>> {
    Ok(read_records::<_, ReviewRecord>(TableKind::Reviews, reader)?
        .into_iter()
        .map(|r| Review::new(r.order_id, r.review_score))
        .collect())
}
