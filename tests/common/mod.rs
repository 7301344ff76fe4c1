//! Shared dataset fixtures for integration tests.
#![allow(dead_code)]

use orderlens::dataset::parse_timestamp;
use orderlens::prelude::*;

#[derive(Default)]
pub struct StoreBuilder {
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    products: Vec<Product>,
    reviews: Vec<Review>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(mut self, id: &str, status: &str, ts: &str, shipping_time: Option<f64>) -> Self {
        let status: OrderStatus = status.parse().unwrap();
        let purchased_at = parse_timestamp(ts).unwrap();
        self.orders
            .push(Order::new(id, status, purchased_at, shipping_time));
        self
    }

    pub fn item(mut self, order_id: &str, product_id: &str, price: f64) -> Self {
        self.items.push(OrderItem::new(order_id, product_id, price));
        self
    }

    pub fn product(mut self, id: &str, category: Option<&str>) -> Self {
        self.products
            .push(Product::new(id, Category::from_label(category)));
        self
    }

    pub fn review(mut self, order_id: &str, score: u8) -> Self {
        self.reviews.push(Review::new(order_id, score));
        self
    }

    pub fn build(self) -> DatasetStore {
        DatasetStore::from_tables(self.orders, self.items, self.products, self.reviews)
    }
}

/// One delivered order with one Electronics item and no reviews.
pub fn single_order_store() -> DatasetStore {
    StoreBuilder::new()
        .order("1", "delivered", "2023-01-15", Some(3.0))
        .item("1", "p1", 100.0)
        .product("p1", Some("Electronics"))
        .build()
}

/// A small marketplace over four months with refunds and reviews.
///
/// ```text
/// order  status     month    ship  items (product/price)        reviews
/// o1     delivered  2023-01   2.0  p1 120, p2 30                5
/// o2     delivered  2023-01   5.0  p3 45                        4
/// o3     canceled   2023-02   -    p2 25, p2 25                 1, 2
/// o4     delivered  2023-04  12.0  p1 80, p4 60                 3
/// o5     canceled   2023-04   9.0  p3 15                        4
/// o6     shipped    2023-04   -    p5 70                        -
/// o7     delivered  2023-03   5.0  p6 10 (unknown product)      5
/// ```
pub fn marketplace_store() -> DatasetStore {
    StoreBuilder::new()
        .product("p1", Some("electronics"))
        .product("p2", Some("toys"))
        .product("p3", Some("books"))
        .product("p4", None)
        .product("p5", Some("garden"))
        .order("o1", "delivered", "2023-01-05 10:00:00", Some(2.0))
        .order("o2", "delivered", "2023-01-20 08:30:00", Some(5.0))
        .order("o3", "canceled", "2023-02-11 14:00:00", None)
        .order("o4", "delivered", "2023-04-02 09:15:00", Some(12.0))
        .order("o5", "canceled", "2023-04-18 19:45:00", Some(9.0))
        .order("o6", "shipped", "2023-04-28 11:00:00", None)
        .order("o7", "delivered", "2023-03-03 12:00:00", Some(5.0))
        .item("o1", "p1", 120.0)
        .item("o1", "p2", 30.0)
        .item("o2", "p3", 45.0)
        .item("o3", "p2", 25.0)
        .item("o3", "p2", 25.0)
        .item("o4", "p1", 80.0)
        .item("o4", "p4", 60.0)
        .item("o5", "p3", 15.0)
        .item("o6", "p5", 70.0)
        .item("o7", "p6", 10.0)
        .item("o9", "p1", 999.0)
        .review("o1", 5)
        .review("o2", 4)
        .review("o3", 1)
        .review("o3", 2)
        .review("o4", 3)
        .review("o5", 4)
        .review("o7", 5)
        .build()
}

pub fn ctx(params: FilterParams) -> FilterContext {
    FilterContext::new(params)
}
