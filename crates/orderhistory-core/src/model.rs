use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Text layout of the `orders.date` column.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub placed_at: NaiveDateTime,
    pub customer_id: i64,
    pub total: f64,
}

impl Order {
    /// Render `placed_at` the way it is stored.
    pub fn date_text(&self) -> String {
        self.placed_at.format(ORDER_DATE_FORMAT).to_string()
    }
}

/// One item of an order with the number of units bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: i64,
    pub item_id: String,
    pub quantity: u32,
}

/// An order together with its lines, as produced by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedOrder {
    pub order: Order,
    pub lines: Vec<OrderLine>,
    /// Number of item picks sampled for this order; an upper bound on `lines.len()`.
    pub attempts: u32,
}

impl GeneratedOrder {
    /// Picks that landed on an item already in the basket.
    pub fn skipped_picks(&self) -> u32 {
        let lines = u32::try_from(self.lines.len()).unwrap_or(u32::MAX);
        self.attempts.saturating_sub(lines)
    }
}

/// Order listing row for a customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub placed_at: NaiveDateTime,
    pub order_id: i64,
    pub total: f64,
}

/// Item line of an order joined with the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    pub item_name: String,
    pub item_price: f64,
    pub quantity: i64,
}
