use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Amount that removes an item when merged into an order
pub const DELETE_AMOUNT: &str = "0";

/// One requested quantity of a catalog item.
///
/// `amount` is raw text: a bare weight for weight-tiered items, or a
/// comma-separated list of `<option>x<quantity>` pairs for enumerated items.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub item_id: u32,
    pub amount: String,
}

impl LineItem {
    pub fn new(item_id: u32, amount: impl Into<String>) -> Self {
        Self {
            item_id,
            amount: amount.into(),
        }
    }

    pub fn is_deletion(&self) -> bool {
        self.amount == DELETE_AMOUNT
    }
}

/// A subscriber's order. Closed orders are kept, never deleted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    pub order_id: Uuid,
    pub subscriber_id: String,
    pub catalog_id: String,
    pub line_items: Vec<LineItem>,
    pub is_paid: bool,
    pub is_closed: bool,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Fresh open order with no line items
    pub fn open(subscriber_id: impl Into<String>, catalog_id: impl Into<String>) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            subscriber_id: subscriber_id.into(),
            catalog_id: catalog_id.into(),
            line_items: Vec::new(),
            is_paid: false,
            is_closed: false,
            delivered_at: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub fn render(&self) -> String {
        let delivered = match self.delivered_at {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "Not yet delivered".to_string(),
        };

        let mut items = String::new();
        for item in &self.line_items {
            items.push_str(&format!("\n{}: {},", item.item_id, item.amount));
        }

        format!(
            "Is Paid: {}\nDelivered on: {}\nOrder Items:{}",
            self.is_paid, delivered, items
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
