use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single cart row owned by a user. The `(user_id, product_id)` pair is
/// unique; quantity is bounded above by the product's current stock at
/// add/update time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CartItem {
    /// Unique identifier of the cart row.
    pub id: i32,
    /// Owning user identifier.
    pub user_id: i32,
    /// Referenced product identifier.
    pub product_id: i32,
    /// Quantity, always at least 1.
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A cart row joined with the live product fields the storefront renders.
#[derive(Debug, Serialize, Clone)]
pub struct CartLine {
    pub product_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub image: Option<String>,
    /// Current stock of the referenced product, echoed so the UI can cap
    /// the quantity selector.
    pub stock: i32,
    pub quantity: i32,
}
