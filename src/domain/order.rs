use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Possible lifecycle states for a placed order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been placed and awaits fulfilment.
    Processing,
    /// Order has been handed to the carrier.
    Shipped,
    /// Order has reached the customer.
    Delivered,
    /// Order has been cancelled and should not be processed further.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Processing
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            _ => Self::Processing,
        }
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        value.as_str()
    }
}

/// A frozen line-item snapshot within an order. Decoupled from live product
/// price and stock so historical orders stay accurate even if the product
/// later changes or is deleted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderItem {
    /// Referenced product, if it still exists.
    pub product_id: Option<i32>,
    /// Product name at the time of purchase.
    pub name: String,
    /// Unit price at the time of purchase, in the smallest currency unit.
    pub price_cents: i64,
    pub quantity: i32,
    /// Image path at the time of purchase.
    pub image: Option<String>,
}

/// Domain representation of a placed order. Immutable except for `status`,
/// which transitions only via administrative action.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// Owning user identifier.
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub payment_method: Option<String>,
    /// Total amount in the smallest currency unit, stored as supplied at
    /// checkout.
    pub total_cents: i64,
    pub status: OrderStatus,
    /// Line items in basket order.
    pub items: Vec<OrderItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new order with its line items.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Owning user identifier.
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub payment_method: Option<String>,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    /// Timestamp captured when the order payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewOrder {
    /// Build a new order payload with the supplied total and current timestamp.
    pub fn new(user_id: i32, total_cents: i64) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            user_id,
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            payment_method: None,
            total_cents,
            status: OrderStatus::default(),
            items: Vec::new(),
            updated_at: now,
        }
    }

    /// Attach the contact and shipping snapshot to the order payload.
    pub fn contact(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self.address = address.into();
        self.email = email.into();
        self.phone = phone.into();
        self
    }

    /// Attach a payment method to the order payload.
    pub fn payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = Some(payment_method.into());
        self
    }

    /// Attach the line items to the order payload.
    pub fn items(mut self, items: Vec<OrderItem>) -> Self {
        self.items = items;
        self
    }
}

/// Query definition used to list orders.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    /// Optional owning-user filter. Admin listings leave this unset.
    pub user_id: Option<i32>,
    /// Optional status filter.
    pub status: Option<OrderStatus>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for OrderListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderListQuery {
    /// Construct a query that targets all orders.
    pub fn new() -> Self {
        Self {
            user_id: None,
            status: None,
            pagination: None,
        }
    }

    /// Filter the results by owning user.
    pub fn user_id(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
