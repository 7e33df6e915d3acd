use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::domain::order::Order;

/// Upper bound on the notification round trip so a slow Bot API cannot
/// stall the checkout response.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Best-effort collaborator invoked after an order becomes durable. Failures
/// are reported as `false`, never as an error, and must not roll back the
/// order.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn order_created(&self, order: &Order) -> bool;
}

/// Posts a plain-text order summary to the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str, chat_id: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }
}

#[async_trait]
impl OrderNotifier for TelegramNotifier {
    async fn order_created(&self, order: &Order) -> bool {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let body = json!({
            "chat_id": self.chat_id,
            "text": format_order_message(order),
        });

        match self.client.post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                log::error!(
                    "Telegram notification for order {} rejected with status {}",
                    order.id,
                    response.status()
                );
                false
            }
            Err(err) => {
                log::error!("Telegram notification for order {} failed: {err}", order.id);
                false
            }
        }
    }
}

/// Used when no Telegram credentials are configured.
pub struct DisabledNotifier;

#[async_trait]
impl OrderNotifier for DisabledNotifier {
    async fn order_created(&self, _order: &Order) -> bool {
        false
    }
}

fn format_order_message(order: &Order) -> String {
    let mut message = format!(
        "New order #{}\n{} {}\n{}\n{} / {}\n\n",
        order.id, order.first_name, order.last_name, order.address, order.email, order.phone
    );

    for item in &order.items {
        message.push_str(&format!(
            "{} x{} @ {:.2}\n",
            item.name,
            item.quantity,
            item.price_cents as f64 / 100.0
        ));
    }

    message.push_str(&format!("\nTotal: {:.2}", order.total_cents as f64 / 100.0));

    if let Some(payment_method) = order.payment_method.as_deref() {
        message.push_str(&format!("\nPayment: {payment_method}"));
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderItem, OrderStatus};
    use chrono::NaiveDate;

    #[test]
    fn message_includes_contact_items_and_total() {
        let datetime = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        let order = Order {
            id: 15,
            user_id: 3,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: "1 Main St".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+100200300".to_string(),
            payment_method: Some("card".to_string()),
            total_cents: 100_000,
            status: OrderStatus::Processing,
            items: vec![OrderItem {
                product_id: Some(7),
                name: "Lamp".to_string(),
                price_cents: 50_000,
                quantity: 2,
                image: None,
            }],
            created_at: datetime,
            updated_at: datetime,
        };

        let message = format_order_message(&order);
        assert!(message.contains("New order #15"));
        assert!(message.contains("Jane Doe"));
        assert!(message.contains("Lamp x2 @ 500.00"));
        assert!(message.contains("Total: 1000.00"));
        assert!(message.contains("Payment: card"));
    }
}
