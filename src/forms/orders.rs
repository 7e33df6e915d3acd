use serde::Deserialize;
use thiserror::Error;

use crate::domain::order::{NewOrder, OrderItem, OrderStatus};
use crate::forms::sanitize_inline_text;

/// Result type returned by the checkout form helpers.
pub type CheckoutFormResult<T> = Result<T, CheckoutFormError>;

/// Errors that can occur while validating a checkout request.
#[derive(Debug, Error)]
pub enum CheckoutFormError {
    /// The basket contained no line items.
    #[error("basket cannot be empty")]
    EmptyBasket,
    /// A required contact field was empty after trimming.
    #[error("{field} is required")]
    MissingField { field: &'static str },
    /// A basket line carried a quantity below 1.
    #[error("basket line {row} has an invalid quantity")]
    InvalidQuantity { row: usize },
    /// A price or the total was not a valid non-negative amount.
    #[error("amount is not a valid price")]
    InvalidAmount,
}

/// Payload for the administrative order-status transition.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusForm {
    pub status: OrderStatus,
}

/// Body of `POST /orders/checkout`, mirroring the SPA's field spelling.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(rename = "formData")]
    pub form_data: CheckoutContactForm,
    pub basket: Vec<BasketLineForm>,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
}

/// Contact and shipping snapshot supplied at checkout. Everything except
/// the payment method is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutContactForm {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// A single basket entry as sent by the SPA.
#[derive(Debug, Deserialize)]
pub struct BasketLineForm {
    pub product_id: i32,
    pub name: String,
    /// Decimal unit price.
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub image: Option<String>,
}

impl CheckoutForm {
    /// Validates the request and converts it into a domain `NewOrder` owned
    /// by `user_id`. The total is stored as supplied, not recomputed from
    /// the line items.
    pub fn into_new_order(self, user_id: i32) -> CheckoutFormResult<NewOrder> {
        if self.basket.is_empty() {
            return Err(CheckoutFormError::EmptyBasket);
        }

        let contact = self.form_data;
        let first_name = required_field(&contact.first_name, "firstName")?;
        let last_name = required_field(&contact.last_name, "lastName")?;
        let address = required_field(&contact.address, "address")?;
        let email = required_field(&contact.email, "email")?;
        let phone = required_field(&contact.phone, "phone")?;

        let payment_method = contact
            .payment_method
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let mut items = Vec::with_capacity(self.basket.len());
        for (index, line) in self.basket.into_iter().enumerate() {
            let row = index + 1;
            if line.quantity < 1 {
                return Err(CheckoutFormError::InvalidQuantity { row });
            }

            items.push(OrderItem {
                product_id: Some(line.product_id),
                name: sanitize_inline_text(&line.name),
                price_cents: to_cents(line.price)?,
                quantity: line.quantity,
                image: line.image,
            });
        }

        let total_cents = to_cents(self.total_amount)?;

        let mut new_order = NewOrder::new(user_id, total_cents)
            .contact(first_name, last_name, address, email, phone)
            .items(items);
        new_order.status = OrderStatus::Processing;

        if let Some(payment_method) = payment_method {
            new_order = new_order.payment_method(payment_method);
        }

        Ok(new_order)
    }
}

fn required_field(value: &str, field: &'static str) -> CheckoutFormResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutFormError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

/// Convert a decimal amount into minor currency units.
fn to_cents(value: f64) -> CheckoutFormResult<i64> {
    if !value.is_finite() || value < 0.0 || value > i64::MAX as f64 / 100.0 {
        return Err(CheckoutFormError::InvalidAmount);
    }
    Ok((value * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> CheckoutContactForm {
        CheckoutContactForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: "1 Main St".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+100200300".to_string(),
            payment_method: Some("card".to_string()),
        }
    }

    fn basket_line(product_id: i32, price: f64, quantity: i32) -> BasketLineForm {
        BasketLineForm {
            product_id,
            name: "Lamp".to_string(),
            price,
            quantity,
            image: None,
        }
    }

    #[test]
    fn converts_prices_to_cents() {
        let form = CheckoutForm {
            form_data: contact(),
            basket: vec![basket_line(7, 500.0, 2)],
            total_amount: 1000.0,
        };

        let order = form.into_new_order(3).expect("expected success");
        assert_eq!(order.user_id, 3);
        assert_eq!(order.total_cents, 100_000);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_id, Some(7));
        assert_eq!(order.items[0].price_cents, 50_000);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.payment_method.as_deref(), Some("card"));
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn rejects_empty_basket() {
        let form = CheckoutForm {
            form_data: contact(),
            basket: Vec::new(),
            total_amount: 0.0,
        };

        assert!(matches!(
            form.into_new_order(3),
            Err(CheckoutFormError::EmptyBasket)
        ));
    }

    #[test]
    fn rejects_blank_phone() {
        let mut data = contact();
        data.phone = "   ".to_string();
        let form = CheckoutForm {
            form_data: data,
            basket: vec![basket_line(1, 10.0, 1)],
            total_amount: 10.0,
        };

        assert!(matches!(
            form.into_new_order(3),
            Err(CheckoutFormError::MissingField { field: "phone" })
        ));
    }

    #[test]
    fn rejects_missing_first_name() {
        let mut data = contact();
        data.first_name = String::new();
        let form = CheckoutForm {
            form_data: data,
            basket: vec![basket_line(1, 10.0, 1)],
            total_amount: 10.0,
        };

        assert!(matches!(
            form.into_new_order(3),
            Err(CheckoutFormError::MissingField { field: "firstName" })
        ));
    }

    #[test]
    fn rejects_zero_quantity_line() {
        let form = CheckoutForm {
            form_data: contact(),
            basket: vec![basket_line(1, 10.0, 0)],
            total_amount: 0.0,
        };

        assert!(matches!(
            form.into_new_order(3),
            Err(CheckoutFormError::InvalidQuantity { row: 1 })
        ));
    }

    #[test]
    fn payment_method_is_optional() {
        let mut data = contact();
        data.payment_method = None;
        let form = CheckoutForm {
            form_data: data,
            basket: vec![basket_line(1, 10.0, 1)],
            total_amount: 10.0,
        };

        let order = form.into_new_order(3).expect("expected success");
        assert!(order.payment_method.is_none());
    }
}
