use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::domain::order::{Order, OrderListQuery, OrderStatus};
use crate::forms::orders::CheckoutForm;
use crate::notifier::OrderNotifier;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CartWriter, OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult};

/// Result of a successful checkout, echoed back to the SPA.
#[derive(Debug, Serialize)]
pub struct CheckoutOutcome {
    /// Identifier of the freshly created order.
    pub order_id: i32,
    /// Whether the order notification was delivered.
    pub notification_sent: bool,
}

/// Place an order for the authenticated user.
///
/// The order and its line items become durable first; only then is the
/// notifier invoked. A notification failure is reported in the outcome but
/// never fails the checkout, and the cart is cleared regardless.
pub async fn place_order<R>(
    auth: &AuthenticatedUser,
    repo: &R,
    notifier: &dyn OrderNotifier,
    form: CheckoutForm,
) -> ServiceResult<CheckoutOutcome>
where
    R: OrderWriter + CartWriter,
{
    let new_order = form
        .into_new_order(auth.sub)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let order = repo.create_order(&new_order)?;

    let notification_sent = notifier.order_created(&order).await;

    // The order is already durable; a leftover cart is an annoyance, not a
    // reason to fail the checkout.
    if let Err(err) = repo.clear_cart(auth.sub) {
        log::error!(
            "failed to clear cart for user {} after order {}: {err}",
            auth.sub,
            order.id
        );
    }

    Ok(CheckoutOutcome {
        order_id: order.id,
        notification_sent,
    })
}

/// List the authenticated user's own orders, newest first.
pub fn list_my_orders(
    auth: &AuthenticatedUser,
    repo: &impl OrderReader,
    page: Option<usize>,
) -> ServiceResult<Paginated<Order>> {
    let page = page.unwrap_or(1);
    let query = OrderListQuery::new()
        .user_id(auth.sub)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, orders) = repo.list_orders(query)?;
    Ok(Paginated::new(orders, page, total_pages(total)))
}

/// Fetch a single order. Regular users can only see their own orders; a
/// foreign order is indistinguishable from a missing one.
pub fn get_order(
    auth: &AuthenticatedUser,
    repo: &impl OrderReader,
    order_id: i32,
) -> ServiceResult<Order> {
    let order = repo.get_order_by_id(order_id)?.ok_or(ServiceError::NotFound)?;

    if order.user_id != auth.sub && !auth.is_admin() {
        return Err(ServiceError::NotFound);
    }

    Ok(order)
}

/// List every order in the system. Admin only.
pub fn list_all_orders(
    auth: &AuthenticatedUser,
    repo: &impl OrderReader,
    status: Option<OrderStatus>,
    page: Option<usize>,
) -> ServiceResult<Paginated<Order>> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let page = page.unwrap_or(1);
    let mut query = OrderListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = status {
        query = query.status(status);
    }

    let (total, orders) = repo.list_orders(query)?;
    Ok(Paginated::new(orders, page, total_pages(total)))
}

/// Move an order to a new lifecycle status. Admin only.
pub fn update_order_status(
    auth: &AuthenticatedUser,
    repo: &impl OrderWriter,
    order_id: i32,
    status: OrderStatus,
) -> ServiceResult<Order> {
    if !auth.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    Ok(repo.update_order_status(order_id, status)?)
}

fn total_pages(total: usize) -> usize {
    total.div_ceil(DEFAULT_ITEMS_PER_PAGE).max(1)
}
