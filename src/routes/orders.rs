use actix_web::{HttpResponse, Responder, get, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::order::OrderStatus;
use crate::forms::orders::{CheckoutForm, UpdateOrderStatusForm};
use crate::notifier::OrderNotifier;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services;

/// Query string accepted by the order listings.
#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    pub status: Option<OrderStatus>,
    pub page: Option<usize>,
}

#[post("/orders/checkout")]
pub async fn checkout(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    notifier: web::Data<dyn OrderNotifier>,
    form: web::Json<CheckoutForm>,
) -> impl Responder {
    match services::orders::place_order(&user, repo.get_ref(), notifier.get_ref(), form.into_inner())
        .await
    {
        Ok(outcome) => HttpResponse::Created().json(json!({
            "success": true,
            "orderId": outcome.order_id,
            "telegramNotification": outcome.notification_sent,
        })),
        Err(err) => error_response(err),
    }
}

#[get("/orders")]
pub async fn list_my_orders(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<OrderListParams>,
) -> impl Responder {
    match services::orders::list_my_orders(&user, repo.get_ref(), params.page) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/orders/{id}")]
pub async fn get_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    order_id: web::Path<i32>,
) -> impl Responder {
    match services::orders::get_order(&user, repo.get_ref(), order_id.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response(err),
    }
}

#[get("/admin/orders")]
pub async fn list_all_orders(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<OrderListParams>,
) -> impl Responder {
    let params = params.into_inner();
    match services::orders::list_all_orders(&user, repo.get_ref(), params.status, params.page) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[put("/admin/orders/{id}/status")]
pub async fn update_order_status(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    order_id: web::Path<i32>,
    form: web::Json<UpdateOrderStatusForm>,
) -> impl Responder {
    match services::orders::update_order_status(
        &user,
        repo.get_ref(),
        order_id.into_inner(),
        form.status,
    ) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response(err),
    }
}
