use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::forms::cart::{CartProductForm, UpdateCartForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services;

#[get("/cart")]
pub async fn load_cart(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match services::cart::load_cart(&user, repo.get_ref()) {
        Ok(lines) => HttpResponse::Ok().json(lines),
        Err(err) => error_response(err),
    }
}

#[post("/cart/add")]
pub async fn add_to_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CartProductForm>,
) -> impl Responder {
    match services::cart::add_to_cart(&user, repo.get_ref(), form.product_id) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => error_response(err),
    }
}

#[put("/cart/update")]
pub async fn update_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateCartForm>,
) -> impl Responder {
    match services::cart::update_quantity(&user, repo.get_ref(), form.product_id, form.quantity) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => error_response(err),
    }
}

#[delete("/cart/remove")]
pub async fn remove_from_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CartProductForm>,
) -> impl Responder {
    match services::cart::remove_from_cart(&user, repo.get_ref(), form.product_id) {
        Ok(()) => HttpResponse::Ok().json(json!({"success": true})),
        Err(err) => error_response(err),
    }
}

#[delete("/cart/clear")]
pub async fn clear_cart(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match services::cart::clear_cart(&user, repo.get_ref()) {
        Ok(removed) => HttpResponse::Ok().json(json!({"success": true, "removed": removed})),
        Err(err) => error_response(err),
    }
}
