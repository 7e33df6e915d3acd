use actix_web::{HttpResponse, Responder, delete, get, post, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::forms::cart::FavoriteProductForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services;

#[get("/favorites")]
pub async fn list_favorites(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match services::favorites::list_favorites(&user, repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err),
    }
}

#[post("/favorites/add")]
pub async fn add_favorite(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<FavoriteProductForm>,
) -> impl Responder {
    match services::favorites::add_favorite(&user, repo.get_ref(), form.product_id) {
        Ok(()) => HttpResponse::Ok().json(json!({"success": true})),
        Err(err) => error_response(err),
    }
}

#[delete("/favorites/remove")]
pub async fn remove_favorite(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<FavoriteProductForm>,
) -> impl Responder {
    match services::favorites::remove_favorite(&user, repo.get_ref(), form.product_id) {
        Ok(()) => HttpResponse::Ok().json(json!({"success": true})),
        Err(err) => error_response(err),
    }
}
