use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services;

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match services::categories::list_categories(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

#[get("/categories/{id}")]
pub async fn get_category(
    repo: web::Data<DieselRepository>,
    category_id: web::Path<i32>,
) -> impl Responder {
    match services::categories::get_category(repo.get_ref(), category_id.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[post("/categories")]
pub async fn create_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    match services::categories::create_category(&user, repo.get_ref(), form.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => error_response(err),
    }
}

#[put("/categories/{id}")]
pub async fn update_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    category_id: web::Path<i32>,
    form: web::Json<EditCategoryForm>,
) -> impl Responder {
    match services::categories::update_category(
        &user,
        repo.get_ref(),
        category_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    category_id: web::Path<i32>,
) -> impl Responder {
    match services::categories::delete_category(&user, repo.get_ref(), category_id.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(json!({"success": true})),
        Err(err) => error_response(err),
    }
}
