use std::path::Path;

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::config::ServerConfig;
use crate::forms::products::{
    AddProductForm, EditProductForm, ProductImageForm, UploadProductsForm,
};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{self, ServiceError};
use crate::uploads::{IMAGE_EXTENSIONS, store_upload};

/// Query string accepted by the public catalog listing.
#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    pub search: Option<String>,
    pub category: Option<i32>,
    pub page: Option<usize>,
}

#[get("/products")]
pub async fn list_products(
    repo: web::Data<DieselRepository>,
    params: web::Query<ProductListParams>,
) -> impl Responder {
    let params = params.into_inner();
    match services::products::list_products(repo.get_ref(), params.search, params.category, params.page)
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/products/{id}")]
pub async fn get_product(
    repo: web::Data<DieselRepository>,
    product_id: web::Path<i32>,
) -> impl Responder {
    match services::products::get_product(repo.get_ref(), product_id.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[post("/products")]
pub async fn create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match services::products::create_product(&user, repo.get_ref(), form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err),
    }
}

#[put("/products/{id}")]
pub async fn update_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    product_id: web::Path<i32>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    match services::products::update_product(
        &user,
        repo.get_ref(),
        product_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    product_id: web::Path<i32>,
) -> impl Responder {
    match services::products::delete_product(&user, repo.get_ref(), product_id.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(json!({"success": true})),
        Err(err) => error_response(err),
    }
}

#[post("/products/{id}/image")]
pub async fn upload_product_image(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    product_id: web::Path<i32>,
    form: MultipartForm<ProductImageForm>,
) -> impl Responder {
    // Checked before the file lands on disk; the service checks again.
    if !user.is_admin() {
        return error_response(ServiceError::Forbidden);
    }

    let stored = match store_upload(
        &form.image,
        Path::new(&config.uploads_dir),
        IMAGE_EXTENSIONS,
    ) {
        Ok(name) => name,
        Err(err) => return error_response(ServiceError::Form(err.to_string())),
    };

    match services::products::set_product_image(
        &user,
        repo.get_ref(),
        product_id.into_inner(),
        format!("/uploads/{stored}"),
    ) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[post("/products/upload")]
pub async fn upload_products(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: MultipartForm<UploadProductsForm>,
) -> impl Responder {
    match services::products::import_products(&user, repo.get_ref(), form.into_inner()) {
        Ok(created) => HttpResponse::Created().json(json!({"created": created})),
        Err(err) => error_response(err),
    }
}
