use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services;

/// Query string accepted by the back-office account listing.
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[get("/admin/users")]
pub async fn list_users(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<UserListParams>,
) -> impl Responder {
    let params = params.into_inner();
    match services::users::list_users(&user, repo.get_ref(), params.search, params.page) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}
