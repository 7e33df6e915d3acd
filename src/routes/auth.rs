use std::path::Path;

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, put, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::config::ServerConfig;
use crate::forms::auth::{
    AvatarUploadForm, ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm,
    UpdateProfileForm,
};
use crate::mailer::ResetMailer;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{self, ServiceError};
use crate::uploads::{IMAGE_EXTENSIONS, store_upload};

#[post("/auth/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    form: web::Json<RegisterForm>,
) -> impl Responder {
    match services::auth::register(repo.get_ref(), &config.jwt_secret, form.into_inner()) {
        Ok((token, user)) => HttpResponse::Created().json(json!({"token": token, "user": user})),
        Err(err) => error_response(err),
    }
}

#[post("/auth/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    match services::auth::login(repo.get_ref(), &config.jwt_secret, form.into_inner()) {
        Ok((token, user)) => HttpResponse::Ok().json(json!({"token": token, "user": user})),
        Err(err) => error_response(err),
    }
}

#[get("/auth/me")]
pub async fn me(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match services::auth::current_user(&user, repo.get_ref()) {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(err) => error_response(err),
    }
}

#[put("/auth/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateProfileForm>,
) -> impl Responder {
    match services::auth::update_profile(&user, repo.get_ref(), form.into_inner()) {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(err) => error_response(err),
    }
}

#[post("/auth/avatar")]
pub async fn upload_avatar(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    form: MultipartForm<AvatarUploadForm>,
) -> impl Responder {
    let stored = match store_upload(
        &form.avatar,
        Path::new(&config.uploads_dir),
        IMAGE_EXTENSIONS,
    ) {
        Ok(name) => name,
        Err(err) => return error_response(ServiceError::Form(err.to_string())),
    };

    match services::auth::set_avatar(&user, repo.get_ref(), format!("/uploads/{stored}")) {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(err) => error_response(err),
    }
}

#[post("/auth/forgot")]
pub async fn forgot_password(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    mailer: web::Data<dyn ResetMailer>,
    form: web::Json<ForgotPasswordForm>,
) -> impl Responder {
    match services::auth::forgot_password(
        repo.get_ref(),
        mailer.get_ref(),
        &config.public_url,
        form.into_inner(),
    )
    .await
    {
        // Always the same body, whether or not the account exists.
        Ok(()) => HttpResponse::Ok()
            .json(json!({"message": "if the account exists, a reset link has been sent"})),
        Err(err) => error_response(err),
    }
}

#[post("/auth/reset")]
pub async fn reset_password(
    repo: web::Data<DieselRepository>,
    form: web::Json<ResetPasswordForm>,
) -> impl Responder {
    match services::auth::reset_password(repo.get_ref(), form.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(json!({"message": "password updated"})),
        Err(err) => error_response(err),
    }
}
