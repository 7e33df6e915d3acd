use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use serde::Deserialize;
use validator::Validate;

/// Maximum allowed length for a display name.
const NAME_MAX_LEN: u64 = 128;

/// Minimum accepted password length.
const PASSWORD_MIN_LEN: u64 = 6;
const PASSWORD_MAX_LEN: u64 = 128;

/// Payload for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = PASSWORD_MIN_LEN, max = PASSWORD_MAX_LEN))]
    pub password: String,
}

/// Payload for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Payload for `PUT /auth/profile`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
}

/// Payload for `POST /auth/forgot`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

/// Payload for `POST /auth/reset`.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordForm {
    pub token: String,
    #[validate(length(min = PASSWORD_MIN_LEN, max = PASSWORD_MAX_LEN))]
    pub password: String,
}

/// Multipart payload for `POST /auth/avatar`.
#[derive(Debug, MultipartForm)]
pub struct AvatarUploadForm {
    #[multipart(limit = "2MB")]
    pub avatar: TempFile,
}
