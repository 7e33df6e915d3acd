use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::ADMIN_ROLE;
use crate::config::ServerConfig;
use crate::domain::user::User;

/// Lifetime of an issued bearer token.
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by the bearer token. The `sub` field is the only trusted
/// source of ownership for carts, orders and favorites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Numeric user identifier.
    pub sub: i32,
    pub email: String,
    pub name: String,
    /// Role tag, either `user` or `admin`.
    pub role: String,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        let exp = (Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
        Self {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            exp,
        }
    }
}

/// Sign the claims into an HS256 bearer token.
pub fn issue_token(
    claims: &AuthenticatedUser,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a bearer token and return its claims. Expired or tampered tokens
/// are rejected.
pub fn decode_token(
    token: &str,
    secret: &str,
) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            return ready(Err(ErrorUnauthorized("authentication is not configured")));
        };

        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) => match decode_token(token, &config.jwt_secret) {
                Ok(claims) => ready(Ok(claims)),
                Err(_) => ready(Err(ErrorUnauthorized("invalid or expired token"))),
            },
            None => ready(Err(ErrorUnauthorized("missing bearer token"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_user(role: &str) -> User {
        let datetime = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        User {
            id: 7,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            role: role.to_string(),
            avatar: None,
            created_at: datetime,
            updated_at: datetime,
        }
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let claims = AuthenticatedUser::from(&sample_user("user"));
        let token = issue_token(&claims, "secret").expect("token issued");

        let decoded = decode_token(&token, "secret").expect("token decoded");
        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.email, "alice@example.com");
        assert_eq!(decoded.role, "user");
        assert!(!decoded.is_admin());
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let claims = AuthenticatedUser::from(&sample_user("admin"));
        let token = issue_token(&claims, "secret").expect("token issued");

        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[test]
    fn admin_role_is_recognised() {
        let claims = AuthenticatedUser::from(&sample_user("admin"));
        assert!(claims.is_admin());
    }
}
