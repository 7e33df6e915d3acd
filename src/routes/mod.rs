use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod auth;
pub mod cart;
pub mod categories;
pub mod favorites;
pub mod orders;
pub mod products;
pub mod users;

/// Map a service failure onto an HTTP JSON response. Server-side failures
/// get a generic body; the details stay in the log.
pub(crate) fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(json!({"error": err.to_string()}))
        }
        ServiceError::Forbidden => {
            HttpResponse::Forbidden().json(json!({"error": err.to_string()}))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(json!({"error": err.to_string()}))
        }
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({"error": message})),
        ServiceError::StockLimit { max } => HttpResponse::BadRequest().json(json!({
            "error": format!("quantity limit exceeded, {max} available"),
            "max": max,
        })),
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(json!({"error": message}))
        }
        err @ (ServiceError::Mailer(_)
        | ServiceError::Internal(_)
        | ServiceError::Repository(_)) => {
            log::error!("request failed: {err:?}");
            HttpResponse::InternalServerError().json(json!({"error": "internal error"}))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn stock_limit_maps_to_bad_request() {
        let response = error_response(ServiceError::StockLimit { max: 4 });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_conflict() {
        let response = error_response(ServiceError::Conflict("duplicate".to_string()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_failures_map_to_server_error() {
        let response = error_response(ServiceError::Internal("boom".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
