//! JSON responses for [`AppError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::common::ApiResponse;
use crate::shared::{ApiError, AppError, DomainError};

pub fn status_of(err: &AppError) -> StatusCode {
    match err {
        AppError::Domain(DomainError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
        AppError::Domain(DomainError::Unauthorized(_)) | AppError::Api(ApiError::Unauthorized) => {
            StatusCode::UNAUTHORIZED
        }
        AppError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Api(ApiError::Status { status, .. }) if (400..500).contains(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
        }
        AppError::Api(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = match self {
            AppError::Domain(DomainError::Validation(fields)) => ApiResponse::<()>::invalid(fields),
            AppError::Api(api) => ApiResponse::error(api.user_message()),
            AppError::Domain(DomainError::Storage(_) | DomainError::Serialization(_)) => {
                ApiResponse::error("Internal error")
            }
            other => ApiResponse::error(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_client_errors_are_relayed() {
        let err = AppError::Api(ApiError::Status {
            status: 409,
            message: "taken".into(),
        });
        assert_eq!(status_of(&err), StatusCode::CONFLICT);

        let err = AppError::Api(ApiError::Status {
            status: 503,
            message: String::new(),
        });
        assert_eq!(status_of(&err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(
            status_of(&AppError::Api(ApiError::Unauthorized)),
            StatusCode::UNAUTHORIZED
        );
    }
}
