//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::pricing::BookingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing x-account-id header")]
    Unauthenticated,

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Booking(e) => match e {
                BookingError::UnknownDestination(_) | BookingError::UnknownAccount(_) => {
                    (StatusCode::NOT_FOUND, "not_found")
                }
                BookingError::RoleNotPermitted { .. } => (StatusCode::FORBIDDEN, "forbidden"),
                BookingError::InvalidConfiguration { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "invalid_configuration")
                }
                BookingError::AlreadyRated { .. } => (StatusCode::CONFLICT, "already_rated"),
                BookingError::MaxDurationReached { .. } => {
                    (StatusCode::CONFLICT, "max_duration_reached")
                }
                BookingError::NoActiveVisit { .. } => (StatusCode::NOT_FOUND, "no_active_visit"),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        tracing::debug!("Request rejected with {}: {}", status, self);

        let (message, details) = match &self {
            AppError::Booking(BookingError::InvalidConfiguration { errors, .. }) => {
                (self.to_string(), errors.clone())
            }
            _ => (self.to_string(), Vec::new()),
        };

        let body = ErrorResponse {
            error_type,
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_errors_map_to_statuses() {
        let cases = [
            (AppError::from(BookingError::UnknownDestination("zz".into())), StatusCode::NOT_FOUND),
            (
                AppError::from(BookingError::RoleNotPermitted {
                    action: "deposit",
                    role: crate::models::Role::Manager,
                }),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::from(BookingError::invalid("bad", vec!["guests".into()])),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(BookingError::AlreadyRated {
                    destination_id: "a1".into(),
                }),
                StatusCode::CONFLICT,
            ),
            (AppError::Unauthenticated, StatusCode::UNAUTHORIZED),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_bad_request() {
        let response = AppError::BadRequest("question is empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
