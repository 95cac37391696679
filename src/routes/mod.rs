//! HTTP route table and shared extractors

mod accounts;
mod bookings;
mod community;
mod concierge;
mod dashboard;
mod destinations;

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::request::Parts,
    routing::{get, post, put},
    Json, Router,
};

use crate::error::AppError;
use crate::pricing::responses::HealthResponse;
use crate::AppState;

/// Header carrying the caller's account id
pub const ACCOUNT_HEADER: &str = "x-account-id";

/// Account id of the caller, taken from the `x-account-id` header
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(ACCOUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| CurrentAccount(value.to_string()))
            .ok_or(AppError::Unauthenticated)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/session", post(accounts::login))
        .route("/api/me", get(accounts::me))
        .route("/api/me/deposits", post(accounts::deposit))
        .route(
            "/api/destinations",
            get(destinations::list).post(destinations::create),
        )
        .route("/api/destinations/:id", get(destinations::detail))
        .route("/api/destinations/:id/quote", post(bookings::quote))
        .route("/api/destinations/:id/bookings", post(bookings::confirm))
        .route("/api/destinations/:id/visit", get(bookings::visit))
        .route("/api/destinations/:id/visit/extend", post(bookings::extend))
        .route(
            "/api/destinations/:id/reviews",
            get(community::reviews).post(community::review),
        )
        .route(
            "/api/destinations/:id/posts",
            get(community::posts).post(community::post),
        )
        .route("/api/destinations/:id/dashboard", get(dashboard::show))
        .route("/api/destinations/:id/operations", put(dashboard::update))
        .route(
            "/api/destinations/:id/concierge/guide",
            post(concierge::guide),
        )
        .route(
            "/api/destinations/:id/concierge/itinerary",
            post(concierge::itinerary),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        concierge_available: state.concierge.is_available(),
        cache: state.concierge.cache().stats(),
    })
}


#[cfg(test)]
mod tests {
    use super::testing::{app, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["concierge_available"], false);
    }

    #[tokio::test]
    async fn test_missing_account_header_is_unauthenticated() {
        let (status, body) = send(&app(), Method::GET, "/api/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_type"], "unauthenticated");

        let (status, _) = send(&app(), Method::GET, "/api/me", Some("  "), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
