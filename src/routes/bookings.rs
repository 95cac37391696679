//! Quote, booking and visit handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::CurrentAccount;
use crate::error::Result;
use crate::pricing::requests::BookingRequest;
use crate::pricing::responses::{BookingResponse, QuoteResponse, VisitResponse};
use crate::pricing::services;
use crate::AppState;

/// Live price for a configuration. Anonymous callers get no wallet netting.
pub async fn quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Option<CurrentAccount>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<QuoteResponse>> {
    let account_id = caller.as_ref().map(|CurrentAccount(id)| id.as_str());
    let quote = services::quote(
        &state.store,
        &id,
        account_id,
        &request.booking,
        request.use_wallet,
    )
    .await?;
    Ok(Json(quote.into()))
}

pub async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentAccount(account_id): CurrentAccount,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let confirmation = services::confirm_booking(
        &state.store,
        &account_id,
        &id,
        &request.booking,
        request.use_wallet,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(confirmation.into())))
}

pub async fn visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<VisitResponse>> {
    let (visit, max_duration_hours) = services::active_visit(&state.store, &account_id, &id).await?;
    Ok(Json(VisitResponse::new(&visit, max_duration_hours)))
}

/// Add an hour to the caller's visit
pub async fn extend(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<VisitResponse>> {
    let (visit, max_duration_hours) = services::extend_visit(&state.store, &account_id, &id).await?;
    Ok(Json(VisitResponse::new(&visit, max_duration_hours)))
}

#[cfg(test)]
mod tests {
    use crate::routes::testing::{app, send};
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    fn booking(duration: &str, modes: Value, use_wallet: bool) -> Value {
        json!({
            "booking": {
                "guests": 2,
                "include_tour": true,
                "include_feeding": false,
                "nights": 0,
                "duration_hours": duration,
                "transport_modes": modes,
                "origin": ""
            },
            "use_wallet": use_wallet
        })
    }

    #[tokio::test]
    async fn test_anonymous_quote() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/destinations/a1/quote",
            None,
            Some(booking("2", json!(["Car"]), true)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"]["amount"], "70");
        assert_eq!(body["payable"]["amount"], "70");
        assert_eq!(body["wallet_balance"], Value::Null);
        assert_eq!(body["can_confirm"], true);
        assert_eq!(body["transport_suggestion"], Value::Null);
    }

    #[tokio::test]
    async fn test_quote_with_unrepresentable_total() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/destinations/a1/quote",
            None,
            Some(json!({
                "booking": {
                    "guests": 1,
                    "duration_hours": "79228162514264337593543950335",
                    "transport_modes": ["Car"]
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "invalid_configuration");
        assert_eq!(body["message"], "Booking total is out of range");
    }

    #[tokio::test]
    async fn test_quote_reports_missing_transport() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/destinations/a1/quote",
            Some("u1"),
            Some(booking("2", json!([]), true)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["can_confirm"], false);
        assert_eq!(
            body["advisories"][0],
            "Please select a transportation method."
        );
        assert_eq!(body["applied_from_wallet"]["amount"], "70");
        assert_eq!(body["payable"]["amount"], "0");
    }

    #[tokio::test]
    async fn test_confirm_then_extend_visit() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/destinations/a1/bookings",
            Some("u1"),
            Some(booking("3", json!(["Train", "Train"]), true)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["payment"]["amount"]["amount"], "70");
        assert_eq!(body["wallet_balance"]["amount"], "380");
        assert_eq!(body["visit"]["remaining_minutes"], 180);
        assert_eq!(body["visit"]["can_extend"], true);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/destinations/a1/visit/extend",
            Some("u1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining_display"], "4h 0m");
        assert_eq!(body["can_extend"], false);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/destinations/a1/visit/extend",
            Some("u1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error_type"], "max_duration_reached");
    }

    #[tokio::test]
    async fn test_confirm_rejects_over_ceiling() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/destinations/a9/bookings",
            Some("u1"),
            Some(booking("3", json!(["Bus"]), false)),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_confirm_requires_account() {
        let (status, _) = send(
            &app(),
            Method::POST,
            "/api/destinations/a1/bookings",
            None,
            Some(booking("2", json!(["Car"]), false)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_visit_without_booking() {
        let (status, body) = send(
            &app(),
            Method::GET,
            "/api/destinations/a1/visit",
            Some("u1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_type"], "no_active_visit");
    }
}
