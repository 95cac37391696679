//! Session and wallet handlers

use axum::{extract::State, Json};

use super::CurrentAccount;
use crate::error::Result;
use crate::pricing::requests::{DepositRequest, LoginRequest};
use crate::pricing::responses::AccountResponse;
use crate::pricing::services;
use crate::AppState;

/// Sign in by email; unknown emails get a fresh account
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AccountResponse>> {
    let account = services::login(
        &state.store,
        &request.email,
        request.name.as_deref(),
        request.role,
    )
    .await?;
    Ok(Json(AccountResponse::from(&account)))
}

pub async fn me(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<AccountResponse>> {
    let account = services::account(&state.store, &account_id).await?;
    Ok(Json(AccountResponse::from(&account)))
}

pub async fn deposit(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Json(request): Json<DepositRequest>,
) -> Result<Json<AccountResponse>> {
    let account = services::deposit(&state.store, &account_id, request.amount).await?;
    Ok(Json(AccountResponse::from(&account)))
}

#[cfg(test)]
mod tests {
    use crate::routes::testing::{app, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_demo_tourist() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/session",
            None,
            Some(json!({"email": "alex@wandr.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "u1");
        assert_eq!(body["role"], "tourist");
        assert_eq!(body["wallet_balance"]["amount"], "450");
        assert_eq!(body["wallet_balance"]["currency"], "USD");
    }

    #[tokio::test]
    async fn test_login_requires_email() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/session",
            None,
            Some(json!({"email": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "invalid_configuration");
    }

    #[tokio::test]
    async fn test_deposit_then_me() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/me/deposits",
            Some("u1"),
            Some(json!({"amount": "100"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["wallet_balance"]["amount"], "550");

        let (_, me) = send(&app, Method::GET, "/api/me", Some("u1"), None).await;
        assert_eq!(me["transactions"][0]["kind"], "deposit");
        assert_eq!(me["transactions"][0]["amount"]["amount"], "100");
        assert_eq!(me["transactions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_manager_cannot_deposit() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/me/deposits",
            Some("m1"),
            Some(json!({"amount": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error_type"], "forbidden");
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let (status, _) = send(&app(), Method::GET, "/api/me", Some("nobody"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
