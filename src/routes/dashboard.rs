//! Manager operations handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::CurrentAccount;
use crate::error::Result;
use crate::pricing::requests::OperationsRequest;
use crate::pricing::responses::DashboardResponse;
use crate::pricing::services;
use crate::AppState;

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<DashboardResponse>> {
    let dashboard = services::dashboard(&state.store, &account_id, &id).await?;
    Ok(Json(dashboard.into()))
}

/// Update the duration ceiling and live headcount
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentAccount(account_id): CurrentAccount,
    Json(request): Json<OperationsRequest>,
) -> Result<Json<DashboardResponse>> {
    let dashboard = services::update_operations(
        &state.store,
        &account_id,
        &id,
        request.max_duration_hours,
        request.current_visitors,
    )
    .await?;
    Ok(Json(dashboard.into()))
}
