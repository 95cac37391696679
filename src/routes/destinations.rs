//! Destination browsing handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::CurrentAccount;
use crate::error::Result;
use crate::pricing::requests::{CreateDestinationRequest, DestinationQuery};
use crate::pricing::responses::{DestinationResponse, DestinationSummaryResponse};
use crate::pricing::services;
use crate::AppState;

/// Destination cards, filtered by search term and category
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DestinationQuery>,
) -> Json<Vec<DestinationSummaryResponse>> {
    let search = query.search.as_deref().filter(|term| !term.trim().is_empty());
    let destinations = services::list_destinations(&state.store, search, query.category).await;
    Json(destinations.iter().map(Into::into).collect())
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DestinationResponse>> {
    let destination = services::destination(&state.store, &id).await?;
    Ok(Json(DestinationResponse::from(&destination)))
}

/// List a new destination (managers only)
pub async fn create(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Json(request): Json<CreateDestinationRequest>,
) -> Result<(StatusCode, Json<DestinationResponse>)> {
    let destination = services::add_destination(&state.store, &account_id, request).await?;
    Ok((StatusCode::CREATED, Json(DestinationResponse::from(&destination))))
}
