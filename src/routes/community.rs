//! Reviews and photo feed handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::CurrentAccount;
use crate::error::Result;
use crate::models::{Post, Review};
use crate::pricing::requests::{PostRequest, ReviewRequest};
use crate::pricing::responses::{PostsResponse, ReviewSubmittedResponse};
use crate::pricing::services;
use crate::AppState;

/// Reviews for a destination, newest first
pub async fn reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>> {
    let destination = services::destination(&state.store, &id).await?;
    Ok(Json(destination.reviews))
}

/// Rate a destination once
pub async fn review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentAccount(account_id): CurrentAccount,
    Json(request): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewSubmittedResponse>)> {
    let outcome = services::submit_review(
        &state.store,
        &account_id,
        &id,
        request.rating,
        &request.comment,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub async fn posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostsResponse>> {
    let posts = services::posts(&state.store, &id).await?;
    Ok(Json(PostsResponse { posts }))
}

pub async fn post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentAccount(account_id): CurrentAccount,
    Json(request): Json<PostRequest>,
) -> Result<(StatusCode, Json<Post>)> {
    let post = services::add_post(
        &state.store,
        &account_id,
        &id,
        &request.image_url,
        &request.caption,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(post)))
}
