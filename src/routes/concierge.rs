//! AI concierge handlers
//!
//! Generator failures never surface as errors; the concierge answers with a
//! fallback sentence instead.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::pricing::requests::{GuideRequest, ItineraryRequest};
use crate::pricing::responses::ConciergeResponse;
use crate::pricing::services;
use crate::AppState;

const MAX_ITINERARY_DAYS: u32 = 14;

pub async fn guide(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<GuideRequest>,
) -> Result<Json<ConciergeResponse>> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("question is empty".to_string()));
    }

    let destination = services::destination(&state.store, &id).await?;
    let text = state.concierge.guide(&destination.name, question).await;
    Ok(Json(ConciergeResponse {
        destination_id: destination.id,
        text,
    }))
}

pub async fn itinerary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ItineraryRequest>,
) -> Result<Json<ConciergeResponse>> {
    if !(1..=MAX_ITINERARY_DAYS).contains(&request.days) {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_ITINERARY_DAYS
        )));
    }

    let destination = services::destination(&state.store, &id).await?;
    let text = state
        .concierge
        .itinerary(&destination.id, &destination.name, request.days)
        .await;
    Ok(Json(ConciergeResponse {
        destination_id: destination.id,
        text,
    }))
}

#[cfg(test)]
mod tests {
    use crate::concierge::testing::{concierge_with, StubGenerator};
    use crate::concierge::{GUIDE_FAILED, ITINERARY_UNAVAILABLE};
    use crate::routes::testing::{app, app_with, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_guide_answers_with_generator_text() {
        let stub = StubGenerator::replying("Visit at sunrise.");
        let app = app_with(concierge_with(&stub));
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/destinations/a1/concierge/guide",
            None,
            Some(json!({"question": "When is it quiet?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Visit at sunrise.");
        assert_eq!(body["destination_id"], "a1");
    }

    #[tokio::test]
    async fn test_guide_failure_is_still_ok() {
        let app = app_with(concierge_with(&StubGenerator::failing("503")));
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/destinations/a1/concierge/guide",
            None,
            Some(json!({"question": "Parking?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], GUIDE_FAILED);
    }

    #[tokio::test]
    async fn test_blank_question_is_bad_request() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/destinations/a1/concierge/guide",
            None,
            Some(json!({"question": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "bad_request");
    }

    #[tokio::test]
    async fn test_itinerary_defaults_and_caches() {
        let stub = StubGenerator::replying("Day 1: Treasury");
        let app = app_with(concierge_with(&stub));
        for _ in 0..2 {
            let (status, body) = send(
                &app,
                Method::POST,
                "/api/destinations/a8/concierge/itinerary",
                None,
                Some(json!({})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["text"], "Day 1: Treasury");
        }
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_itinerary_without_generator() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/destinations/a8/concierge/itinerary",
            None,
            Some(json!({"days": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], ITINERARY_UNAVAILABLE);

        let (status, _) = send(
            &app(),
            Method::POST,
            "/api/destinations/a8/concierge/itinerary",
            None,
            Some(json!({"days": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
