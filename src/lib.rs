//! Wandr booking engine
//!
//! In-memory travel booking service: destination browsing, live quotes,
//! wallet settlement, visit countdowns, reviews, a photo feed, manager
//! operations and an AI concierge.

pub mod cache;
pub mod concierge;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod seed;
pub mod store;
pub mod visits;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::concierge::Concierge;
use crate::store::AppStore;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: AppStore,
    pub concierge: Concierge,
}

/// Full application router with tracing and CORS layers
pub fn build_router(state: AppState) -> Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
