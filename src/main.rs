use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wandr_web::cache::AppCache;
use wandr_web::concierge::{Concierge, GeminiClient, TextGenerator};
use wandr_web::config::Config;
use wandr_web::store::AppStore;
use wandr_web::{build_router, visits, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "wandr_web=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let generator: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            let client: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
                key.clone(),
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
            ));
            Some(client)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY is not set; concierge will answer with fallbacks");
            None
        }
    };
    let concierge = Concierge::new(generator, AppCache::new(config.concierge_cache_ttl));

    let store = AppStore::seeded();
    tokio::spawn(visits::start_visit_countdown(store.clone(), config.visit_tick));

    let app = build_router(AppState { store, concierge });

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server stopped with an error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
