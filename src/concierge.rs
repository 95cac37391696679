//! AI concierge
//!
//! The text generator is an opaque collaborator: a prompt goes in, text comes
//! out, and any failure degrades to a fixed apology string. Nothing here is
//! retried and no error reaches the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::AppCache;

pub const GUIDE_UNAVAILABLE: &str = "AI service is unavailable (Missing API Key).";
pub const GUIDE_EMPTY: &str = "I couldn't generate a response at this moment.";
pub const GUIDE_FAILED: &str = "Sorry, I'm having trouble connecting to the travel network right now.";

pub const ITINERARY_UNAVAILABLE: &str = "AI service is unavailable.";
pub const ITINERARY_EMPTY: &str = "Could not generate itinerary.";
pub const ITINERARY_FAILED: &str = "Error generating itinerary.";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generator rejected the request: {0}")]
    Rejected(String),
}

/// Text-in, text-out generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Gemini `generateContent` REST client
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Rejected(format!("{}: {}", status, detail)));
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text())
    }
}

fn guide_prompt(destination_name: &str, question: &str) -> String {
    format!(
        "You are an expert, high-end travel concierge.\n\
         The user is asking about: \"{}\".\n\
         User Question: \"{}\"\n\n\
         Provide a helpful, enticing, and professional answer in less than 150 words. \
         Focus on the sensory experience and practical tips.",
        destination_name, question
    )
}

fn itinerary_prompt(destination_name: &str, days: u32) -> String {
    format!(
        "Create a brief, bullet-point itinerary for a {}-day trip to {}.\n\
         Include \"Morning\", \"Afternoon\", and \"Evening\" for each day.\n\
         Keep it relaxed and focused on key experiences. Format nicely with markdown.",
        days, destination_name
    )
}

/// Concierge front door used by the routes
#[derive(Clone)]
pub struct Concierge {
    generator: Option<Arc<dyn TextGenerator>>,
    cache: AppCache,
}

impl Concierge {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, cache: AppCache) -> Self {
        Self { generator, cache }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    pub fn cache(&self) -> &AppCache {
        &self.cache
    }

    /// Answer a question about a destination
    pub async fn guide(&self, destination_name: &str, question: &str) -> String {
        let Some(generator) = &self.generator else {
            return GUIDE_UNAVAILABLE.to_string();
        };

        match generator.generate(&guide_prompt(destination_name, question)).await {
            Ok(text) if text.trim().is_empty() => GUIDE_EMPTY.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!("Concierge guide failed for {}: {}", destination_name, e);
                GUIDE_FAILED.to_string()
            }
        }
    }

    /// Day-by-day itinerary for a destination
    pub async fn itinerary(&self, destination_id: &str, destination_name: &str, days: u32) -> String {
        let Some(generator) = &self.generator else {
            return ITINERARY_UNAVAILABLE.to_string();
        };

        let key = AppCache::itinerary_key(destination_id, days);
        if let Some(cached) = self.cache.itineraries.get(&key).await {
            debug!("Cache HIT for itinerary: {}", key);
            return (*cached).clone();
        }
        debug!("Cache MISS for itinerary: {}", key);

        match generator.generate(&itinerary_prompt(destination_name, days)).await {
            Ok(text) if text.trim().is_empty() => ITINERARY_EMPTY.to_string(),
            Ok(text) => {
                self.cache.itineraries.insert(key, Arc::new(text.clone())).await;
                text
            }
            Err(e) => {
                warn!("Concierge itinerary failed for {}: {}", destination_name, e);
                ITINERARY_FAILED.to_string()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted generator for tests
    pub struct StubGenerator {
        pub reply: Result<String, String>,
        pub calls: AtomicUsize,
    }

    impl StubGenerator {
        pub fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    /// Concierge backed by the given stub
    pub fn concierge_with(stub: &Arc<StubGenerator>) -> Concierge {
        let generator: Arc<dyn TextGenerator> = stub.clone();
        Concierge::new(Some(generator), AppCache::default())
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(GenerationError::Rejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{concierge_with, StubGenerator};
    use super::*;

    #[tokio::test]
    async fn test_missing_generator_falls_back() {
        let concierge = Concierge::new(None, AppCache::default());
        assert!(!concierge.is_available());
        assert_eq!(concierge.guide("Petra", "When to go?").await, GUIDE_UNAVAILABLE);
        assert_eq!(concierge.itinerary("a8", "Petra", 3).await, ITINERARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_guide_passes_text_through() {
        let stub = StubGenerator::replying("Arrive at dawn.");
        let concierge = concierge_with(&stub);
        assert_eq!(concierge.guide("Petra", "When to go?").await, "Arrive at dawn.");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_guide_failure_degrades_to_apology() {
        let concierge = concierge_with(&StubGenerator::failing("503"));
        assert_eq!(concierge.guide("Petra", "When to go?").await, GUIDE_FAILED);
    }

    #[tokio::test]
    async fn test_empty_responses_fall_back() {
        let concierge = concierge_with(&StubGenerator::replying("  "));
        assert_eq!(concierge.guide("Petra", "When to go?").await, GUIDE_EMPTY);
        assert_eq!(concierge.itinerary("a8", "Petra", 3).await, ITINERARY_EMPTY);
    }

    #[tokio::test]
    async fn test_itinerary_is_cached_per_day_count() {
        let stub = StubGenerator::replying("Day 1: Siq walk");
        let concierge = concierge_with(&stub);

        concierge.itinerary("a8", "Petra", 3).await;
        concierge.itinerary("a8", "Petra", 3).await;
        assert_eq!(stub.calls(), 1);

        concierge.itinerary("a8", "Petra", 2).await;
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_itinerary_is_not_cached() {
        let stub = StubGenerator::failing("timeout");
        let concierge = concierge_with(&stub);

        assert_eq!(concierge.itinerary("a8", "Petra", 3).await, ITINERARY_FAILED);
        assert_eq!(concierge.itinerary("a8", "Petra", 3).await, ITINERARY_FAILED);
        assert_eq!(stub.calls(), 2);
    }

    #[test]
    fn test_prompts_mention_destination() {
        assert!(guide_prompt("Petra", "Best time?").contains("\"Petra\""));
        assert!(itinerary_prompt("Petra", 3).contains("3-day trip to Petra"));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let parsed: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}]
        }))
        .unwrap();
        assert_eq!(parsed.text(), "Hello world");

        let empty: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty.text(), "");
    }
}
