//! Request DTOs for booking API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{BookingConfiguration, Category, Role};

/// Request to sign in (or sign up) with an email
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Request to add money to the travel fund
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub amount: Decimal,
}

/// Query parameters for destination browsing
#[derive(Debug, Default, Deserialize)]
pub struct DestinationQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Request to list a new destination
#[derive(Debug, Deserialize)]
pub struct CreateDestinationRequest {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub entry_fee: Decimal,
    #[serde(default)]
    pub tour_guide_fee: Decimal,
}

/// Request to price or confirm a booking
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub booking: BookingConfiguration,
    #[serde(default)]
    pub use_wallet: bool,
}

/// Request to rate a destination
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// Request to share a photo
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
}

/// Manager request to tune operations
#[derive(Debug, Deserialize)]
pub struct OperationsRequest {
    pub max_duration_hours: Decimal,
    pub current_visitors: u32,
}

/// Question for the concierge
#[derive(Debug, Deserialize)]
pub struct GuideRequest {
    pub question: String,
}

/// Itinerary length for the concierge
#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    #[serde(default = "default_itinerary_days")]
    pub days: u32,
}

fn default_itinerary_days() -> u32 {
    3
}
