//! User-generated content attached to destinations

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::account::RewardTier;

/// Photo post in a destination's community feed
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: String,
    pub destination_id: String,
    pub account_id: String,
    pub author_name: String,
    pub author_avatar: String,
    pub author_tier: RewardTier,
    pub image_url: String,
    pub caption: String,
    pub likes: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: String,
    pub account_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
