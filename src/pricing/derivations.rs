//! Derived destination metrics: rating aggregation, occupancy status,
//! reward tiers and booking hints.

use rust_decimal::prelude::*;
use serde::Serialize;

use crate::models::{Category, RewardTier, TransportMode};

/// Occupancy strictly above this percentage is congested
pub const CONGESTION_THRESHOLD_PCT: u32 = 90;

/// Running average after folding in one more rating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingAggregate {
    pub average: Decimal,
    pub count: u32,
}

/// Fold a new 1-5 rating into a running average.
///
/// The result is rounded to one decimal, half away from zero.
pub fn aggregate_rating(average: Decimal, count: u32, rating: u8) -> RatingAggregate {
    let new_count = count + 1;
    let sum = average * Decimal::from(count) + Decimal::from(rating);
    let new_average = (sum / Decimal::from(new_count))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    RatingAggregate {
        average: new_average,
        count: new_count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperationalStatus {
    #[serde(rename = "High Congestion")]
    HighCongestion,
    #[serde(rename = "Optimal Operations")]
    OptimalOperations,
}

impl OperationalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OperationalStatus::HighCongestion => "High Congestion",
            OperationalStatus::OptimalOperations => "Optimal Operations",
        }
    }

    pub fn advisory(&self) -> &'static str {
        match self {
            OperationalStatus::HighCongestion => "Consider limiting new entries temporarily.",
            OperationalStatus::OptimalOperations => "Traffic flow is normal.",
        }
    }
}

impl std::fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    /// Rounded percentage, may exceed 100
    pub percentage: u32,
    /// Percentage clamped to 0..=100 for gauges
    pub display_percentage: u32,
    pub status: OperationalStatus,
}

/// Classify occupancy with a single threshold and no hysteresis.
///
/// A zero capacity reads as 0% when empty and 100% otherwise.
pub fn occupancy_status(current_visitors: u32, capacity: u32) -> Occupancy {
    let percentage = if capacity == 0 {
        if current_visitors == 0 {
            0
        } else {
            100
        }
    } else {
        // round half up: floor((200 * v + c) / (2 * c))
        let visitors = u64::from(current_visitors);
        let capacity = u64::from(capacity);
        let pct = (200 * visitors + capacity) / (2 * capacity);
        u32::try_from(pct).unwrap_or(u32::MAX)
    };

    let status = if percentage > CONGESTION_THRESHOLD_PCT {
        OperationalStatus::HighCongestion
    } else {
        OperationalStatus::OptimalOperations
    };

    Occupancy {
        percentage,
        display_percentage: percentage.min(100),
        status,
    }
}

/// Badge for an author's cumulative likes. Accounts with no likes have none.
pub fn reward_tier(total_likes: u32) -> RewardTier {
    match total_likes {
        0 => RewardTier::None,
        1..=100 => RewardTier::Bronze,
        101..=500 => RewardTier::Silver,
        501..=1000 => RewardTier::Gold,
        _ => RewardTier::Platinum,
    }
}

/// Entry revenue if every current visitor paid the entry fee
pub fn estimated_daily_revenue(current_visitors: u32, entry_fee: Decimal) -> Decimal {
    Decimal::from(current_visitors) * entry_fee
}

/// Travel hint for the selected transport combination.
///
/// Nothing is suggested until an origin is entered.
pub fn transport_suggestion(
    modes: &[TransportMode],
    origin: &str,
    category: Category,
) -> Option<String> {
    if origin.trim().is_empty() {
        return None;
    }

    let suggestion = if modes.len() == 1 && modes[0] == TransportMode::Flight {
        "Flying? You might need a Car or Shuttle for the last mile.".to_string()
    } else if modes.contains(&TransportMode::Train) && category == Category::Nature {
        "Trains are scenic! Ensure there is a station near the park entrance.".to_string()
    } else if modes.len() > 2 {
        "Wow, quite the journey! Make sure to leave buffer time for transfers.".to_string()
    } else if modes.is_empty() {
        "Please select at least one mode of transport.".to_string()
    } else {
        let names: Vec<&str> = modes.iter().map(TransportMode::as_str).collect();
        format!("Great choice combining {}.", names.join(" & "))
    };

    Some(suggestion)
}
