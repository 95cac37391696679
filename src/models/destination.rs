//! Destination models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::content::Review;

/// Destination category used for browsing filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Nature,
    City,
    Historical,
    Beach,
    Mountain,
    Safari,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Nature => "Nature",
            Category::City => "City",
            Category::Historical => "Historical",
            Category::Beach => "Beach",
            Category::Mountain => "Mountain",
            Category::Safari => "Safari",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ways of reaching a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    Car,
    Bus,
    Train,
    Flight,
    Boat,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Car => "Car",
            TransportMode::Bus => "Bus",
            TransportMode::Train => "Train",
            TransportMode::Flight => "Flight",
            TransportMode::Boat => "Boat",
        }
    }
}

/// Price schedule of a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub entry_fee: Decimal,
    pub tour_guide_fee: Decimal,
    pub feeding_fee_per_day: Decimal,
    pub accommodation_fee_per_night: Decimal,
}

/// A bookable point of interest with pricing and capacity policy
#[derive(Debug, Clone, Serialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub category: Category,
    /// Running mean of all submitted ratings, one decimal
    pub rating: Decimal,
    pub reviews_count: u32,
    pub image_url: String,
    pub images: Vec<String>,
    pub pricing: Pricing,
    /// Most recent first
    pub reviews: Vec<Review>,
    /// Policy ceiling for a single visit, in half-hour steps
    pub max_duration_hours: Decimal,
    pub current_visitors: u32,
    /// Average stay in hours
    pub avg_visit_duration: Decimal,
    /// Max concurrent visitors. Not enforced against `current_visitors`.
    pub capacity: u32,
}

impl Destination {
    /// Case-insensitive match on name or location
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.location.to_lowercase().contains(&term)
    }
}

/// The choices priced by the booking calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfiguration {
    #[serde(default)]
    pub date: Option<chrono::NaiveDate>,
    pub guests: u32,
    #[serde(default)]
    pub include_tour: bool,
    #[serde(default)]
    pub include_feeding: bool,
    #[serde(default)]
    pub nights: u32,
    pub duration_hours: Decimal,
    #[serde(default)]
    pub transport_modes: Vec<TransportMode>,
    #[serde(default)]
    pub origin: String,
}

impl BookingConfiguration {
    /// Transport modes in selection order with repeats removed
    pub fn distinct_transport_modes(&self) -> Vec<TransportMode> {
        let mut modes: Vec<TransportMode> = Vec::with_capacity(self.transport_modes.len());
        for mode in &self.transport_modes {
            if !modes.contains(mode) {
                modes.push(*mode);
            }
        }
        modes
    }

    /// Interaction-layer gating against a destination's policy.
    ///
    /// Returns the list of problems that block confirmation; an empty list
    /// means the booking may be confirmed. The price calculation itself
    /// never rejects a configuration.
    pub fn gating_errors(&self, max_duration_hours: Decimal) -> Vec<String> {
        let mut errors = Vec::new();
        if self.guests < 1 {
            errors.push("At least one guest is required.".to_string());
        }
        if self.duration_hours <= Decimal::ZERO {
            errors.push("Visit duration must be positive.".to_string());
        }
        if self.duration_hours > max_duration_hours {
            errors.push(format!(
                "Visit duration exceeds the {}h limit.",
                max_duration_hours.normalize()
            ));
        }
        if self.transport_modes.is_empty() {
            errors.push("Please select a transportation method.".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config() -> BookingConfiguration {
        BookingConfiguration {
            date: None,
            guests: 2,
            include_tour: true,
            include_feeding: false,
            nights: 0,
            duration_hours: dec!(2),
            transport_modes: vec![TransportMode::Car],
            origin: String::new(),
        }
    }

    #[test]
    fn test_gating_accepts_valid_configuration() {
        assert!(config().gating_errors(dec!(4)).is_empty());
    }

    #[test]
    fn test_gating_rejects_missing_transport() {
        let mut cfg = config();
        cfg.transport_modes.clear();
        let errors = cfg.gating_errors(dec!(4));
        assert_eq!(errors, vec!["Please select a transportation method.".to_string()]);
    }

    #[test]
    fn test_gating_duration_bounded_by_policy() {
        let mut cfg = config();
        cfg.duration_hours = dec!(4);
        assert!(cfg.gating_errors(dec!(4)).is_empty());

        cfg.duration_hours = dec!(4.5);
        assert_eq!(cfg.gating_errors(dec!(4)).len(), 1);
    }

    #[test]
    fn test_gating_half_hour_ceiling() {
        let mut cfg = config();
        cfg.duration_hours = dec!(4.5);
        assert!(cfg.gating_errors(dec!(4.5)).is_empty());

        cfg.duration_hours = dec!(5);
        assert_eq!(
            cfg.gating_errors(dec!(4.5)),
            vec!["Visit duration exceeds the 4.5h limit.".to_string()]
        );
    }

    #[test]
    fn test_gating_requires_guest() {
        let mut cfg = config();
        cfg.guests = 0;
        assert_eq!(cfg.gating_errors(dec!(4)).len(), 1);
    }

    #[test]
    fn test_distinct_transport_modes_keeps_order() {
        let mut cfg = config();
        cfg.transport_modes = vec![
            TransportMode::Train,
            TransportMode::Car,
            TransportMode::Train,
        ];
        assert_eq!(
            cfg.distinct_transport_modes(),
            vec![TransportMode::Train, TransportMode::Car]
        );
    }
}
