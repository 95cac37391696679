//! Booking and pricing engine.
//!
//! Pure calculators and derivations sit underneath the store-backed service
//! functions used by the HTTP routes.

pub mod calculators;
pub mod derivations;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use calculators::{price_breakdown, settle, PriceBreakdown, Settlement};
pub use derivations::{occupancy_status, reward_tier, Occupancy, OperationalStatus};
pub use services::BookingError;
