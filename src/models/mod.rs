//! Domain models

mod account;
mod content;
mod destination;

pub use account::{Account, RewardTier, Role, Transaction, TransactionKind};
pub use content::{Post, Review};
pub use destination::{BookingConfiguration, Category, Destination, Pricing, TransportMode};
