//! Response DTOs for booking API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{
    Account, Category, Destination, Post, Pricing, Review, RewardTier, Role, Transaction,
    TransactionKind,
};
use crate::visits::ActiveVisit;

use super::calculators::PriceBreakdown;
use super::derivations::{occupancy_status, reward_tier, Occupancy, OperationalStatus};
use super::services::{BookingConfirmation, Dashboard, Quote, ReviewOutcome};

/// All amounts are in a single currency
pub const CURRENCY: &str = "USD";

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl From<Decimal> for MoneyResponse {
    fn from(amount: Decimal) -> Self {
        Self {
            amount,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Ledger entry
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: MoneyResponse,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            kind: tx.kind,
            amount: tx.amount.into(),
            description: tx.description.clone(),
            created_at: tx.created_at,
        }
    }
}

/// Signed-in account with wallet and badge
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
    pub total_likes_received: u32,
    pub reward_tier: RewardTier,
    pub wallet_balance: MoneyResponse,
    pub transactions: Vec<TransactionResponse>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            avatar: account.avatar.clone(),
            role: account.role,
            total_likes_received: account.total_likes_received,
            reward_tier: reward_tier(account.total_likes_received),
            wallet_balance: account.wallet_balance.into(),
            transactions: account.transactions.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub entry_fee: MoneyResponse,
    pub tour_guide_fee: MoneyResponse,
    pub feeding_fee_per_day: MoneyResponse,
    pub accommodation_fee_per_night: MoneyResponse,
}

impl From<&Pricing> for PricingResponse {
    fn from(pricing: &Pricing) -> Self {
        Self {
            entry_fee: pricing.entry_fee.into(),
            tour_guide_fee: pricing.tour_guide_fee.into(),
            feeding_fee_per_day: pricing.feeding_fee_per_day.into(),
            accommodation_fee_per_night: pricing.accommodation_fee_per_night.into(),
        }
    }
}

/// Crowd level with its status label
#[derive(Debug, Serialize)]
pub struct OccupancyResponse {
    pub percentage: u32,
    pub display_percentage: u32,
    pub status: OperationalStatus,
    pub advisory: &'static str,
}

impl From<Occupancy> for OccupancyResponse {
    fn from(occupancy: Occupancy) -> Self {
        Self {
            percentage: occupancy.percentage,
            display_percentage: occupancy.display_percentage,
            status: occupancy.status,
            advisory: occupancy.status.advisory(),
        }
    }
}

/// Browse card for a destination
#[derive(Debug, Serialize)]
pub struct DestinationSummaryResponse {
    pub id: String,
    pub name: String,
    pub location: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::str")]
    pub rating: Decimal,
    pub reviews_count: u32,
    pub image_url: String,
    pub entry_fee: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_duration_hours: Decimal,
}

impl From<&Destination> for DestinationSummaryResponse {
    fn from(d: &Destination) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            location: d.location.clone(),
            category: d.category,
            rating: d.rating,
            reviews_count: d.reviews_count,
            image_url: d.image_url.clone(),
            entry_fee: d.pricing.entry_fee.into(),
            max_duration_hours: d.max_duration_hours,
        }
    }
}

/// Full destination page
#[derive(Debug, Serialize)]
pub struct DestinationResponse {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::str")]
    pub rating: Decimal,
    pub reviews_count: u32,
    pub image_url: String,
    pub images: Vec<String>,
    pub pricing: PricingResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_duration_hours: Decimal,
    pub current_visitors: u32,
    pub capacity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub avg_visit_duration: Decimal,
    pub occupancy: OccupancyResponse,
    pub reviews: Vec<Review>,
}

impl From<&Destination> for DestinationResponse {
    fn from(d: &Destination) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            location: d.location.clone(),
            description: d.description.clone(),
            category: d.category,
            rating: d.rating,
            reviews_count: d.reviews_count,
            image_url: d.image_url.clone(),
            images: d.images.clone(),
            pricing: (&d.pricing).into(),
            max_duration_hours: d.max_duration_hours,
            current_visitors: d.current_visitors,
            capacity: d.capacity,
            avg_visit_duration: d.avg_visit_duration,
            occupancy: occupancy_status(d.current_visitors, d.capacity).into(),
            reviews: d.reviews.clone(),
        }
    }
}

/// Line items of a quote
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub entry: MoneyResponse,
    pub tour_guide: MoneyResponse,
    pub feeding: MoneyResponse,
    pub accommodation: MoneyResponse,
    pub overtime: MoneyResponse,
}

impl From<&PriceBreakdown> for BreakdownResponse {
    fn from(b: &PriceBreakdown) -> Self {
        Self {
            entry: b.entry.into(),
            tour_guide: b.tour_guide.into(),
            feeding: b.feeding.into(),
            accommodation: b.accommodation.into(),
            overtime: b.overtime.into(),
        }
    }
}

/// Response for booking quotes
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub breakdown: BreakdownResponse,
    pub total: MoneyResponse,
    pub applied_from_wallet: MoneyResponse,
    pub payable: MoneyResponse,
    pub wallet_balance: Option<MoneyResponse>,
    pub transport_suggestion: Option<String>,
    pub advisories: Vec<String>,
    pub can_confirm: bool,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            breakdown: (&quote.breakdown).into(),
            total: quote.settlement.total.into(),
            applied_from_wallet: quote.settlement.applied.into(),
            payable: quote.settlement.payable.into(),
            wallet_balance: quote.wallet_balance.map(Into::into),
            can_confirm: quote.can_confirm(),
            transport_suggestion: quote.transport_suggestion,
            advisories: quote.advisories,
        }
    }
}

/// Countdown state of a visit
#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub destination_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub duration_hours: Decimal,
    pub remaining_minutes: u32,
    pub remaining_display: String,
    pub finished: bool,
    pub can_extend: bool,
    pub started_at: DateTime<Utc>,
}

impl VisitResponse {
    pub fn new(visit: &ActiveVisit, max_duration_hours: Decimal) -> Self {
        Self {
            destination_id: visit.destination_id.clone(),
            duration_hours: visit.duration_hours,
            remaining_minutes: visit.remaining_minutes,
            remaining_display: visit.remaining_display(),
            finished: visit.is_finished(),
            can_extend: visit.can_extend(max_duration_hours),
            started_at: visit.started_at,
        }
    }
}

/// Response for a confirmed booking
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub destination_id: String,
    pub destination_name: String,
    pub total: MoneyResponse,
    pub applied_from_wallet: MoneyResponse,
    pub payable: MoneyResponse,
    pub payment: Option<TransactionResponse>,
    pub wallet_balance: MoneyResponse,
    pub visit: VisitResponse,
}

impl From<BookingConfirmation> for BookingResponse {
    fn from(c: BookingConfirmation) -> Self {
        Self {
            total: c.settlement.total.into(),
            applied_from_wallet: c.settlement.applied.into(),
            payable: c.settlement.payable.into(),
            payment: c.payment.as_ref().map(Into::into),
            wallet_balance: c.wallet_balance.into(),
            visit: VisitResponse::new(&c.visit, c.max_duration_hours),
            destination_id: c.destination_id,
            destination_name: c.destination_name,
        }
    }
}

/// Destination rating after a new review
#[derive(Debug, Serialize)]
pub struct ReviewSubmittedResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub rating: Decimal,
    pub reviews_count: u32,
    pub review: Review,
}

impl From<ReviewOutcome> for ReviewSubmittedResponse {
    fn from(outcome: ReviewOutcome) -> Self {
        Self {
            rating: outcome.rating,
            reviews_count: outcome.reviews_count,
            review: outcome.review,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

/// Operations dashboard for managers
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub destination_id: String,
    pub name: String,
    pub current_visitors: u32,
    pub capacity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_duration_hours: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub avg_visit_duration: Decimal,
    pub occupancy: OccupancyResponse,
    pub estimated_daily_revenue: MoneyResponse,
}

impl From<Dashboard> for DashboardResponse {
    fn from(d: Dashboard) -> Self {
        Self {
            destination_id: d.destination_id,
            name: d.name,
            current_visitors: d.current_visitors,
            capacity: d.capacity,
            max_duration_hours: d.max_duration_hours,
            avg_visit_duration: d.avg_visit_duration,
            occupancy: d.occupancy.into(),
            estimated_daily_revenue: d.estimated_daily_revenue.into(),
        }
    }
}

/// Concierge answer or itinerary text
#[derive(Debug, Serialize)]
pub struct ConciergeResponse {
    pub destination_id: String,
    pub text: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub concierge_available: bool,
    pub cache: CacheStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_serializes_as_string() {
        let json = serde_json::to_value(MoneyResponse::from(dec!(70))).unwrap();
        assert_eq!(json["amount"], "70");
        assert_eq!(json["currency"], "USD");
    }

    #[test]
    fn test_occupancy_response_carries_advisory() {
        let response = OccupancyResponse::from(occupancy_status(460, 500));
        assert_eq!(response.percentage, 92);
        assert_eq!(response.advisory, OperationalStatus::HighCongestion.advisory());
    }

    #[test]
    fn test_account_response_derives_tier() {
        let seed = crate::seed::load();
        let alex = seed.accounts.iter().find(|a| a.id == "u1").unwrap();
        let response = AccountResponse::from(alex);
        assert_eq!(response.reward_tier, RewardTier::Gold);
        assert_eq!(response.transactions.len(), 2);
        assert_eq!(response.wallet_balance.amount, dec!(450));
    }
}
