//! Booking service functions with store access.
//!
//! These functions take the session store, apply interaction-layer gating and
//! delegate all arithmetic to the pure calculators.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    Account, BookingConfiguration, Category, Destination, Post, Pricing, Review, Role,
    Transaction, TransactionKind,
};
use crate::store::AppStore;
use crate::visits::ActiveVisit;

use super::calculators::{booking_total, price_breakdown, settle, PriceBreakdown, Settlement};
use super::derivations::{
    aggregate_rating, estimated_daily_revenue, occupancy_status, reward_tier,
    transport_suggestion, Occupancy,
};
use super::requests::CreateDestinationRequest;

/// Booking use-case error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("Destination {0} not found")]
    UnknownDestination(String),

    #[error("Account {0} not found")]
    UnknownAccount(String),

    #[error("A {role:?} account cannot {action}")]
    RoleNotPermitted { action: &'static str, role: Role },

    #[error("Configuration error: {message}")]
    InvalidConfiguration { message: String, errors: Vec<String> },

    #[error("Destination {destination_id} was already rated by this account")]
    AlreadyRated { destination_id: String },

    #[error("Max duration reached ({max_duration_hours}h)")]
    MaxDurationReached { max_duration_hours: Decimal },

    #[error("No active visit at destination {destination_id}")]
    NoActiveVisit { destination_id: String },
}

impl BookingError {
    pub fn invalid(message: impl Into<String>, errors: Vec<String>) -> Self {
        BookingError::InvalidConfiguration {
            message: message.into(),
            errors,
        }
    }
}

type Result<T> = std::result::Result<T, BookingError>;

/// Upper bound for any single fee on a listed destination
pub const MAX_FEE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

fn out_of_range(config: &BookingConfiguration) -> BookingError {
    BookingError::invalid(
        "Booking total is out of range",
        vec![format!(
            "guests = {}, nights = {}, duration_hours = {}",
            config.guests, config.nights, config.duration_hours
        )],
    )
}

/// Result of pricing a configuration
#[derive(Debug, Clone)]
pub struct Quote {
    pub breakdown: PriceBreakdown,
    pub settlement: Settlement,
    /// Balance considered, when a caller was identified
    pub wallet_balance: Option<Decimal>,
    pub transport_suggestion: Option<String>,
    /// Problems that block confirmation
    pub advisories: Vec<String>,
}

impl Quote {
    pub fn can_confirm(&self) -> bool {
        self.advisories.is_empty()
    }
}

/// Result of confirming a booking
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub destination_id: String,
    pub destination_name: String,
    pub settlement: Settlement,
    pub payment: Option<Transaction>,
    pub wallet_balance: Decimal,
    pub visit: ActiveVisit,
    pub max_duration_hours: Decimal,
}

/// Destination rating after a review
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub rating: Decimal,
    pub reviews_count: u32,
    pub review: Review,
}

/// Manager view of a destination's operations
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub destination_id: String,
    pub name: String,
    pub current_visitors: u32,
    pub capacity: u32,
    pub max_duration_hours: Decimal,
    pub avg_visit_duration: Decimal,
    pub occupancy: Occupancy,
    pub estimated_daily_revenue: Decimal,
}

impl From<&Destination> for Dashboard {
    fn from(destination: &Destination) -> Self {
        Self {
            destination_id: destination.id.clone(),
            name: destination.name.clone(),
            current_visitors: destination.current_visitors,
            capacity: destination.capacity,
            max_duration_hours: destination.max_duration_hours,
            avg_visit_duration: destination.avg_visit_duration,
            occupancy: occupancy_status(destination.current_visitors, destination.capacity),
            estimated_daily_revenue: estimated_daily_revenue(
                destination.current_visitors,
                destination.pricing.entry_fee,
            ),
        }
    }
}

fn require_role(account: &Account, role: Role, action: &'static str) -> Result<()> {
    if account.role == role {
        Ok(())
    } else {
        Err(BookingError::RoleNotPermitted {
            action,
            role: account.role,
        })
    }
}

// ==================== accounts ====================

/// Sign in with an email, creating a fresh account for unknown emails.
///
/// There is no password; the email alone selects the account.
pub async fn login(
    store: &AppStore,
    email: &str,
    name: Option<&str>,
    role: Option<Role>,
) -> Result<Account> {
    let email = email.trim();
    if email.is_empty() {
        return Err(BookingError::invalid(
            "Email is required",
            vec!["email is empty".to_string()],
        ));
    }

    let mut state = store.write().await;
    if let Some(existing) = state.account_by_email(email) {
        info!("Signed in {} as {}", email, existing.id);
        return Ok(existing.clone());
    }

    let account = Account::new(name.unwrap_or_default(), email, role.unwrap_or_default());
    info!("Created {:?} account {} for {}", account.role, account.id, email);
    state.insert_account(account.clone());
    Ok(account)
}

pub async fn account(store: &AppStore, account_id: &str) -> Result<Account> {
    store
        .read()
        .await
        .account(account_id)
        .cloned()
        .ok_or_else(|| BookingError::UnknownAccount(account_id.to_string()))
}

/// Add money to a tourist's travel fund
pub async fn deposit(store: &AppStore, account_id: &str, amount: Decimal) -> Result<Account> {
    if amount <= Decimal::ZERO {
        return Err(BookingError::invalid(
            "Deposit amount must be positive",
            vec![format!("amount = {}", amount)],
        ));
    }

    let mut state = store.write().await;
    let account = state
        .account_mut(account_id)
        .ok_or_else(|| BookingError::UnknownAccount(account_id.to_string()))?;
    require_role(account, Role::Tourist, "deposit into a travel fund")?;
    if account.wallet_balance.checked_add(amount).is_none() {
        return Err(BookingError::invalid(
            "Deposit would overflow the travel fund",
            vec![format!("amount = {}", amount)],
        ));
    }

    account.record(Transaction::new(
        TransactionKind::Deposit,
        amount,
        "Travel Fund Deposit",
    ));
    info!(
        "Deposited {} into {} (balance {})",
        amount, account.id, account.wallet_balance
    );
    Ok(account.clone())
}

// ==================== destinations ====================

/// Destinations matching a search term and category, newest first
pub async fn list_destinations(
    store: &AppStore,
    search: Option<&str>,
    category: Option<Category>,
) -> Vec<Destination> {
    let state = store.read().await;
    state
        .destinations()
        .iter()
        .filter(|d| search.map_or(true, |term| d.matches_search(term)))
        .filter(|d| category.map_or(true, |c| d.category == c))
        .cloned()
        .collect()
}

pub async fn destination(store: &AppStore, destination_id: &str) -> Result<Destination> {
    store
        .read()
        .await
        .destination(destination_id)
        .cloned()
        .ok_or_else(|| BookingError::UnknownDestination(destination_id.to_string()))
}

/// List a new destination with default policy values
pub async fn add_destination(
    store: &AppStore,
    account_id: &str,
    request: CreateDestinationRequest,
) -> Result<Destination> {
    let mut errors = Vec::new();
    if request.name.trim().is_empty() {
        errors.push("name is required".to_string());
    }
    if request.location.trim().is_empty() {
        errors.push("location is required".to_string());
    }
    for (name, fee) in [
        ("entry_fee", request.entry_fee),
        ("tour_guide_fee", request.tour_guide_fee),
    ] {
        if fee < Decimal::ZERO {
            errors.push(format!("{} cannot be negative", name));
        } else if fee > MAX_FEE {
            errors.push(format!("{} cannot exceed {}", name, MAX_FEE));
        }
    }
    if !errors.is_empty() {
        return Err(BookingError::invalid("Invalid destination", errors));
    }

    let mut state = store.write().await;
    let manager = state
        .account(account_id)
        .ok_or_else(|| BookingError::UnknownAccount(account_id.to_string()))?;
    require_role(manager, Role::Manager, "list a destination")?;

    let image_url = request
        .image_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| "https://picsum.photos/800/600".to_string());

    let destination = Destination {
        id: format!("attr_{}", Uuid::new_v4().simple()),
        name: request.name.trim().to_string(),
        location: request.location.trim().to_string(),
        description: request.description,
        category: request.category,
        rating: Decimal::from(5),
        reviews_count: 0,
        images: vec![image_url.clone()],
        image_url,
        pricing: Pricing {
            entry_fee: request.entry_fee,
            tour_guide_fee: request.tour_guide_fee,
            feeding_fee_per_day: Decimal::from(20),
            accommodation_fee_per_night: Decimal::from(100),
        },
        reviews: Vec::new(),
        max_duration_hours: Decimal::from(4),
        current_visitors: 0,
        avg_visit_duration: Decimal::ZERO,
        capacity: 500,
    };

    info!(
        "Listed {} destination {} ({})",
        destination.category, destination.name, destination.id
    );
    state.insert_destination(destination.clone());
    Ok(destination)
}

// ==================== bookings ====================

/// Price a configuration without side effects.
///
/// Gating problems are reported as advisories, not errors. Only a total too
/// large to represent is rejected.
pub async fn quote(
    store: &AppStore,
    destination_id: &str,
    account_id: Option<&str>,
    config: &BookingConfiguration,
    use_wallet: bool,
) -> Result<Quote> {
    let state = store.read().await;
    let destination = state
        .destination(destination_id)
        .ok_or_else(|| BookingError::UnknownDestination(destination_id.to_string()))?;

    let wallet_balance = match account_id {
        Some(id) => Some(
            state
                .account(id)
                .ok_or_else(|| BookingError::UnknownAccount(id.to_string()))?
                .wallet_balance,
        ),
        None => None,
    };

    let breakdown =
        price_breakdown(&destination.pricing, config).ok_or_else(|| out_of_range(config))?;
    let settlement = settle(
        wallet_balance.unwrap_or(Decimal::ZERO),
        breakdown.total,
        use_wallet,
    );
    let modes = config.distinct_transport_modes();

    Ok(Quote {
        transport_suggestion: transport_suggestion(&modes, &config.origin, destination.category),
        advisories: config.gating_errors(destination.max_duration_hours),
        breakdown,
        settlement,
        wallet_balance,
    })
}

/// Confirm a booking, settle the wallet and start the visit.
///
/// Only the amount taken from the wallet is recorded; any remainder is paid
/// out of band and leaves no transaction.
pub async fn confirm_booking(
    store: &AppStore,
    account_id: &str,
    destination_id: &str,
    config: &BookingConfiguration,
    use_wallet: bool,
) -> Result<BookingConfirmation> {
    let mut state = store.write().await;

    let destination = state
        .destination(destination_id)
        .ok_or_else(|| BookingError::UnknownDestination(destination_id.to_string()))?;
    let destination_name = destination.name.clone();
    let max_duration_hours = destination.max_duration_hours;

    let errors = config.gating_errors(max_duration_hours);
    if !errors.is_empty() {
        return Err(BookingError::invalid("Booking cannot be confirmed", errors));
    }
    let total =
        booking_total(&destination.pricing, config).ok_or_else(|| out_of_range(config))?;

    let account = state
        .account_mut(account_id)
        .ok_or_else(|| BookingError::UnknownAccount(account_id.to_string()))?;
    require_role(account, Role::Tourist, "book a visit")?;

    let settlement = settle(account.wallet_balance, total, use_wallet);
    let payment = if settlement.applied > Decimal::ZERO {
        let recorded = account.record(Transaction::new(
            TransactionKind::Payment,
            settlement.applied,
            format!("Booking: {}", destination_name),
        ));
        Some(recorded.clone())
    } else {
        None
    };
    let wallet_balance = account.wallet_balance;

    let visit = ActiveVisit::start(account_id, destination_id, config.duration_hours);
    state.start_visit(visit.clone());

    info!(
        "Booked {} for {}: total {}, wallet {}, payable {}",
        destination_name, account_id, settlement.total, settlement.applied, settlement.payable
    );

    Ok(BookingConfirmation {
        destination_id: destination_id.to_string(),
        destination_name,
        settlement,
        payment,
        wallet_balance,
        visit,
        max_duration_hours,
    })
}

/// The caller's visit at a destination and the destination's ceiling
pub async fn active_visit(
    store: &AppStore,
    account_id: &str,
    destination_id: &str,
) -> Result<(ActiveVisit, Decimal)> {
    let state = store.read().await;
    let max_duration_hours = state
        .destination(destination_id)
        .ok_or_else(|| BookingError::UnknownDestination(destination_id.to_string()))?
        .max_duration_hours;
    let visit = state
        .visit(account_id, destination_id)
        .cloned()
        .ok_or_else(|| BookingError::NoActiveVisit {
            destination_id: destination_id.to_string(),
        })?;
    Ok((visit, max_duration_hours))
}

/// Add one hour to an active visit, within the destination's ceiling
pub async fn extend_visit(
    store: &AppStore,
    account_id: &str,
    destination_id: &str,
) -> Result<(ActiveVisit, Decimal)> {
    let mut state = store.write().await;
    let max_duration_hours = state
        .destination(destination_id)
        .ok_or_else(|| BookingError::UnknownDestination(destination_id.to_string()))?
        .max_duration_hours;
    let visit = state
        .visit_mut(account_id, destination_id)
        .ok_or_else(|| BookingError::NoActiveVisit {
            destination_id: destination_id.to_string(),
        })?;

    if !visit.extend(max_duration_hours) {
        return Err(BookingError::MaxDurationReached { max_duration_hours });
    }
    info!(
        "Extended visit of {} at {} to {}h",
        account_id, destination_id, visit.duration_hours
    );
    Ok((visit.clone(), max_duration_hours))
}

// ==================== community ====================

/// Rate a destination once per account.
///
/// The once-only rule is a session flag, not an abuse control.
pub async fn submit_review(
    store: &AppStore,
    account_id: &str,
    destination_id: &str,
    rating: u8,
    comment: &str,
) -> Result<ReviewOutcome> {
    if !(1..=5).contains(&rating) {
        return Err(BookingError::invalid(
            "Rating must be between 1 and 5",
            vec![format!("rating = {}", rating)],
        ));
    }

    let mut state = store.write().await;
    if state.destination(destination_id).is_none() {
        return Err(BookingError::UnknownDestination(destination_id.to_string()));
    }
    if state.has_rated(account_id, destination_id) {
        return Err(BookingError::AlreadyRated {
            destination_id: destination_id.to_string(),
        });
    }

    let author = state
        .account(account_id)
        .ok_or_else(|| BookingError::UnknownAccount(account_id.to_string()))?;
    let review = Review {
        id: format!("r_{}", Uuid::new_v4().simple()),
        account_id: author.id.clone(),
        user_name: author.name.clone(),
        user_avatar: author.avatar.clone(),
        rating,
        comment: comment.trim().to_string(),
        created_at: Utc::now(),
    };

    state.mark_rated(account_id, destination_id);

    let destination = state
        .destination_mut(destination_id)
        .ok_or_else(|| BookingError::UnknownDestination(destination_id.to_string()))?;
    let aggregate = aggregate_rating(destination.rating, destination.reviews_count, rating);
    destination.rating = aggregate.average;
    destination.reviews_count = aggregate.count;
    destination.reviews.insert(0, review.clone());

    info!(
        "{} rated {} with {} (now {} over {})",
        account_id, destination_id, rating, aggregate.average, aggregate.count
    );

    Ok(ReviewOutcome {
        rating: aggregate.average,
        reviews_count: aggregate.count,
        review,
    })
}

pub async fn posts(store: &AppStore, destination_id: &str) -> Result<Vec<Post>> {
    let state = store.read().await;
    if state.destination(destination_id).is_none() {
        return Err(BookingError::UnknownDestination(destination_id.to_string()));
    }
    Ok(state.posts_for(destination_id))
}

/// Share a photo in a destination's feed
pub async fn add_post(
    store: &AppStore,
    account_id: &str,
    destination_id: &str,
    image_url: &str,
    caption: &str,
) -> Result<Post> {
    if image_url.trim().is_empty() {
        return Err(BookingError::invalid(
            "An image is required",
            vec!["image_url is empty".to_string()],
        ));
    }

    let mut state = store.write().await;
    if state.destination(destination_id).is_none() {
        return Err(BookingError::UnknownDestination(destination_id.to_string()));
    }
    let author = state
        .account(account_id)
        .ok_or_else(|| BookingError::UnknownAccount(account_id.to_string()))?;
    require_role(author, Role::Tourist, "post to a feed")?;

    let post = Post {
        id: format!("new_{}", Uuid::new_v4().simple()),
        destination_id: destination_id.to_string(),
        account_id: author.id.clone(),
        author_name: author.name.clone(),
        author_avatar: author.avatar.clone(),
        author_tier: reward_tier(author.total_likes_received),
        image_url: image_url.trim().to_string(),
        caption: caption.trim().to_string(),
        likes: 0,
        created_at: Utc::now(),
    };

    info!("{} posted {} at {}", account_id, post.id, destination_id);
    state.add_post(post.clone());
    Ok(post)
}

// ==================== management ====================

pub async fn dashboard(store: &AppStore, account_id: &str, destination_id: &str) -> Result<Dashboard> {
    let state = store.read().await;
    let manager = state
        .account(account_id)
        .ok_or_else(|| BookingError::UnknownAccount(account_id.to_string()))?;
    require_role(manager, Role::Manager, "view the operations dashboard")?;

    state
        .destination(destination_id)
        .map(Dashboard::from)
        .ok_or_else(|| BookingError::UnknownDestination(destination_id.to_string()))
}

/// Tune a destination's duration ceiling and live headcount
pub async fn update_operations(
    store: &AppStore,
    account_id: &str,
    destination_id: &str,
    max_duration_hours: Decimal,
    current_visitors: u32,
) -> Result<Dashboard> {
    let half_hours = max_duration_hours.checked_mul(Decimal::from(2));
    if max_duration_hours < Decimal::ONE || half_hours.map_or(true, |h| !h.fract().is_zero()) {
        return Err(BookingError::invalid(
            "Max duration must be at least one hour, in half-hour steps",
            vec![format!("max_duration_hours = {}", max_duration_hours)],
        ));
    }

    let mut state = store.write().await;
    let manager = state
        .account(account_id)
        .ok_or_else(|| BookingError::UnknownAccount(account_id.to_string()))?;
    require_role(manager, Role::Manager, "update operations")?;

    let destination = state
        .destination_mut(destination_id)
        .ok_or_else(|| BookingError::UnknownDestination(destination_id.to_string()))?;
    destination.max_duration_hours = max_duration_hours;
    destination.current_visitors = current_visitors;

    let dashboard = Dashboard::from(&*destination);
    info!(
        "Updated {}: max {}h, {} visitors ({})",
        destination_id, max_duration_hours, current_visitors, dashboard.occupancy.status
    );
    Ok(dashboard)
}
