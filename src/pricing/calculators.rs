//! Core pricing calculation functions.
//!
//! Pure functions for booking and wallet math - no access to application state.
//! Every quote and confirmation is recomputed from scratch; nothing here is cached.

use rust_decimal::Decimal;

use crate::models::{BookingConfiguration, Pricing};

/// Hours included in every visit before the overtime surcharge applies
pub const OVERTIME_BASELINE_HOURS: u32 = 4;

/// Surcharge per hour beyond the baseline
pub const OVERTIME_RATE_PER_HOUR: u32 = 10;

/// Line items of a booking quote.
///
/// Line items are exact; `total` is the floor of their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub entry: Decimal,
    pub tour_guide: Decimal,
    pub feeding: Decimal,
    pub accommodation: Decimal,
    pub overtime: Decimal,
    pub total: Decimal,
}

/// Price a booking configuration against a destination's schedule.
///
/// ```text
/// entry_fee * guests
///   + tour_guide_fee                                   (if tour)
///   + feeding_fee_per_day * guests * max(nights, 1)    (if feeding)
///   + accommodation_fee_per_night * nights
///   + max(duration_hours - 4, 0) * 10
/// ```
///
/// Feeding is charged for at least one day even when `nights` is zero,
/// while accommodation is not.
///
/// Returns `None` when any term or the sum exceeds the `Decimal` range.
pub fn price_breakdown(pricing: &Pricing, config: &BookingConfiguration) -> Option<PriceBreakdown> {
    let guests = Decimal::from(config.guests);
    let nights = Decimal::from(config.nights);

    let entry = pricing.entry_fee.checked_mul(guests)?;

    let tour_guide = if config.include_tour {
        pricing.tour_guide_fee
    } else {
        Decimal::ZERO
    };

    let feeding = if config.include_feeding {
        let days = Decimal::from(config.nights.max(1));
        pricing.feeding_fee_per_day.checked_mul(guests)?.checked_mul(days)?
    } else {
        Decimal::ZERO
    };

    let accommodation = pricing.accommodation_fee_per_night.checked_mul(nights)?;

    let overtime_hours = config
        .duration_hours
        .checked_sub(Decimal::from(OVERTIME_BASELINE_HOURS))?
        .max(Decimal::ZERO);
    let overtime = overtime_hours.checked_mul(Decimal::from(OVERTIME_RATE_PER_HOUR))?;

    let total = entry
        .checked_add(tour_guide)?
        .checked_add(feeding)?
        .checked_add(accommodation)?
        .checked_add(overtime)?
        .floor();

    Some(PriceBreakdown {
        entry,
        tour_guide,
        feeding,
        accommodation,
        overtime,
        total,
    })
}

/// Total cost of a booking as a whole currency amount.
pub fn booking_total(pricing: &Pricing, config: &BookingConfiguration) -> Option<Decimal> {
    price_breakdown(pricing, config).map(|breakdown| breakdown.total)
}

/// Amount still due after optionally applying the stored-value balance.
pub fn wallet_payable(balance: Decimal, total: Decimal, use_wallet: bool) -> Decimal {
    if use_wallet {
        (total - balance).max(Decimal::ZERO)
    } else {
        total
    }
}

/// Amount taken from the wallet when a booking is confirmed.
pub fn wallet_deduction(balance: Decimal, total: Decimal, use_wallet: bool) -> Decimal {
    if use_wallet {
        total.min(balance)
    } else {
        Decimal::ZERO
    }
}

/// Result of netting a wallet balance against a booking total
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub total: Decimal,
    /// Taken from the wallet and recorded as a payment
    pub applied: Decimal,
    /// Paid out of band; never recorded as a transaction
    pub payable: Decimal,
}

pub fn settle(balance: Decimal, total: Decimal, use_wallet: bool) -> Settlement {
    Settlement {
        total,
        applied: wallet_deduction(balance, total, use_wallet),
        payable: wallet_payable(balance, total, use_wallet),
    }
}
