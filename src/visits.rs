//! Active visit countdown
//!
//! A confirmed booking starts a visit whose remaining time is decremented once
//! per tick by a background task. Visits can be extended an hour at a time up to
//! the destination's maximum duration.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::Serialize;
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tracing::debug;

use crate::store::AppStore;

#[derive(Debug, Clone, Serialize)]
pub struct ActiveVisit {
    pub account_id: String,
    pub destination_id: String,
    pub duration_hours: Decimal,
    pub remaining_minutes: u32,
    pub started_at: DateTime<Utc>,
}

impl ActiveVisit {
    pub fn start(account_id: &str, destination_id: &str, duration_hours: Decimal) -> Self {
        Self {
            account_id: account_id.to_string(),
            destination_id: destination_id.to_string(),
            duration_hours,
            remaining_minutes: minutes_for(duration_hours),
            started_at: Utc::now(),
        }
    }

    /// One more hour must still fit under the destination's ceiling
    pub fn can_extend(&self, max_duration_hours: Decimal) -> bool {
        self.duration_hours
            .checked_add(Decimal::ONE)
            .map_or(false, |extended| extended <= max_duration_hours)
    }

    /// Add an hour to the visit. Returns false when the ceiling is reached.
    pub fn extend(&mut self, max_duration_hours: Decimal) -> bool {
        if !self.can_extend(max_duration_hours) {
            return false;
        }
        self.duration_hours += Decimal::ONE;
        self.remaining_minutes = self.remaining_minutes.saturating_add(60);
        true
    }

    pub fn tick(&mut self) {
        self.remaining_minutes = self.remaining_minutes.saturating_sub(1);
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_minutes == 0
    }

    /// Remaining time as `"2h 5m"`
    pub fn remaining_display(&self) -> String {
        format!("{}h {}m", self.remaining_minutes / 60, self.remaining_minutes % 60)
    }
}

/// Whole minutes in a (possibly fractional) hour count, saturating at `u32::MAX`
pub fn minutes_for(hours: Decimal) -> u32 {
    if hours <= Decimal::ZERO {
        return 0;
    }
    hours
        .checked_mul(Decimal::from(60))
        .and_then(|minutes| minutes.floor().to_u32())
        .unwrap_or(u32::MAX)
}

/// Decrement every active visit once per `period`.
///
/// Runs for the lifetime of the process; there is no cancellation.
pub async fn start_visit_countdown(store: AppStore, period: Duration) {
    let mut interval = interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        let ticked = store.write().await.tick_visits();
        if ticked > 0 {
            debug!("Visit countdown ticked {} active visits", ticked);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_start_sets_remaining_minutes() {
        let visit = ActiveVisit::start("u1", "a1", dec!(2));
        assert_eq!(visit.remaining_minutes, 120);
        assert_eq!(visit.remaining_display(), "2h 0m");

        let visit = ActiveVisit::start("u1", "a1", dec!(2.5));
        assert_eq!(visit.remaining_minutes, 150);
        assert_eq!(visit.remaining_display(), "2h 30m");
    }

    #[test]
    fn test_tick_stops_at_zero() {
        let mut visit = ActiveVisit::start("u1", "a1", dec!(0.05)); // 3 minutes
        assert_eq!(visit.remaining_minutes, 3);
        for _ in 0..5 {
            visit.tick();
        }
        assert_eq!(visit.remaining_minutes, 0);
        assert!(visit.is_finished());
    }

    #[test]
    fn test_extend_up_to_ceiling() {
        let mut visit = ActiveVisit::start("u1", "a1", dec!(2));
        assert!(visit.extend(dec!(4)));
        assert_eq!(visit.duration_hours, dec!(3));
        assert_eq!(visit.remaining_minutes, 180);

        assert!(visit.extend(dec!(4)));
        assert_eq!(visit.duration_hours, dec!(4));

        assert!(!visit.extend(dec!(4)));
        assert_eq!(visit.duration_hours, dec!(4));
        assert_eq!(visit.remaining_minutes, 240);
    }

    #[test]
    fn test_fractional_duration_cannot_overshoot_ceiling() {
        let visit = ActiveVisit::start("u1", "a1", dec!(3.5));
        assert!(!visit.can_extend(dec!(4)));
    }

    #[test]
    fn test_half_hour_ceiling() {
        let mut visit = ActiveVisit::start("u1", "a1", dec!(2.5));
        assert!(visit.extend(dec!(4.5)));
        assert!(visit.extend(dec!(4.5)));
        assert_eq!(visit.duration_hours, dec!(4.5));
        assert_eq!(visit.remaining_minutes, 270);
        assert!(!visit.can_extend(dec!(4.5)));
    }

    #[test]
    fn test_minutes_saturate() {
        assert_eq!(minutes_for(dec!(0)), 0);
        assert_eq!(minutes_for(dec!(-1)), 0);
        assert_eq!(minutes_for(dec!(100000000)), u32::MAX);
        assert_eq!(minutes_for(Decimal::MAX), u32::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_task_ticks_store() {
        let store = AppStore::seeded();
        store
            .write()
            .await
            .start_visit(ActiveVisit::start("u1", "a1", dec!(1)));

        let handle = tokio::spawn(start_visit_countdown(store.clone(), Duration::from_secs(60)));
        tokio::time::sleep(Duration::from_secs(60 * 3 + 1)).await;

        let remaining = store
            .read()
            .await
            .visit("u1", "a1")
            .map(|v| v.remaining_minutes);
        assert_eq!(remaining, Some(57));
        handle.abort();
    }
}
