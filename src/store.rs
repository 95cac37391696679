//! Application state
//!
//! All session data lives here: destinations, accounts, the post feed, the set of
//! (account, destination) pairs that already rated, and active visits. Nothing is
//! persisted; the store is seeded at startup and dropped on exit.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Account, Destination, Post};
use crate::seed::{self, SeedData};
use crate::visits::ActiveVisit;

/// Plain session data; every method is synchronous
#[derive(Debug, Default)]
pub struct StoreState {
    /// Newest first
    destinations: Vec<Destination>,
    accounts: HashMap<String, Account>,
    /// Newest first
    posts: Vec<Post>,
    /// One rating per (account, destination) per process lifetime
    rated: HashSet<(String, String)>,
    visits: HashMap<(String, String), ActiveVisit>,
}

impl StoreState {
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            destinations: seed.destinations,
            accounts: seed
                .accounts
                .into_iter()
                .map(|account| (account.id.clone(), account))
                .collect(),
            posts: seed.posts,
            ..Default::default()
        }
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn destination(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn destination_mut(&mut self, id: &str) -> Option<&mut Destination> {
        self.destinations.iter_mut().find(|d| d.id == id)
    }

    pub fn insert_destination(&mut self, destination: Destination) {
        self.destinations.insert(0, destination);
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    pub fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(account.id.clone(), account);
    }

    /// Feed for one destination, newest first
    pub fn posts_for(&self, destination_id: &str) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| p.destination_id == destination_id)
            .cloned()
            .collect()
    }

    pub fn add_post(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    pub fn has_rated(&self, account_id: &str, destination_id: &str) -> bool {
        self.rated
            .contains(&(account_id.to_string(), destination_id.to_string()))
    }

    /// Returns false when the pair had already rated
    pub fn mark_rated(&mut self, account_id: &str, destination_id: &str) -> bool {
        self.rated
            .insert((account_id.to_string(), destination_id.to_string()))
    }

    pub fn visit(&self, account_id: &str, destination_id: &str) -> Option<&ActiveVisit> {
        self.visits
            .get(&(account_id.to_string(), destination_id.to_string()))
    }

    pub fn visit_mut(&mut self, account_id: &str, destination_id: &str) -> Option<&mut ActiveVisit> {
        self.visits
            .get_mut(&(account_id.to_string(), destination_id.to_string()))
    }

    /// Start a visit, replacing any earlier one for the same pair
    pub fn start_visit(&mut self, visit: ActiveVisit) {
        let key = (visit.account_id.clone(), visit.destination_id.clone());
        self.visits.insert(key, visit);
    }

    /// Decrement all unfinished visits, returning how many were ticked
    pub fn tick_visits(&mut self) -> usize {
        let mut ticked = 0;
        for visit in self.visits.values_mut().filter(|v| !v.is_finished()) {
            visit.tick();
            ticked += 1;
        }
        ticked
    }
}

/// Shared handle to the session store
#[derive(Clone, Default)]
pub struct AppStore {
    inner: Arc<RwLock<StoreState>>,
}

impl AppStore {
    pub fn new(state: StoreState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Store loaded with the demo records
    pub fn seeded() -> Self {
        Self::new(StoreState::from_seed(seed::load()))
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.inner.write().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rated_pairs_are_scoped_per_destination() {
        let mut state = StoreState::from_seed(seed::load());
        assert!(state.mark_rated("u1", "a1"));
        assert!(!state.mark_rated("u1", "a1"));
        assert!(state.has_rated("u1", "a1"));
        assert!(!state.has_rated("u1", "a2"));
        assert!(!state.has_rated("u3", "a1"));
    }

    #[test]
    fn test_account_lookup_by_email_ignores_case() {
        let state = StoreState::from_seed(seed::load());
        let account = state.account_by_email("ALEX@wandr.com").unwrap();
        assert_eq!(account.id, "u1");
    }

    #[test]
    fn test_posts_for_destination() {
        let state = StoreState::from_seed(seed::load());
        let posts = state.posts_for("a1");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "p1");
        assert!(state.posts_for("a9").is_empty());
    }

    #[test]
    fn test_tick_skips_finished_visits() {
        let mut state = StoreState::default();
        state.start_visit(ActiveVisit::start("u1", "a1", dec!(1)));
        state.start_visit(ActiveVisit::start("u1", "a2", dec!(0)));
        assert_eq!(state.tick_visits(), 1);
        assert_eq!(state.visit("u1", "a1").unwrap().remaining_minutes, 59);
        assert_eq!(state.visit("u1", "a2").unwrap().remaining_minutes, 0);
    }

    #[tokio::test]
    async fn test_shared_handle_sees_writes() {
        let store = AppStore::seeded();
        let other = store.clone();
        store.write().await.mark_rated("u1", "a1");
        assert!(other.read().await.has_rated("u1", "a1"));
    }
}
