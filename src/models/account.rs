//! Account and wallet models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Tourist,
    Manager,
}

/// Cosmetic badge derived from cumulative likes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RewardTier {
    None,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Payment,
}

/// Wallet ledger entry. Never mutated once created.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            id: format!("t_{}", Uuid::new_v4().simple()),
            kind,
            amount,
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
    pub total_likes_received: u32,
    /// Stored value applied against booking costs
    pub wallet_balance: Decimal,
    /// Most recent first
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Create a fresh account for an email that has never signed in
    pub fn new(name: &str, email: &str, role: Role) -> Self {
        let name = if name.trim().is_empty() {
            "New Explorer".to_string()
        } else {
            name.trim().to_string()
        };
        Self {
            id: format!("u_{}", Uuid::new_v4().simple()),
            name,
            email: email.to_string(),
            avatar: format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", email),
            role,
            total_likes_received: 0,
            wallet_balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Apply a ledger entry to the balance and prepend it to the history
    pub fn record(&mut self, transaction: Transaction) -> &Transaction {
        match transaction.kind {
            TransactionKind::Deposit => self.wallet_balance += transaction.amount,
            TransactionKind::Payment => self.wallet_balance -= transaction.amount,
        }
        self.transactions.insert(0, transaction);
        &self.transactions[0]
    }
}
