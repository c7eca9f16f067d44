//! Sign-based partitioning of a balance snapshot.
//!
//! The three filters use the tolerance predicates from [`crate::core::money`]
//! exclusively, so together they partition any snapshot: every balance lands
//! in exactly one of creditors, debtors, or settled.

use crate::core::models::balance::Balance;
use crate::core::money::{is_negative, is_positive, is_zero};

/// Creditors: members who are owed money beyond tolerance.
pub fn positives(balances: &[Balance]) -> Vec<&Balance> {
    balances.iter().filter(|b| is_positive(b.balance)).collect()
}

/// Debtors: members who owe money beyond tolerance.
pub fn negatives(balances: &[Balance]) -> Vec<&Balance> {
    balances.iter().filter(|b| is_negative(b.balance)).collect()
}

/// Settled members: within one minor unit of zero.
pub fn zeros(balances: &[Balance]) -> Vec<&Balance> {
    balances.iter().filter(|b| is_zero(b.balance)).collect()
}
