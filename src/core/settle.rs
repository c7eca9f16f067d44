//! Greedy generation of settlement suggestions.

use tracing::warn;

use crate::core::classify::{negatives, positives};
use crate::core::models::balance::{Balance, SettlementSuggestion};
use crate::core::money::{EPSILON, is_negative, is_positive, round2};

/// Produce a sequence of transfers that, executed in full, would leave every
/// balance in the snapshot within `EPSILON` of zero.
///
/// The walk is a plain left-to-right greedy fill: debtors in snapshot order,
/// creditors in snapshot order, each pair matched for as much as both sides
/// still carry. The result is deterministic for a given snapshot order but
/// not minimal in transaction count; both the pairing and its order are part
/// of the observable contract and are pinned by tests.
///
/// The input snapshot is never mutated; the scan debits working copies.
pub fn settlement_suggestions(balances: &[Balance]) -> Vec<SettlementSuggestion> {
    let mut debtors: Vec<Balance> = negatives(balances).into_iter().cloned().collect();
    let mut creditors: Vec<Balance> = positives(balances).into_iter().cloned().collect();
    let mut suggestions = Vec::new();

    for debtor in debtors.iter_mut() {
        for creditor in creditors.iter_mut() {
            // Either side may have been exhausted by an earlier match.
            if is_negative(debtor.balance) && is_positive(creditor.balance) {
                let amount = round2(debtor.balance.abs().min(creditor.balance));
                if is_positive(amount) {
                    suggestions.push(SettlementSuggestion {
                        from: debtor.clone(),
                        to: creditor.clone(),
                        amount,
                    });
                    debtor.balance += amount;
                    creditor.balance -= amount;
                }
            }
        }
    }

    // A snapshot that does not sum to zero leaves unmatched magnitude in the
    // working copies. The suggestion list stays advisory either way, but the
    // leftover is worth flagging for the operator.
    let residual: f64 = debtors
        .iter()
        .chain(creditors.iter())
        .map(|b| b.balance.abs())
        .sum();
    if residual > EPSILON {
        warn!(residual, "settlement scan left unmatched balance; snapshot may not sum to zero");
    }

    suggestions
}
