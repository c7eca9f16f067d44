use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A member's net position in a group, in the group's single currency.
///
/// Negative means the member owes money, positive means they are owed.
/// Snapshots come from the storage layer already aggregated; a group's
/// balances sum to zero up to floating tolerance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Balance {
    pub user_id: String,
    pub username: String,
    pub balance: f64,
}

/// An advisory transfer that would reduce one debtor's and one creditor's
/// outstanding magnitude. Regenerated on every snapshot load, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettlementSuggestion {
    pub from: Balance,
    pub to: Balance,
    pub amount: f64,
}
