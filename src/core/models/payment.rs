use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user-proposed transfer from the acting (debtor) user to a named
/// creditor. Validated against the current balance snapshot before it is
/// recorded; never stored itself.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntent {
    pub to_user_id: String,
    pub amount: f64,
}

/// A recorded payment in a group's ledger.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: String,
    pub group_id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount: f64,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
