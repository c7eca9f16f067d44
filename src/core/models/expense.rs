use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A shared expense, split equally across the group's members.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateExpense {
    pub amount: f64,
    pub description: String,
}
