use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Member ordering is preserved; balance snapshots are emitted in this
    /// order, which in turn fixes the settlement suggestion order.
    pub member_ids: Vec<String>,
    pub created_by: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Group {
    pub fn has_member(&self, user_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == user_id)
    }
}
