use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never the plaintext.
    #[serde(skip_serializing, default)]
    #[schema(write_only)]
    pub password: String,
}
