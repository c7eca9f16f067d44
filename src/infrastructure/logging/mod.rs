pub mod in_memory;

use crate::core::errors::DivvyError;
use crate::core::models::audit::AuditEntry;
use async_trait::async_trait;

#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), DivvyError>;
    async fn entries(&self) -> Result<Vec<AuditEntry>, DivvyError>;
}
