use crate::core::errors::DivvyError;
use crate::core::models::audit::AuditEntry;
use crate::infrastructure::logging::AuditLog;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn record(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), DivvyError> {
        let mut entries = self.entries.write().await;
        entries.push(AuditEntry {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            user_id: user_id.map(String::from),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditEntry>, DivvyError> {
        let entries = self.entries.read().await;
        Ok(entries.clone())
    }
}
