pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::DivvyError;
use crate::core::models::balance::Balance;
use async_trait::async_trait;

/// Cache for raw balance snapshots, keyed by group.
///
/// Only the snapshot itself is ever cached. Partitions, suggestions, and
/// validation results are always recomputed from whichever snapshot is
/// current, so a refresh invalidates everything derived at once.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_group_balances(&self, group_id: &str) -> Result<Option<Vec<Balance>>, DivvyError>;
    async fn save_group_balances(
        &self,
        group_id: &str,
        balances: &[Balance],
        ttl: std::time::Duration,
    ) -> Result<(), DivvyError>;
    async fn invalidate_group_balances(&self, group_id: &str) -> Result<(), DivvyError>;
}
