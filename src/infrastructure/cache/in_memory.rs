use crate::core::errors::DivvyError;
use crate::core::models::balance::Balance;
use crate::infrastructure::cache::{Cache, cache_keys};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (Vec<Balance>, chrono::DateTime<chrono::Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_group_balances(&self, group_id: &str) -> Result<Option<Vec<Balance>>, DivvyError> {
        let cache = self.cache.read().await;
        let key = cache_keys::group_balances_key(group_id);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > chrono::Utc::now())
            .map(|(balances, _)| balances.clone()))
    }

    async fn save_group_balances(
        &self,
        group_id: &str,
        balances: &[Balance],
        ttl: std::time::Duration,
    ) -> Result<(), DivvyError> {
        let mut cache = self.cache.write().await;
        let key = cache_keys::group_balances_key(group_id);
        let expiry = chrono::Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| DivvyError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        cache.insert(key, (balances.to_vec(), expiry));
        Ok(())
    }

    async fn invalidate_group_balances(&self, group_id: &str) -> Result<(), DivvyError> {
        let mut cache = self.cache.write().await;
        cache.remove(&cache_keys::group_balances_key(group_id));
        cache.retain(|_, (_, expiry)| *expiry > chrono::Utc::now());
        Ok(())
    }
}
