mod balance_tests;

use std::time::Duration;

use crate::auth::jwt::Session;
use crate::core::models::user::User;
use crate::core::services::DivvyService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryAuditLog;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type TestService = DivvyService<InMemoryAuditLog, InMemoryStorage, InMemoryCache>;

pub fn create_test_service() -> TestService {
    let storage = InMemoryStorage::new();
    let audit = InMemoryAuditLog::new();
    let cache = InMemoryCache::new();
    DivvyService::new(
        storage,
        audit,
        cache,
        "test-secret".to_string(),
        Duration::from_secs(3600),
    )
}

pub async fn register_test_user(service: &TestService, name: &str) -> User {
    service
        .register_user(&format!("{}@example.com", name), name, "password")
        .await
        .unwrap()
}

pub fn session_for(user: &User) -> Session {
    Session {
        user_id: user.id.clone(),
    }
}
