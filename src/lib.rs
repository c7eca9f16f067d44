pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::{DivvyError, PaymentRejection};
pub use crate::core::services::DivvyService;
pub use crate::core::snapshot::SnapshotCell;
pub use crate::infrastructure::cache::in_memory::InMemoryCache;
pub use crate::infrastructure::logging::in_memory::InMemoryAuditLog;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
