pub mod classify;
pub mod errors;
pub mod models;
pub mod money;
pub mod payment;
pub mod services;
pub mod settle;
pub mod snapshot;
