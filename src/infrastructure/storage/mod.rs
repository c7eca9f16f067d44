use crate::core::errors::DivvyError;
use crate::core::models::{
    balance::Balance, expense::Expense, group::Group, payment::Payment, user::User,
};
use async_trait::async_trait;

/// Ledger persistence plus the balance snapshot source.
///
/// `group_balances` is where net positions are aggregated; the settlement
/// and validation code never derives balances from raw ledgers itself.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_user(&self, user: User) -> Result<(), DivvyError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, DivvyError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DivvyError>;
    async fn save_group(&self, group: Group) -> Result<(), DivvyError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, DivvyError>;
    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, DivvyError>;
    async fn save_expense(&self, expense: Expense) -> Result<(), DivvyError>;
    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<Expense>, DivvyError>;
    async fn save_payment(&self, payment: Payment) -> Result<(), DivvyError>;
    async fn get_group_payments(&self, group_id: &str) -> Result<Vec<Payment>, DivvyError>;

    /// Net balance per member for a group, in member order. The snapshot
    /// sums to zero up to floating tolerance.
    async fn group_balances(&self, group_id: &str) -> Result<Vec<Balance>, DivvyError>;
}

pub mod in_memory;
