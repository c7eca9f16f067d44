use crate::core::errors::DivvyError;
use crate::core::models::{
    balance::Balance, expense::Expense, group::Group, payment::Payment, user::User,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    groups: Arc<RwLock<HashMap<String, Group>>>,
    expenses: Arc<RwLock<Vec<Expense>>>,
    payments: Arc<RwLock<Vec<Payment>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_user(&self, user: User) -> Result<(), DivvyError> {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, DivvyError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DivvyError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), DivvyError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, DivvyError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, DivvyError> {
        let groups = self.groups.read().await;
        let mut found: Vec<Group> = groups.values().filter(|g| g.has_member(user_id)).cloned().collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), DivvyError> {
        let mut expenses = self.expenses.write().await;
        expenses.push(expense);
        Ok(())
    }

    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<Expense>, DivvyError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().filter(|e| e.group_id == group_id).cloned().collect())
    }

    async fn save_payment(&self, payment: Payment) -> Result<(), DivvyError> {
        let mut payments = self.payments.write().await;
        payments.push(payment);
        Ok(())
    }

    async fn get_group_payments(&self, group_id: &str) -> Result<Vec<Payment>, DivvyError> {
        let payments = self.payments.read().await;
        Ok(payments.iter().filter(|p| p.group_id == group_id).cloned().collect())
    }

    async fn group_balances(&self, group_id: &str) -> Result<Vec<Balance>, DivvyError> {
        let group = self
            .get_group(group_id)
            .await?
            .ok_or_else(|| DivvyError::GroupNotFound(group_id.to_string()))?;
        if group.member_ids.is_empty() {
            return Ok(Vec::new());
        }

        let expenses = self.get_group_expenses(group_id).await?;
        let payments = self.get_group_payments(group_id).await?;
        let users = self.users.read().await;

        let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
        let per_person_share = total_expenses / group.member_ids.len() as f64;

        let mut balances = Vec::with_capacity(group.member_ids.len());
        for member_id in &group.member_ids {
            let user = users
                .get(member_id)
                .ok_or_else(|| DivvyError::UserNotFound(member_id.clone()))?;

            let total_paid: f64 = expenses
                .iter()
                .filter(|e| e.paid_by == *member_id)
                .map(|e| e.amount)
                .sum();
            let payments_made: f64 = payments
                .iter()
                .filter(|p| p.from_user_id == *member_id)
                .map(|p| p.amount)
                .sum();
            let payments_received: f64 = payments
                .iter()
                .filter(|p| p.to_user_id == *member_id)
                .map(|p| p.amount)
                .sum();

            balances.push(Balance {
                user_id: member_id.clone(),
                username: user.username.clone(),
                balance: total_paid - payments_received - per_person_share + payments_made,
            });
        }

        Ok(balances)
    }
}
