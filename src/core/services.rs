use crate::auth::jwt::{Claims, JwtService, Session};
use crate::constants::{
    BALANCES_QUERIED, EXPENSE_ADDED, GROUP_CREATED, PAYMENT_RECORDED, SUGGESTIONS_QUERIED,
    USER_LOGGED_IN, USER_REGISTERED,
};
use crate::core::errors::{DivvyError, FieldError};
use crate::core::models::{
    audit::AuditEntry,
    balance::{Balance, SettlementSuggestion},
    expense::{CreateExpense, Expense},
    group::Group,
    payment::{Payment, PaymentIntent},
    user::User,
};
use crate::core::{payment, settle};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::AuditLog;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

/// Orchestrates the settlement engine over its collaborators: the storage
/// ledger (balance snapshot source and payment sink), the snapshot cache,
/// and the audit trail. Every group-scoped call takes the acting user's
/// [`Session`] explicitly.
pub struct DivvyService<L: AuditLog, S: Storage, C: Cache> {
    storage: S,
    audit: L,
    cache: C,
    jwt_service: JwtService,
    balance_cache_ttl: Duration,
}

impl<L: AuditLog, S: Storage, C: Cache> DivvyService<L, S, C> {
    pub fn new(storage: S, audit: L, cache: C, jwt_secret: String, balance_cache_ttl: Duration) -> Self {
        DivvyService {
            storage,
            audit,
            cache,
            jwt_service: JwtService::new(jwt_secret),
            balance_cache_ttl,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, DivvyError> {
        self.jwt_service.validate_token(token)
    }

    async fn validate_group_membership(&self, group_id: &str, user_id: &str) -> Result<Group, DivvyError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| DivvyError::GroupNotFound(group_id.to_string()))?;
        if !group.has_member(user_id) {
            return Err(DivvyError::NotGroupMember(user_id.to_string()));
        }
        Ok(group)
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), DivvyError> {
        if value.trim().is_empty() {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), DivvyError> {
        if !amount.is_finite() {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be a finite number".to_string(),
                },
            ));
        }
        if amount <= 0.0 {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        if amount > 1_000_000.0 {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: "Amount cannot exceed 1,000,000".to_string(),
                },
            ));
        }
        if (amount - crate::core::money::round2(amount)).abs() > 1e-9 {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount cannot have more than 2 decimal places".to_string(),
                },
            ));
        }
        Ok(())
    }

    pub async fn register_user(&self, email: &str, username: &str, password: &str) -> Result<User, DivvyError> {
        if email.is_empty() {
            return Err(DivvyError::MissingEmail);
        }
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(DivvyError::InvalidEmail(email.to_string()));
        }
        self.validate_string_input("username", username, 100)?;
        if password.is_empty() {
            return Err(DivvyError::InvalidInput(
                "password".to_string(),
                FieldError {
                    field: "password".to_string(),
                    title: "Invalid password".to_string(),
                    description: "Password cannot be empty".to_string(),
                },
            ));
        }

        if self.storage.get_user_by_email(email).await?.is_some() {
            return Err(DivvyError::EmailAlreadyRegistered(email.to_string()));
        }

        let hashed = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| DivvyError::InternalServerError(format!("Password hashing error: {}", e)))?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: hashed,
        };
        self.storage.save_user(user.clone()).await?;

        self.audit
            .record(
                USER_REGISTERED,
                json!({ "user_id": user.id, "username": user.username, "email": user.email }),
                Some(&user.id),
            )
            .await?;

        Ok(user)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(String, User), DivvyError> {
        let user = self
            .storage
            .get_user_by_email(email)
            .await?
            .ok_or(DivvyError::InvalidCredentials)?;

        if !bcrypt::verify(password, &user.password)
            .map_err(|e| DivvyError::InternalServerError(format!("Password verification error: {}", e)))?
        {
            return Err(DivvyError::InvalidCredentials);
        }

        let token = self.jwt_service.generate_token(&user.id)?;
        self.audit
            .record(USER_LOGGED_IN, json!({ "user_id": user.id }), Some(&user.id))
            .await?;
        Ok((token, user))
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, DivvyError> {
        self.storage.get_user(user_id).await
    }

    pub async fn create_group(
        &self,
        name: &str,
        member_ids: Vec<String>,
        session: &Session,
    ) -> Result<Group, DivvyError> {
        self.validate_string_input("name", name, 100)?;

        let mut all_members = member_ids;
        if !all_members.iter().any(|id| *id == session.user_id) {
            all_members.push(session.user_id.clone());
        }
        for member_id in &all_members {
            if self.storage.get_user(member_id).await?.is_none() {
                return Err(DivvyError::UserNotFound(member_id.clone()));
            }
        }

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            member_ids: all_members,
            created_by: session.user_id.clone(),
            created_at: Utc::now(),
        };
        self.storage.save_group(group.clone()).await?;

        self.audit
            .record(
                GROUP_CREATED,
                json!({
                    "group_id": group.id,
                    "name": group.name,
                    "member_ids": group.member_ids,
                }),
                Some(&session.user_id),
            )
            .await?;

        Ok(group)
    }

    pub async fn user_groups(&self, session: &Session) -> Result<Vec<Group>, DivvyError> {
        self.storage.get_user_groups(&session.user_id).await
    }

    pub async fn add_expense(
        &self,
        group_id: &str,
        req: CreateExpense,
        session: &Session,
    ) -> Result<Expense, DivvyError> {
        self.validate_group_membership(group_id, &session.user_id).await?;
        self.validate_string_input("description", &req.description, 255)?;
        self.validate_amount_input("amount", req.amount)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            description: req.description,
            amount: req.amount,
            paid_by: session.user_id.clone(),
            timestamp: Utc::now(),
        };
        self.storage.save_expense(expense.clone()).await?;
        self.cache.invalidate_group_balances(group_id).await?;

        self.audit
            .record(
                EXPENSE_ADDED,
                json!({
                    "expense_id": expense.id,
                    "group_id": group_id,
                    "description": expense.description,
                    "amount": expense.amount,
                }),
                Some(&session.user_id),
            )
            .await?;

        Ok(expense)
    }

    pub async fn group_expenses(&self, group_id: &str, session: &Session) -> Result<Vec<Expense>, DivvyError> {
        self.validate_group_membership(group_id, &session.user_id).await?;
        self.storage.get_group_expenses(group_id).await
    }

    /// The current balance snapshot for a group, cache-aside over the
    /// storage source. Writes to the group invalidate the cached snapshot.
    pub async fn group_balances(&self, group_id: &str, session: &Session) -> Result<Vec<Balance>, DivvyError> {
        self.validate_group_membership(group_id, &session.user_id).await?;

        if let Some(balances) = self.cache.get_group_balances(group_id).await? {
            return Ok(balances);
        }

        let balances = self.storage.group_balances(group_id).await?;
        self.cache
            .save_group_balances(group_id, &balances, self.balance_cache_ttl)
            .await?;

        self.audit
            .record(
                BALANCES_QUERIED,
                json!({ "group_id": group_id }),
                Some(&session.user_id),
            )
            .await?;

        Ok(balances)
    }

    /// Advisory transfers that would settle the group. Always derived from
    /// the current snapshot, never cached.
    pub async fn settlement_suggestions(
        &self,
        group_id: &str,
        session: &Session,
    ) -> Result<Vec<SettlementSuggestion>, DivvyError> {
        let balances = self.group_balances(group_id, session).await?;
        let suggestions = settle::settlement_suggestions(&balances);

        self.audit
            .record(
                SUGGESTIONS_QUERIED,
                json!({ "group_id": group_id, "count": suggestions.len() }),
                Some(&session.user_id),
            )
            .await?;

        Ok(suggestions)
    }

    /// The most the acting user can currently pay `to_user_id`, for
    /// pre-filling the payment form. Zero when either side is not eligible.
    pub async fn max_payable(
        &self,
        group_id: &str,
        to_user_id: &str,
        session: &Session,
    ) -> Result<f64, DivvyError> {
        let balances = self.group_balances(group_id, session).await?;
        Ok(payment::max_payable_for(&session.user_id, to_user_id, &balances))
    }

    /// Validate a payment intent against the current snapshot and, if it is
    /// admissible, append it to the group's payment ledger. Balances are not
    /// patched locally; the next snapshot read reflects the payment.
    pub async fn record_payment(
        &self,
        group_id: &str,
        intent: PaymentIntent,
        session: &Session,
    ) -> Result<Payment, DivvyError> {
        self.validate_group_membership(group_id, &session.user_id).await?;

        // Validate against a fresh snapshot, not a possibly stale cache.
        let balances = self.storage.group_balances(group_id).await?;
        payment::validate_payment(&session.user_id, &balances, &intent)?;

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            from_user_id: session.user_id.clone(),
            to_user_id: intent.to_user_id,
            amount: intent.amount,
            timestamp: Utc::now(),
        };
        self.storage.save_payment(payment.clone()).await?;
        self.cache.invalidate_group_balances(group_id).await?;

        self.audit
            .record(
                PAYMENT_RECORDED,
                json!({
                    "payment_id": payment.id,
                    "group_id": group_id,
                    "to_user_id": payment.to_user_id,
                    "amount": payment.amount,
                }),
                Some(&session.user_id),
            )
            .await?;

        Ok(payment)
    }

    pub async fn audit_trail(&self) -> Result<Vec<AuditEntry>, DivvyError> {
        self.audit.entries().await
    }
}
