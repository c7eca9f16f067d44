use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

/// Why a payment intent was turned down. All four are local, recoverable
/// rejections surfaced to the caller; none aborts anything.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum PaymentRejection {
    /// Acting user absent from the snapshot or not in debt
    #[error("only members who owe money can record payments")]
    NoCurrentUserBalance,

    /// Recipient absent from the snapshot or not owed money
    #[error("payments can only go to members who are owed money")]
    NoRecipientCreditBalance,

    /// Missing recipient or non-positive amount
    #[error("a recipient and a positive amount are required")]
    InvalidIntent,

    /// Rounded amount exceeds the payable maximum plus tolerance
    #[error("payment exceeds the maximum payable amount of {max_payable:.2}")]
    ExceedsPayableLimit { max_payable: f64 },
}

#[derive(Error, Debug, Serialize)]
pub enum DivvyError {
    /// Email field is empty
    #[error("Email is required")]
    MissingEmail,

    /// Email format is invalid
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Email is already registered
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    /// User with given ID not found
    #[error("User {0} not found")]
    UserNotFound(String),

    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// User is not a member of the group
    #[error("User {0} is not a group member")]
    NotGroupMember(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// Payment failed one of the admissibility checks
    #[error("payment rejected: {0}")]
    PaymentRejected(#[from] PaymentRejection),

    /// Login failed
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or invalid session token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (e.g., unexpected failure)
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Audit log error: {0}")]
    AuditError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
