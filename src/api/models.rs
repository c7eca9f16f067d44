use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::{DivvyError, PaymentRejection};
use crate::core::models::user::User;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub member_ids: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MaxPayableResponse {
    pub max_payable: f64,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for DivvyError to implement IntoResponse
pub struct ApiError(pub DivvyError);

impl From<DivvyError> for ApiError {
    fn from(err: DivvyError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self.0 {
            DivvyError::MissingEmail => (StatusCode::BAD_REQUEST, "Email is required".to_string()),
            DivvyError::InvalidEmail(email) => (StatusCode::BAD_REQUEST, format!("Invalid email: {}", email)),
            DivvyError::EmailAlreadyRegistered(email) => {
                (StatusCode::CONFLICT, format!("Email {} already registered", email))
            }
            DivvyError::UserNotFound(id) => (StatusCode::NOT_FOUND, format!("User {} not found", id)),
            DivvyError::GroupNotFound(id) => (StatusCode::NOT_FOUND, format!("Group {} not found", id)),
            DivvyError::NotGroupMember(id) => (StatusCode::FORBIDDEN, format!("User {} is not a group member", id)),
            DivvyError::InvalidInput(field, msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid input for {}: {:?}", field, msg),
            ),
            DivvyError::PaymentRejected(rejection) => {
                let message = rejection.to_string();
                let status = match rejection {
                    PaymentRejection::InvalidIntent => StatusCode::BAD_REQUEST,
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, message)
            }
            DivvyError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password".to_string()),
            DivvyError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            DivvyError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {}", msg),
            ),
            DivvyError::StorageError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Storage error: {}", msg)),
            DivvyError::AuditError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Audit log error: {}", msg)),
            DivvyError::CacheError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Cache error: {}", msg)),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
