use crate::core::errors::DivvyError;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // User ID
    pub exp: usize,  // Expiration timestamp
}

/// The acting user's identity, resolved from a validated token and passed
/// explicitly into every service call. There is no process-wide current
/// user; tests construct a `Session` directly.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Session { user_id: claims.sub }
    }
}

pub struct JwtService {
    secret: String,
}

impl JwtService {
    pub fn new(secret: String) -> Self {
        JwtService { secret }
    }

    pub fn generate_token(&self, user_id: &str) -> Result<String, DivvyError> {
        let expiration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as usize + 3600) // 1 hour expiry
            .map_err(|e| DivvyError::InternalServerError(format!("Time error: {}", e)))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| DivvyError::InternalServerError(format!("JWT encoding error: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, DivvyError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| DivvyError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_token() {
        let jwt = JwtService::new("test-secret".to_string());
        let token = jwt.generate_token("user-1").unwrap();
        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");

        let session = Session::from(claims);
        assert_eq!(session.user_id, "user-1");
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let jwt = JwtService::new("test-secret".to_string());
        let other = JwtService::new("other-secret".to_string());
        let token = other.generate_token("user-1").unwrap();
        assert!(matches!(
            jwt.validate_token(&token),
            Err(DivvyError::Unauthorized(_))
        ));
    }
}
