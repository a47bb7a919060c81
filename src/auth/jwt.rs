//! Session token issue and verification (HS256).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Token lifetime: 24 hours.
pub const TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject: user ID
    pub sub: String,
    pub email: String,
    /// Expiry (unix timestamp)
    pub exp: i64,
    /// Issued at (unix timestamp)
    pub iat: i64,
}

/// Sign a token for the user, valid for [`TOKEN_LIFETIME_SECS`] from now.
pub fn issue_token(user_id: &str, email: &str, secret: &[u8]) -> Result<String, AppError> {
    issue_token_at(user_id, email, secret, Utc::now())
}

/// Sign a token as if issued at `issued_at`.
pub fn issue_token_at(
    user_id: &str,
    email: &str,
    secret: &[u8],
    issued_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let claims = SessionClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: (issued_at + Duration::seconds(TOKEN_LIFETIME_SECS)).timestamp(),
        iat: issued_at.timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| {
        tracing::error!("jwt encode: {}", e);
        AppError::Internal("Error generating token".to_string())
    })
}

/// Verify signature, algorithm (HS256 only) and expiry. Any failure yields `None`.
pub fn verify_token(token: &str, secret: &[u8]) -> Option<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    match decode::<SessionClaims>(token, &DecodingKey::from_secret(secret), &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            tracing::debug!("token rejected: {}", e);
            None
        }
    }
}
