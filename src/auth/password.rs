//! Password hashing via bcrypt.

use once_cell::sync::Lazy;

use crate::errors::AppError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Stand-in hash checked when no account matches, at the same cost as real hashes.
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| bcrypt::hash("no-such-account", BCRYPT_COST).unwrap_or_default());

/// Hash a password with bcrypt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, BCRYPT_COST)?)
}

/// Verify a password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("bcrypt verify failed: {}", e);
            false
        }
    }
}

/// Verify a password against the account's hash, or against a stand-in hash when
/// there is no account. A missing account never matches, but costs the same.
pub fn verify_password_or_dummy(password: &str, hash: Option<&str>) -> bool {
    match hash {
        Some(hash) => verify_password(password, hash),
        None => {
            verify_password(password, &DUMMY_HASH);
            false
        }
    }
}
