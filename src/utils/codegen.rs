//! Short code generation and validation utilities.
//!
//! Provides cryptographically secure random code generation and validation
//! for custom user-provided codes.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

/// Reserved codes that cannot be used as referral links.
///
/// These codes are reserved for system endpoints to prevent routing conflicts.
const RESERVED_CODES: &[&str] = &[
    "analytics", "health", "domains", "profile", "billing", "track", "api", "admin",
];

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character code.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 4-50 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved system code
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any validation rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < 4 || code.len() > 50 {
        return Err(AppError::bad_request(
            "Custom code must be 4-50 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain lowercase letters, digits, and hyphens",
            json!({ "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom code cannot start or end with a hyphen",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
