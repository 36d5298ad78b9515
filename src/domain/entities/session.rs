//! Session entity for bearer-token authentication.

use chrono::{DateTime, Utc};

/// A stored session credential.
///
/// Only the HMAC-SHA256 hash of the bearer token is persisted; the raw token
/// exists once, at issue time.
#[derive(Debug, Clone)]
pub struct Session {
    pub token_hash: String,
    pub user_id: i64,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked: bool,
}

impl Session {
    pub fn is_usable(&self) -> bool {
        !self.revoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_revoked_session_not_usable() {
        let session = Session {
            token_hash: "ab".repeat(32),
            user_id: 1,
            name: Some("CLI".to_string()),
            created_at: Utc::now(),
            last_used_at: None,
            revoked: true,
        };
        assert!(!session.is_usable());
    }
}
