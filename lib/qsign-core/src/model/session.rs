use shared_types::{CredentialId, SessionId};
use time::OffsetDateTime;

use super::credential::CredentialMetadata;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSession {
    pub id: SessionId,
    pub credential_id: CredentialId,
    pub created_date: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl CredentialSession {
    /// Status is never stored, it is derived from the expiry on every read
    pub fn status(&self, now: OffsetDateTime) -> SessionStatus {
        if self.expires_at > now {
            SessionStatus::Active
        } else {
            SessionStatus::Expired
        }
    }
}

/// Credential bound to a session, created together with the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentialMetadata {
    pub session_id: SessionId,
    pub credential: CredentialMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Expired,
    Nonexistent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWithCredential {
    pub session: CredentialSession,
    pub credential: SessionCredentialMetadata,
}
