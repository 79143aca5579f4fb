use crate::model::session::{SessionStatus, SessionWithCredential};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLookup {
    pub status: SessionStatus,
    /// Present for active and expired sessions
    pub session: Option<SessionWithCredential>,
}
