use shared_types::{CredentialId, SessionId};
use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin, NestedError};

#[derive(Debug, Error)]
pub enum TokenProviderError {
    #[error("Credential `{0}` not found")]
    CredentialNotFound(CredentialId),

    #[error("Credential `{0}` is disabled")]
    CredentialDisabled(CredentialId),

    #[error("Credential `{0}` belongs to another user")]
    CredentialNotOwned(CredentialId),

    #[error("Credential cannot be used with the selected worker: {0}")]
    IncompatibleCredential(String),

    #[error("Session `{0}` expired")]
    SessionExpired(SessionId),

    #[error("Session `{0}` belongs to another user")]
    SessionNotOwned(SessionId),

    #[error(transparent)]
    Nested(#[from] NestedError),
}

impl ErrorCodeMixin for TokenProviderError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::CredentialNotFound(_) => ErrorCode::BR_0011,
            Self::CredentialDisabled(_) => ErrorCode::BR_0012,
            Self::CredentialNotOwned(_) | Self::SessionNotOwned(_) => ErrorCode::BR_0001,
            Self::IncompatibleCredential(_) => ErrorCode::BR_0002,
            Self::SessionExpired(_) => ErrorCode::BR_0013,
            Self::Nested(nested) => nested.error_code(),
        }
    }
}
