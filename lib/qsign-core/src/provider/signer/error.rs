use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin, NestedError};

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Expected {expected} signatures, received {received}")]
    SignatureCountMismatch { expected: usize, received: usize },

    #[error(transparent)]
    Nested(#[from] NestedError),
}

impl ErrorCodeMixin for SignerError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::SignatureCountMismatch { .. } => ErrorCode::BR_0009,
            Self::Nested(nested) => nested.error_code(),
        }
    }
}
