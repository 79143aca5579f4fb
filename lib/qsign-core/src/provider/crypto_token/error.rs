use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin};

#[derive(Debug, Error)]
pub enum CryptoTokenError {
    #[error("Key `{0}` not found")]
    KeyNotFound(String),
    #[error("Crypto token service unavailable: {0}")]
    Unavailable(String),
    #[error("Request rejected by crypto token service: {0}")]
    Rejected(String),
}

impl ErrorCodeMixin for CryptoTokenError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::BR_0007
    }
}
