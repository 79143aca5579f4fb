use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin, NestedError};
use crate::model::crypto_token::CryptoTokenId;

#[derive(Debug, Error)]
pub enum CredentialFactoryError {
    #[error("Unknown signature qualifier `{0}`")]
    UnknownSignatureQualifier(String),

    #[error("Unknown crypto token {0}")]
    UnknownCryptoToken(CryptoTokenId),

    #[error("Missing attribute `{attribute}` for pattern `{pattern}`")]
    MissingAttribute { attribute: String, pattern: String },

    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),

    #[error(transparent)]
    Nested(#[from] NestedError),
}

impl ErrorCodeMixin for CredentialFactoryError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownSignatureQualifier(_) => ErrorCode::BR_0004,
            Self::UnknownCryptoToken(_) => ErrorCode::BR_0017,
            Self::MissingAttribute { .. } => ErrorCode::BR_0015,
            Self::InvalidCertificate(_) => ErrorCode::BR_0016,
            Self::Nested(nested) => nested.error_code(),
        }
    }
}
