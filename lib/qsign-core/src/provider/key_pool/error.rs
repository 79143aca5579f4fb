use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin, NestedError};
use crate::model::crypto_token::{CryptoTokenId, KeyAlgorithm, KeyUsage};
use crate::repository::error::DataLayerError;

#[derive(Debug, Error)]
pub enum KeyPoolError {
    #[error("No {usage} key pool profile for {algorithm} on crypto token `{crypto_token}`")]
    MissingKeyPoolProfile {
        crypto_token: String,
        algorithm: KeyAlgorithm,
        usage: KeyUsage,
    },

    #[error("Unknown crypto token {0}")]
    UnknownCryptoToken(CryptoTokenId),

    #[error("Generated key `{key_alias}` could not be stored nor removed")]
    OrphanedKey {
        key_alias: String,
        #[source]
        source: DataLayerError,
    },

    #[error(transparent)]
    Nested(#[from] NestedError),
}

impl ErrorCodeMixin for KeyPoolError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingKeyPoolProfile { .. } => ErrorCode::BR_0003,
            Self::UnknownCryptoToken(_) => ErrorCode::BR_0017,
            Self::OrphanedKey { .. } => ErrorCode::BR_0010,
            Self::Nested(nested) => nested.error_code(),
        }
    }
}
