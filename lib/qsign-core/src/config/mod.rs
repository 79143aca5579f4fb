use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin};

pub mod core_config;


#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parsing error: {0}")]
    Parsing(#[from] ConfigParsingError),
    #[error("Config validation error: {0}")]
    Validation(#[from] ConfigValidationError),
}

#[derive(Debug, Error)]
pub enum ConfigParsingError {
    #[error("General parsing error: {0}")]
    GeneralParsingError(String),
}

#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Worker `{worker}` references unknown crypto token `{crypto_token}`")]
    UnknownCryptoToken { worker: String, crypto_token: String },
    #[error("Duplicate worker id {0}")]
    DuplicateWorkerId(u32),
    #[error("Duplicate worker name `{0}`")]
    DuplicateWorkerName(String),
    #[error("Duplicate crypto token id {0}")]
    DuplicateCryptoTokenId(u32),
    #[error("Signature qualifier `{0}` has multisign 0")]
    ZeroMultisign(String),
    #[error("Signature qualifier `{0}` has non-positive validity")]
    InvalidValidity(String),
    #[error("Retry policy needs at least one attempt")]
    InvalidRetryAttempts,
}

impl ErrorCodeMixin for ConfigError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::BR_0017
    }
}

impl ErrorCodeMixin for ConfigValidationError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::BR_0017
    }
}
