use shared_types::{CredentialId, SessionId};
use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin, NestedError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    EntityNotFound(#[from] EntityNotFoundError),

    #[error(transparent)]
    EntityAlreadyExists(#[from] EntityAlreadyExistsError),

    #[error(transparent)]
    BusinessLogic(#[from] BusinessLogicError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Nested(#[from] NestedError),
}

#[derive(Debug, Error)]
pub enum EntityNotFoundError {
    #[error("Credential `{0}` not found")]
    Credential(CredentialId),

    #[error("Session `{0}` not found")]
    Session(SessionId),
}

#[derive(Debug, Error)]
pub enum EntityAlreadyExistsError {
    #[error("Session `{0}` already exists")]
    Session(SessionId),
}

#[derive(Debug, Error)]
pub enum BusinessLogicError {
    #[error("Data is not covered by the signature activation data")]
    Unauthorized,

    #[error("No worker supports the requested signature")]
    NoSuitableWorker,

    #[error("Token allows {multisign} signatures per call, {requested} requested")]
    InsufficientCapacity { multisign: u32, requested: usize },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Nothing to sign")]
    EmptyData,

    #[error("Unknown crypto token `{0}`")]
    UnknownCryptoToken(String),
}

impl ErrorCodeMixin for ServiceError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EntityNotFound(error) => error.error_code(),
            Self::EntityAlreadyExists(error) => error.error_code(),
            Self::BusinessLogic(error) => error.error_code(),
            Self::Validation(error) => error.error_code(),
            Self::Nested(error) => error.error_code(),
        }
    }
}

impl ErrorCodeMixin for EntityNotFoundError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::Credential(_) => ErrorCode::BR_0011,
            Self::Session(_) => ErrorCode::BR_0019,
        }
    }
}

impl ErrorCodeMixin for EntityAlreadyExistsError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::BR_0006
    }
}

impl ErrorCodeMixin for BusinessLogicError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::Unauthorized => ErrorCode::BR_0001,
            Self::NoSuitableWorker => ErrorCode::BR_0002,
            Self::InsufficientCapacity { .. } => ErrorCode::BR_0005,
        }
    }
}

impl ErrorCodeMixin for ValidationError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyData => ErrorCode::BR_0018,
            Self::UnknownCryptoToken(_) => ErrorCode::BR_0017,
        }
    }
}
