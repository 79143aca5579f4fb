use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin};

#[derive(Debug, Error)]
pub enum DataLayerError {
    #[error("Already exists")]
    AlreadyExists,

    #[error("Record not updated")]
    RecordNotUpdated,

    #[error("Response could not be mapped: {0}")]
    MappingError(String),

    #[error("Database connection error: {0}")]
    Connection(anyhow::Error),

    #[error("Database error: {0}")]
    Db(#[from] anyhow::Error),
}

impl DataLayerError {
    /// Only connectivity failures are worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl ErrorCodeMixin for DataLayerError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::BR_0006
    }
}
