use std::collections::HashMap;

use secrecy::SecretString;
use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin};

#[derive(Debug, Error)]
pub enum UserInfoError {
    #[error("User `{0}` not found")]
    UserNotFound(String),
    #[error("User info endpoint unavailable: {0}")]
    Unavailable(String),
}

impl ErrorCodeMixin for UserInfoError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::BR_0014
    }
}

/// Resolves identity attributes of an authenticated caller.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait UserInfoProvider: Send + Sync {
    async fn get_user_info(
        &self,
        caller_id: &str,
        auth_token: &SecretString,
    ) -> Result<HashMap<String, String>, UserInfoError>;
}
