//! Error codes and context nesting shared by all layers.

use std::borrow::Cow;
use std::error::Error;

use strum::{AsRefStr, Display};
use thiserror::Error;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum ErrorCode {
    BR_0000,
    BR_0001,
    BR_0002,
    BR_0003,
    BR_0004,
    BR_0005,
    BR_0006,
    BR_0007,
    BR_0008,
    BR_0009,
    BR_0010,
    BR_0011,
    BR_0012,
    BR_0013,
    BR_0014,
    BR_0015,
    BR_0016,
    BR_0017,
    BR_0018,
    BR_0019,
}

impl ErrorCode {
    pub const fn msg(&self) -> &'static str {
        match self {
            ErrorCode::BR_0000 => "Unmapped error code",
            ErrorCode::BR_0001 => "Data not covered by signature activation data",
            ErrorCode::BR_0002 => "No suitable worker",
            ErrorCode::BR_0003 => "Missing key pool profile",
            ErrorCode::BR_0004 => "Unknown signature qualifier",
            ErrorCode::BR_0005 => "Multisign capacity exceeded",
            ErrorCode::BR_0006 => "Database error",
            ErrorCode::BR_0007 => "Crypto token service error",
            ErrorCode::BR_0008 => "Certificate authority error",
            ErrorCode::BR_0009 => "Signature count mismatch",
            ErrorCode::BR_0010 => "Orphaned key in crypto token",
            ErrorCode::BR_0011 => "Credential not found",
            ErrorCode::BR_0012 => "Credential disabled",
            ErrorCode::BR_0013 => "Session expired",
            ErrorCode::BR_0014 => "User info lookup failed",
            ErrorCode::BR_0015 => "Identity pattern rendering failed",
            ErrorCode::BR_0016 => "Invalid certificate",
            ErrorCode::BR_0017 => "Configuration error",
            ErrorCode::BR_0018 => "Invalid request",
            ErrorCode::BR_0019 => "Session not found",
        }
    }
}

pub trait ErrorCodeMixin: Error + Send + Sync + 'static {
    fn error_code(&self) -> ErrorCode;
}

/// An inner error annotated with what the caller was doing when it failed.
///
/// The error code of the root cause is preserved through any number of nesting levels.
#[derive(Debug, Error)]
#[error("Error while {context}: {source}")]
pub struct NestedError {
    context: Cow<'static, str>,
    code: ErrorCode,
    #[source]
    source: Box<dyn Error + Send + Sync + 'static>,
}

impl NestedError {
    pub fn new(context: impl Into<Cow<'static, str>>, error: impl ErrorCodeMixin) -> Self {
        Self {
            context: context.into(),
            code: error.error_code(),
            source: Box::new(error),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn root_cause(&self) -> &(dyn Error + 'static) {
        let mut current: &(dyn Error + 'static) = self.source.as_ref();
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

impl ErrorCodeMixin for NestedError {
    fn error_code(&self) -> ErrorCode {
        self.code
    }
}

pub trait ContextWithErrorCode<T> {
    fn error_while(self, context: impl Into<Cow<'static, str>>) -> Result<T, NestedError>;
}

impl<T, E: ErrorCodeMixin> ContextWithErrorCode<T> for Result<T, E> {
    fn error_while(self, context: impl Into<Cow<'static, str>>) -> Result<T, NestedError> {
        self.map_err(|error| NestedError::new(context, error))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Error)]
    #[error("inner failure")]
    struct InnerError;

    impl ErrorCodeMixin for InnerError {
        fn error_code(&self) -> ErrorCode {
            ErrorCode::BR_0007
        }
    }

    #[test]
    fn test_nested_error_keeps_root_code_and_cause() {
        let result: Result<(), _> = Err(InnerError);
        let nested = result
            .error_while("generating key")
            .error_while("acquiring key")
            .unwrap_err();

        assert_eq!(nested.error_code(), ErrorCode::BR_0007);
        assert_eq!(nested.context(), "acquiring key");
        assert_eq!(nested.root_cause().to_string(), "inner failure");
        assert_eq!(
            nested.to_string(),
            "Error while acquiring key: Error while generating key: inner failure"
        );
    }
}
