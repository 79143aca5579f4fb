//! Operations consumed from the certificate authority.

use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin};

/// Identity record at the certificate authority backing an issued certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndEntity {
    pub username: String,
    pub subject_dn: String,
    pub subject_alt_name: Option<String>,
    pub ca_name: String,
    pub end_entity_profile: String,
    pub certificate_profile: String,
}

#[derive(Debug, Error)]
pub enum CertificateAuthorityError {
    #[error("End entity rejected: {0}")]
    EndEntityRejected(String),
    #[error("Certificate request rejected: {0}")]
    RequestRejected(String),
    #[error("Certificate authority unavailable: {0}")]
    Unavailable(String),
}

impl ErrorCodeMixin for CertificateAuthorityError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::BR_0008
    }
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait CertificateAuthorityClient: Send + Sync {
    async fn create_end_entity(&self, end_entity: &EndEntity)
    -> Result<(), CertificateAuthorityError>;

    /// Returns the DER encoded chain, leaf first
    async fn sign_certificate_request(
        &self,
        end_entity: &EndEntity,
        certificate_profile: &str,
        csr: &[u8],
    ) -> Result<Vec<Vec<u8>>, CertificateAuthorityError>;
}
