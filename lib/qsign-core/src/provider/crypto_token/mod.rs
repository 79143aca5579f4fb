//! Operations consumed from the HSM backed crypto token service.
//!
//! The wire protocol lives outside of this crate, implementations are supplied by the host.

use error::CryptoTokenError;
use model::{
    KeyQueryFilter, MultipleSignRequest, SignatureWithValidationInfo,
    SignaturesWithValidationInfo, SingleSignRequest, TokenKeyInfo,
};

use crate::model::crypto_token::{CryptoToken, KeyAlgorithm};

pub mod error;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait CryptoTokenClient: Send + Sync {
    /// Returns the alias under which the key was created
    async fn generate_key(
        &self,
        token: &CryptoToken,
        key_alias: &str,
        algorithm: KeyAlgorithm,
        key_specification: &str,
    ) -> Result<String, CryptoTokenError>;

    /// Returns the DER encoded certificate signing request
    async fn generate_csr(
        &self,
        token: &CryptoToken,
        key_alias: &str,
        distinguished_name: &str,
        signature_algorithm: &str,
    ) -> Result<Vec<u8>, CryptoTokenError>;

    async fn import_certificate_chain(
        &self,
        token: &CryptoToken,
        key_alias: &str,
        certificate_chain: &[Vec<u8>],
    ) -> Result<(), CryptoTokenError>;

    async fn remove_key(
        &self,
        token: &CryptoToken,
        key_alias: &str,
        ok_if_missing: bool,
    ) -> Result<(), CryptoTokenError>;

    async fn query_keys(
        &self,
        token: &CryptoToken,
        filter: KeyQueryFilter,
        include_data: bool,
    ) -> Result<Vec<TokenKeyInfo>, CryptoTokenError>;

    async fn sign_single(&self, request: SingleSignRequest) -> Result<Vec<u8>, CryptoTokenError>;

    async fn sign_multiple(
        &self,
        request: MultipleSignRequest,
    ) -> Result<Vec<Vec<u8>>, CryptoTokenError>;

    async fn sign_single_with_validation_info(
        &self,
        request: SingleSignRequest,
    ) -> Result<SignatureWithValidationInfo, CryptoTokenError>;

    async fn sign_multiple_with_validation_info(
        &self,
        request: MultipleSignRequest,
    ) -> Result<SignaturesWithValidationInfo, CryptoTokenError>;
}
