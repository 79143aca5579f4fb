//! Remote signing through one of the four crypto token sign calls.

use std::sync::Arc;

use error::SignerError;

use crate::error::ContextWithErrorCode;
use crate::model::signature::{SignatureAlgorithm, SignedDocuments};
use crate::model::worker::WorkerId;
use crate::provider::crypto_token::CryptoTokenClient;
use crate::provider::crypto_token::model::{MultipleSignRequest, SingleSignRequest};
use crate::provider::signing_token::SigningToken;

pub mod error;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerStrategy {
    Single,
    Multiple,
    SingleWithValidationInfo,
    MultipleWithValidationInfo,
}

impl SignerStrategy {
    pub fn select(item_count: usize, with_validation_info: bool) -> Self {
        match (item_count == 1, with_validation_info) {
            (true, false) => Self::Single,
            (false, false) => Self::Multiple,
            (true, true) => Self::SingleWithValidationInfo,
            (false, true) => Self::MultipleWithValidationInfo,
        }
    }
}

pub struct RemoteSigner {
    crypto_token_client: Arc<dyn CryptoTokenClient>,
}

impl RemoteSigner {
    pub fn new(crypto_token_client: Arc<dyn CryptoTokenClient>) -> Self {
        Self {
            crypto_token_client,
        }
    }

    pub async fn sign(
        &self,
        worker_id: WorkerId,
        token: &SigningToken,
        signature_algorithm: SignatureAlgorithm,
        mut data: Vec<Vec<u8>>,
        with_validation_info: bool,
    ) -> Result<SignedDocuments, SignerError> {
        let expected = data.len();
        let strategy = SignerStrategy::select(expected, with_validation_info);
        tracing::debug!(
            worker = %worker_id,
            key_alias = token.key_alias(),
            items = expected,
            ?strategy,
            "Signing"
        );

        let key_alias = token.key_alias().to_owned();
        let certificate_chain = token.certificate_chain().to_vec();

        let (signatures, validation_info) = match strategy {
            SignerStrategy::Single | SignerStrategy::SingleWithValidationInfo => {
                let request = SingleSignRequest {
                    worker_id,
                    key_alias,
                    certificate_chain,
                    signature_algorithm,
                    data: data.pop().unwrap_or_default(),
                };
                if strategy == SignerStrategy::Single {
                    let signature = self
                        .crypto_token_client
                        .sign_single(request)
                        .await
                        .error_while("signing")?;
                    (vec![signature], None)
                } else {
                    let response = self
                        .crypto_token_client
                        .sign_single_with_validation_info(request)
                        .await
                        .error_while("signing with validation info")?;
                    (vec![response.signature], Some(response.validation_info))
                }
            }
            SignerStrategy::Multiple | SignerStrategy::MultipleWithValidationInfo => {
                let request = MultipleSignRequest {
                    worker_id,
                    key_alias,
                    certificate_chain,
                    signature_algorithm,
                    data,
                };
                if strategy == SignerStrategy::Multiple {
                    let signatures = self
                        .crypto_token_client
                        .sign_multiple(request)
                        .await
                        .error_while("signing")?;
                    (signatures, None)
                } else {
                    let response = self
                        .crypto_token_client
                        .sign_multiple_with_validation_info(request)
                        .await
                        .error_while("signing with validation info")?;
                    (response.signatures, Some(response.validation_info))
                }
            }
        };

        if signatures.len() != expected {
            return Err(SignerError::SignatureCountMismatch {
                expected,
                received: signatures.len(),
            });
        }

        Ok(SignedDocuments {
            signatures,
            certificate_chain: token.certificate_chain().to_vec(),
            validation_info,
        })
    }
}
