use shared_types::{CredentialId, SessionId};

use super::SignService;
use super::dto::SignProcessConfiguration;
use crate::error::ContextWithErrorCode;
use crate::model::signature::SignedDocuments;
use crate::provider::signing_token::{SigningToken, TokenConfiguration, TokenContext};
use crate::provider::worker::RegisteredWorker;
use crate::provider::worker::criteria::CapabilityRequirement;
use crate::service::error::{BusinessLogicError, ServiceError, ValidationError};

impl SignService {
    /// Signs with a key and certificate created for this call only
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn sign_one_time(
        &self,
        configuration: &SignProcessConfiguration,
        data: Vec<Vec<u8>>,
    ) -> Result<SignedDocuments, ServiceError> {
        self.sign(configuration, &TokenConfiguration::OneTime, data)
            .await
    }

    /// Signs with a stored long-term credential of the caller
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn sign_with_credential(
        &self,
        configuration: &SignProcessConfiguration,
        credential_id: CredentialId,
        data: Vec<Vec<u8>>,
    ) -> Result<SignedDocuments, ServiceError> {
        self.sign(
            configuration,
            &TokenConfiguration::LongTerm { credential_id },
            data,
        )
        .await
    }

    /// Signs with the credential of a session, creating the session on first use
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn sign_with_session(
        &self,
        configuration: &SignProcessConfiguration,
        session_id: SessionId,
        data: Vec<Vec<u8>>,
    ) -> Result<SignedDocuments, ServiceError> {
        self.sign(
            configuration,
            &TokenConfiguration::Session { session_id },
            data,
        )
        .await
    }

    /// Runs one sign process
    ///
    /// # Arguments
    ///
    /// * `configuration` - caller, requested signature and activation data
    /// * `token_configuration` - lifecycle of the signing token
    /// * `data` - digests to sign, each must be covered by the activation data
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn sign(
        &self,
        configuration: &SignProcessConfiguration,
        token_configuration: &TokenConfiguration,
        data: Vec<Vec<u8>>,
    ) -> Result<SignedDocuments, ServiceError> {
        if data.is_empty() {
            return Err(ValidationError::EmptyData.into());
        }

        if !configuration.sad.covers(&data) {
            return Err(BusinessLogicError::Unauthorized.into());
        }

        let parameters = &configuration.parameters;
        let worker = self
            .worker_registry
            .select_worker(&CapabilityRequirement::from_parameters(parameters))
            .ok_or(BusinessLogicError::NoSuitableWorker)?;
        tracing::debug!(
            worker = %worker.worker.name,
            crypto_token = %worker.crypto_token.name,
            "Selected worker"
        );

        let context = TokenContext {
            caller: &configuration.caller,
            crypto_token: &worker.crypto_token,
            signature_qualifier: &parameters.signature_qualifier,
            key_algorithm: parameters.signature_algorithm.key_algorithm(),
            sad: &configuration.sad,
        };
        let token = self
            .token_providers
            .get_signing_token(token_configuration, &context)
            .await
            .error_while("obtaining signing token")?;

        let result = self.sign_with_token(worker, &token, configuration, data).await;
        self.token_providers.cleanup(token).await;
        result
    }

    async fn sign_with_token(
        &self,
        worker: &RegisteredWorker,
        token: &SigningToken,
        configuration: &SignProcessConfiguration,
        data: Vec<Vec<u8>>,
    ) -> Result<SignedDocuments, ServiceError> {
        if !token.can_sign_data(&data) {
            return Err(BusinessLogicError::InsufficientCapacity {
                multisign: token.multisign(),
                requested: data.len(),
            }
            .into());
        }

        Ok(self
            .signer
            .sign(
                worker.worker.id,
                token,
                configuration.parameters.signature_algorithm,
                data,
                configuration.parameters.with_validation_info,
            )
            .await
            .error_while("signing data")?)
    }
}
