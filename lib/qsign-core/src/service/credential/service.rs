use shared_types::CredentialId;

use super::CredentialService;
use super::dto::CreateCredentialRequest;
use crate::error::{ContextWithErrorCode, NestedError};
use crate::model::credential::{CredentialMetadata, CredentialStatus};
use crate::model::crypto_token::CryptoToken;
use crate::model::signing_key::KeyReference;
use crate::service::error::{EntityNotFoundError, ServiceError, ValidationError};

impl CredentialService {
    /// Issues and stores a long-term credential on a key from the single-use pool
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn create_credential(
        &self,
        request: CreateCredentialRequest,
    ) -> Result<CredentialMetadata, ServiceError> {
        let crypto_token = self
            .worker_registry
            .get_crypto_token(&request.crypto_token)
            .ok_or_else(|| ValidationError::UnknownCryptoToken(request.crypto_token.to_owned()))?;

        let key = self
            .key_pool
            .acquire_key(crypto_token, request.key_algorithm)
            .await
            .error_while("acquiring long-term key")?;

        let credential = match self
            .credential_factory
            .create_credential(
                &key,
                &request.signature_qualifier,
                &request.caller,
                &request.sad,
            )
            .await
        {
            Ok(credential) => credential,
            Err(error) => {
                self.remove_unbound_key(crypto_token, &key).await;
                return Err(NestedError::new("creating long-term credential", error).into());
            }
        };

        if let Err(error) = self
            .credential_repository
            .create_credential(credential.clone())
            .await
        {
            self.remove_unbound_key(crypto_token, &key).await;
            return Err(NestedError::new("storing credential", error).into());
        }

        tracing::info!(
            credential_id = %credential.id,
            user_id = %credential.user_id,
            key_alias = %credential.key_alias,
            "Created long-term credential"
        );
        Ok(credential)
    }

    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn get_credential(
        &self,
        id: &CredentialId,
    ) -> Result<CredentialMetadata, ServiceError> {
        Ok(self
            .credential_repository
            .get_credential(id)
            .await
            .error_while("loading credential")?
            .ok_or(EntityNotFoundError::Credential(*id))?)
    }

    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn get_credentials_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<CredentialMetadata>, ServiceError> {
        Ok(self
            .credential_repository
            .get_credentials_by_user(user_id)
            .await
            .error_while("loading user credentials")?)
    }

    /// Enables or disables a credential, disabled credentials cannot sign
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn set_credential_status(
        &self,
        id: &CredentialId,
        status: CredentialStatus,
    ) -> Result<(), ServiceError> {
        let credential = self.get_credential(id).await?;
        if credential.status == status {
            return Ok(());
        }

        self.credential_repository
            .update_status(id, status, self.clock.now_utc())
            .await
            .error_while("updating credential status")?;

        tracing::info!(credential_id = %id, %status, "Changed credential status");
        Ok(())
    }

    /// Removes the key from the crypto token, then the credential
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn delete_credential(&self, id: &CredentialId) -> Result<(), ServiceError> {
        let credential = self.get_credential(id).await?;

        let crypto_token = self
            .worker_registry
            .get_crypto_token_by_id(credential.crypto_token_id)
            .ok_or_else(|| {
                ValidationError::UnknownCryptoToken(credential.crypto_token_id.to_string())
            })?;

        self.key_pool
            .remove_unbound_key(
                crypto_token,
                &KeyReference {
                    crypto_token_id: credential.crypto_token_id,
                    key_alias: credential.key_alias.to_owned(),
                    algorithm: credential.key_algorithm,
                },
            )
            .await
            .error_while("removing credential key")?;

        self.credential_repository
            .delete_credential(id)
            .await
            .error_while("deleting credential")?;

        tracing::info!(credential_id = %id, "Deleted credential");
        Ok(())
    }

    async fn remove_unbound_key(&self, crypto_token: &CryptoToken, key: &KeyReference) {
        if let Err(error) = self.key_pool.remove_unbound_key(crypto_token, key).await {
            tracing::error!(
                crypto_token = %crypto_token.name,
                key_alias = %key.key_alias,
                %error,
                "Failed to remove key of unissued credential, key is orphaned"
            );
        }
    }
}
