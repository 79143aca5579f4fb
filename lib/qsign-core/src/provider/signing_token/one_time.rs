use std::sync::Arc;

use super::error::TokenProviderError;
use super::{SigningToken, TokenContext};
use crate::error::{ContextWithErrorCode, NestedError};
use crate::model::signing_key::RenewableKey;
use crate::provider::credential_factory::CredentialFactory;
use crate::provider::key_pool::renewable::RenewableKeyPool;

/// Fresh key and certificate per sign call, destroyed afterwards.
pub struct OneTimeTokenProvider {
    key_pool: Arc<RenewableKeyPool>,
    credential_factory: Arc<CredentialFactory>,
}

impl OneTimeTokenProvider {
    pub fn new(key_pool: Arc<RenewableKeyPool>, credential_factory: Arc<CredentialFactory>) -> Self {
        Self {
            key_pool,
            credential_factory,
        }
    }

    pub(super) async fn get_signing_token(
        &self,
        context: &TokenContext<'_>,
    ) -> Result<SigningToken, TokenProviderError> {
        let key = self
            .key_pool
            .acquire_key(context.crypto_token, context.key_algorithm)
            .await
            .error_while("acquiring one-time key")?;

        let credential = match self
            .credential_factory
            .create_credential(
                &key.reference(),
                context.signature_qualifier,
                context.caller,
                context.sad,
            )
            .await
        {
            Ok(credential) => credential,
            Err(error) => {
                // no token exists yet, so the regular cleanup will not run for this key
                self.cleanup(&key).await;
                return Err(NestedError::new("creating one-time credential", error).into());
            }
        };

        Ok(SigningToken::OneTime { key, credential })
    }

    pub(super) async fn cleanup(&self, key: &RenewableKey) {
        if let Err(error) = self.key_pool.delete_key(key).await {
            tracing::warn!(
                key_alias = %key.key_alias,
                %error,
                "Failed to delete one-time key"
            );
        }
    }
}
