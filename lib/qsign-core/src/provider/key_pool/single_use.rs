use std::sync::Arc;

use uuid::Uuid;

use super::error::KeyPoolError;
use super::{CryptoTokenLocks, generate_key_alias, remove_unpersisted_key};
use crate::error::ContextWithErrorCode;
use crate::model::crypto_token::{CryptoToken, KeyAlgorithm, KeyPoolProfile, KeyUsage};
use crate::model::signing_key::{KeyReference, SingleUseKey};
use crate::proto::clock::Clock;
use crate::provider::crypto_token::CryptoTokenClient;
use crate::repository::signing_key_repository::SingleUseKeyRepository;

/// Pool of pre-provisioned long-term keys.
///
/// A row is a ticket: acquisition deletes it and the alias becomes the standing reference of the
/// credential built on it.
pub struct SingleUseKeyPool {
    repository: Arc<dyn SingleUseKeyRepository>,
    crypto_token_client: Arc<dyn CryptoTokenClient>,
    locks: Arc<CryptoTokenLocks>,
    clock: Arc<dyn Clock>,
}

impl SingleUseKeyPool {
    pub fn new(
        repository: Arc<dyn SingleUseKeyRepository>,
        crypto_token_client: Arc<dyn CryptoTokenClient>,
        locks: Arc<CryptoTokenLocks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            crypto_token_client,
            locks,
            clock,
        }
    }

    /// Consumes the first free row, or generates a key without creating a row
    pub async fn acquire_key(
        &self,
        crypto_token: &CryptoToken,
        algorithm: KeyAlgorithm,
    ) -> Result<KeyReference, KeyPoolError> {
        let _guard = self.locks.lock(crypto_token.id).await;

        let free = self
            .repository
            .take_free(crypto_token.id, algorithm)
            .await
            .error_while("taking free key")?;

        if let Some(key) = free {
            tracing::debug!(
                crypto_token = %crypto_token.name,
                %algorithm,
                key_alias = %key.key_alias,
                "Took pooled long-term key"
            );
            return Ok(key.reference());
        }

        let profile = long_term_profile(crypto_token, algorithm)?;
        let key_alias = self.generate(crypto_token, profile).await?;

        Ok(KeyReference {
            crypto_token_id: crypto_token.id,
            key_alias,
            algorithm,
        })
    }

    /// Pre-provisions a free key
    pub async fn generate_key(
        &self,
        crypto_token: &CryptoToken,
        algorithm: KeyAlgorithm,
    ) -> Result<SingleUseKey, KeyPoolError> {
        let _guard = self.locks.lock(crypto_token.id).await;

        let profile = long_term_profile(crypto_token, algorithm)?;
        let key_alias = self.generate(crypto_token, profile).await?;

        let key = SingleUseKey {
            id: Uuid::new_v4().into(),
            created_date: self.clock.now_utc(),
            crypto_token_id: crypto_token.id,
            key_alias,
            algorithm,
        };

        if let Err(error) = self.repository.create(key.clone()).await {
            return Err(remove_unpersisted_key(
                self.crypto_token_client.as_ref(),
                crypto_token,
                &key.key_alias,
                error,
            )
            .await);
        }

        Ok(key)
    }

    pub async fn get_number_of_usable_keys(
        &self,
        crypto_token: &CryptoToken,
        algorithm: KeyAlgorithm,
    ) -> Result<u64, KeyPoolError> {
        Ok(self
            .repository
            .count_free(crypto_token.id, algorithm)
            .await
            .error_while("counting free keys")?)
    }

    /// Removes only the pool row, the crypto token is not touched
    pub async fn delete_key(&self, key: &SingleUseKey) -> Result<(), KeyPoolError> {
        Ok(self
            .repository
            .delete(&key.id)
            .await
            .error_while("deleting pool row")?)
    }

    /// Removes a key that was handed out by [`Self::acquire_key`] and is no longer referenced
    pub async fn remove_unbound_key(
        &self,
        crypto_token: &CryptoToken,
        key: &KeyReference,
    ) -> Result<(), KeyPoolError> {
        self.crypto_token_client
            .remove_key(crypto_token, &key.key_alias, true)
            .await
            .error_while("removing key from crypto token")?;

        tracing::debug!(
            crypto_token = %crypto_token.name,
            key_alias = %key.key_alias,
            "Removed long-term key"
        );
        Ok(())
    }

    async fn generate(
        &self,
        crypto_token: &CryptoToken,
        profile: &KeyPoolProfile,
    ) -> Result<String, KeyPoolError> {
        let key_alias = self
            .crypto_token_client
            .generate_key(
                crypto_token,
                &generate_key_alias(&profile.alias_prefix),
                profile.algorithm,
                &profile.key_specification,
            )
            .await
            .error_while("generating key")?;

        tracing::info!(
            crypto_token = %crypto_token.name,
            algorithm = %profile.algorithm,
            %key_alias,
            "Generated long-term key"
        );
        Ok(key_alias)
    }
}

fn long_term_profile(
    crypto_token: &CryptoToken,
    algorithm: KeyAlgorithm,
) -> Result<&KeyPoolProfile, KeyPoolError> {
    crypto_token
        .key_pool_profile(algorithm, KeyUsage::LongTerm)
        .ok_or_else(|| KeyPoolError::MissingKeyPoolProfile {
            crypto_token: crypto_token.name.to_owned(),
            algorithm,
            usage: KeyUsage::LongTerm,
        })
}
