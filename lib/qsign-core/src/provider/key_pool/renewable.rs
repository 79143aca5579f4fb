use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use super::error::KeyPoolError;
use super::{CryptoTokenLocks, generate_key_alias, remove_unpersisted_key};
use crate::error::ContextWithErrorCode;
use crate::model::crypto_token::{CryptoToken, KeyAlgorithm, KeyUsage};
use crate::model::signing_key::{KeyReference, RenewableKey};
use crate::proto::clock::Clock;
use crate::provider::crypto_token::CryptoTokenClient;
use crate::provider::crypto_token::model::{KeyQueryFilter, TokenKeyInfo};
use crate::provider::worker::WorkerRegistry;
use crate::repository::session_repository::SessionRepository;
use crate::repository::signing_key_repository::RenewableKeyRepository;

/// Pool of ephemeral keys used by one-time and session tokens.
///
/// Acquired rows are flagged in use and stay until the key is deleted from both the crypto token
/// and the database. Session keys stay in use for the lifetime of their session.
pub struct RenewableKeyPool {
    repository: Arc<dyn RenewableKeyRepository>,
    session_repository: Arc<dyn SessionRepository>,
    crypto_token_client: Arc<dyn CryptoTokenClient>,
    worker_registry: Arc<WorkerRegistry>,
    locks: Arc<CryptoTokenLocks>,
    clock: Arc<dyn Clock>,
}

impl RenewableKeyPool {
    pub fn new(
        repository: Arc<dyn RenewableKeyRepository>,
        session_repository: Arc<dyn SessionRepository>,
        crypto_token_client: Arc<dyn CryptoTokenClient>,
        worker_registry: Arc<WorkerRegistry>,
        locks: Arc<CryptoTokenLocks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            session_repository,
            crypto_token_client,
            worker_registry,
            locks,
            clock,
        }
    }

    /// Takes the first free key of the token and algorithm, generating a new one if none is free.
    /// The returned key is always in use.
    pub async fn acquire_key(
        &self,
        crypto_token: &CryptoToken,
        algorithm: KeyAlgorithm,
    ) -> Result<RenewableKey, KeyPoolError> {
        let _guard = self.locks.lock(crypto_token.id).await;

        let free = self
            .repository
            .acquire_free(crypto_token.id, algorithm, self.clock.now_utc())
            .await
            .error_while("acquiring free key")?;

        if let Some(key) = free {
            tracing::debug!(
                crypto_token = %crypto_token.name,
                %algorithm,
                key_alias = %key.key_alias,
                "Acquired pooled key"
            );
            return Ok(key);
        }

        self.generate(crypto_token, algorithm, true).await
    }

    /// Adds a free key to the pool
    pub async fn generate_key(
        &self,
        crypto_token: &CryptoToken,
        algorithm: KeyAlgorithm,
    ) -> Result<RenewableKey, KeyPoolError> {
        let _guard = self.locks.lock(crypto_token.id).await;
        self.generate(crypto_token, algorithm, false).await
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

    /// Removes the key from the crypto token, then its pool row.
    /// A key already missing in the crypto token is not an error.
    pub async fn delete_key(&self, key: &RenewableKey) -> Result<(), KeyPoolError> {
        let crypto_token = self
            .worker_registry
            .get_crypto_token_by_id(key.crypto_token_id)
            .ok_or(KeyPoolError::UnknownCryptoToken(key.crypto_token_id))?;

        self.crypto_token_client
            .remove_key(crypto_token, &key.key_alias, true)
            .await
            .error_while("removing key from crypto token")?;

        self.repository
            .delete(&key.id)
            .await
            .error_while("deleting pool row")?;

        tracing::debug!(
            crypto_token = %crypto_token.name,
            key_alias = %key.key_alias,
            "Deleted pooled key"
        );
        Ok(())
    }

    /// Deletes a key handed out by [`Self::acquire_key`], looked up by its alias.
    /// Without a pool row only the crypto token key is removed.
    pub async fn release_key(&self, key: &KeyReference) -> Result<(), KeyPoolError> {
        let row = self
            .repository
            .get_by_alias(key.crypto_token_id, &key.key_alias)
            .await
            .error_while("looking up pool row")?;

        if let Some(row) = row {
            return self.delete_key(&row).await;
        }

        let crypto_token = self
            .worker_registry
            .get_crypto_token_by_id(key.crypto_token_id)
            .ok_or(KeyPoolError::UnknownCryptoToken(key.crypto_token_id))?;

        tracing::debug!(
            crypto_token = %crypto_token.name,
            key_alias = %key.key_alias,
            "Released key has no pool row"
        );
        self.crypto_token_client
            .remove_key(crypto_token, &key.key_alias, true)
            .await
            .error_while("removing key from crypto token")?;
        Ok(())
    }

    /// In-use keys left behind by cleanups that did not complete.
    /// Keys still bound to a stored session are not listed.
    pub async fn stale_in_use_keys(
        &self,
        acquired_before: OffsetDateTime,
    ) -> Result<Vec<RenewableKey>, KeyPoolError> {
        let candidates = self
            .repository
            .get_in_use_acquired_before(acquired_before)
            .await
            .error_while("listing stale keys")?;

        let mut stale = Vec::with_capacity(candidates.len());
        for key in candidates {
            let bound = self
                .session_repository
                .has_session_with_key(key.crypto_token_id, &key.key_alias)
                .await
                .error_while("checking session keys")?;
            if !bound {
                stale.push(key);
            }
        }

        Ok(stale)
    }

    /// Ephemeral keys present in the crypto token without a pool row
    pub async fn find_orphaned_keys(
        &self,
        crypto_token: &CryptoToken,
    ) -> Result<Vec<TokenKeyInfo>, KeyPoolError> {
        let mut orphaned = vec![];

        let profiles = crypto_token
            .key_pool_profiles
            .iter()
            .filter(|profile| profile.usage == KeyUsage::Ephemeral);

        for profile in profiles {
            let filter = KeyQueryFilter {
                alias_prefix: Some(format!("{}-", profile.alias_prefix)),
                algorithm: Some(profile.algorithm),
            };
            let keys = self
                .crypto_token_client
                .query_keys(crypto_token, filter, false)
                .await
                .error_while("querying crypto token keys")?;

            for key in keys {
                let row = self
                    .repository
                    .get_by_alias(crypto_token.id, &key.alias)
                    .await
                    .error_while("looking up pool row")?;
                if row.is_none() {
                    orphaned.push(key);
                }
            }
        }

        Ok(orphaned)
    }

    async fn generate(
        &self,
        crypto_token: &CryptoToken,
        algorithm: KeyAlgorithm,
        in_use: bool,
    ) -> Result<RenewableKey, KeyPoolError> {
        let profile = crypto_token
            .key_pool_profile(algorithm, KeyUsage::Ephemeral)
            .ok_or_else(|| KeyPoolError::MissingKeyPoolProfile {
                crypto_token: crypto_token.name.to_owned(),
                algorithm,
                usage: KeyUsage::Ephemeral,
            })?;

        let key_alias = self
            .crypto_token_client
            .generate_key(
                crypto_token,
                &generate_key_alias(&profile.alias_prefix),
                algorithm,
                &profile.key_specification,
            )
            .await
            .error_while("generating key")?;

        tracing::info!(
            crypto_token = %crypto_token.name,
            %algorithm,
            %key_alias,
            "Generated pool key"
        );

        let now = self.clock.now_utc();
        let key = RenewableKey {
            id: Uuid::new_v4().into(),
            created_date: now,
            crypto_token_id: crypto_token.id,
            key_alias,
            algorithm,
            in_use,
            acquired_at: in_use.then_some(now),
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
}
