use shared_types::SigningKeyId;
use time::OffsetDateTime;

use super::error::DataLayerError;
use crate::model::crypto_token::{CryptoTokenId, KeyAlgorithm};
use crate::model::signing_key::{RenewableKey, SingleUseKey};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait RenewableKeyRepository: Send + Sync {
    /// Locks the first free row of the token and algorithm for update, flags it in use and
    /// commits, all in one transaction
    async fn acquire_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
        acquired_at: OffsetDateTime,
    ) -> Result<Option<RenewableKey>, DataLayerError>;

    async fn create(&self, key: RenewableKey) -> Result<SigningKeyId, DataLayerError>;

    async fn count_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
    ) -> Result<u64, DataLayerError>;

    async fn get_by_alias(
        &self,
        crypto_token_id: CryptoTokenId,
        key_alias: &str,
    ) -> Result<Option<RenewableKey>, DataLayerError>;

    async fn get_in_use_acquired_before(
        &self,
        acquired_before: OffsetDateTime,
    ) -> Result<Vec<RenewableKey>, DataLayerError>;

    async fn delete(&self, id: &SigningKeyId) -> Result<(), DataLayerError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait SingleUseKeyRepository: Send + Sync {
    /// Locks the first row of the token and algorithm for update and deletes it, in one
    /// transaction
    async fn take_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
    ) -> Result<Option<SingleUseKey>, DataLayerError>;

    async fn create(&self, key: SingleUseKey) -> Result<SigningKeyId, DataLayerError>;

    async fn count_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
    ) -> Result<u64, DataLayerError>;

    async fn delete(&self, id: &SigningKeyId) -> Result<(), DataLayerError>;
}
