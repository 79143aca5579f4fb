use std::sync::Arc;

use shared_types::SigningKeyId;

use super::{RetryPolicy, with_retry};
use crate::model::crypto_token::{CryptoTokenId, KeyAlgorithm};
use crate::model::signing_key::SingleUseKey;
use crate::repository::error::DataLayerError;
use crate::repository::signing_key_repository::SingleUseKeyRepository;

pub(crate) struct RetryingSingleUseKeyRepository {
    pub inner: Arc<dyn SingleUseKeyRepository>,
    pub policy: RetryPolicy,
}

#[async_trait::async_trait]
impl SingleUseKeyRepository for RetryingSingleUseKeyRepository {
    async fn take_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
    ) -> Result<Option<SingleUseKey>, DataLayerError> {
        with_retry(&self.policy, "single_use_key.take_free", || {
            self.inner.take_free(crypto_token_id, algorithm)
        })
        .await
    }

    async fn create(&self, key: SingleUseKey) -> Result<SigningKeyId, DataLayerError> {
        with_retry(&self.policy, "single_use_key.create", || {
            self.inner.create(key.clone())
        })
        .await
    }

    async fn count_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
    ) -> Result<u64, DataLayerError> {
        with_retry(&self.policy, "single_use_key.count_free", || {
            self.inner.count_free(crypto_token_id, algorithm)
        })
        .await
    }

    async fn delete(&self, id: &SigningKeyId) -> Result<(), DataLayerError> {
        with_retry(&self.policy, "single_use_key.delete", || self.inner.delete(id)).await
    }
}
