use qsign_core::model::crypto_token::{CryptoTokenId, KeyAlgorithm};
use qsign_core::model::signing_key::SingleUseKey;
use qsign_core::repository::error::DataLayerError;
use qsign_core::repository::signing_key_repository::SingleUseKeyRepository;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use shared_types::SigningKeyId;

use super::SingleUseKeyProvider;
use crate::entity::single_use_key;
use crate::error_mapper::to_data_layer_error;

#[async_trait::async_trait]
impl SingleUseKeyRepository for SingleUseKeyProvider {
    async fn take_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
    ) -> Result<Option<SingleUseKey>, DataLayerError> {
        let tx = self.db.begin().await.map_err(to_data_layer_error)?;

        let Some(free) = single_use_key::Entity::find()
            .filter(single_use_key::Column::CryptoTokenId.eq(crypto_token_id.0))
            .filter(single_use_key::Column::Algorithm.eq(algorithm.to_string()))
            .order_by_asc(single_use_key::Column::CreatedDate)
            .lock_exclusive()
            .one(&tx)
            .await
            .map_err(to_data_layer_error)?
        else {
            return Ok(None);
        };

        single_use_key::Entity::delete_by_id(free.id)
            .exec(&tx)
            .await
            .map_err(to_data_layer_error)?;

        tx.commit().await.map_err(to_data_layer_error)?;

        free.try_into().map(Some)
    }

    async fn create(&self, key: SingleUseKey) -> Result<SigningKeyId, DataLayerError> {
        let id = key.id;

        single_use_key::ActiveModel::from(key)
            .insert(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(id)
    }

    async fn count_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
    ) -> Result<u64, DataLayerError> {
        single_use_key::Entity::find()
            .filter(single_use_key::Column::CryptoTokenId.eq(crypto_token_id.0))
            .filter(single_use_key::Column::Algorithm.eq(algorithm.to_string()))
            .count(&self.db)
            .await
            .map_err(to_data_layer_error)
    }

    async fn delete(&self, id: &SigningKeyId) -> Result<(), DataLayerError> {
        let result = single_use_key::Entity::delete_by_id(*id)
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        if result.rows_affected == 0 {
            return Err(DataLayerError::RecordNotUpdated);
        }

        Ok(())
    }
}
