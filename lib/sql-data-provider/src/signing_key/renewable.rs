use qsign_core::model::crypto_token::{CryptoTokenId, KeyAlgorithm};
use qsign_core::model::signing_key::RenewableKey;
use qsign_core::repository::error::DataLayerError;
use qsign_core::repository::signing_key_repository::RenewableKeyRepository;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use shared_types::SigningKeyId;
use time::OffsetDateTime;

use super::RenewableKeyProvider;
use crate::entity::renewable_key;
use crate::error_mapper::to_data_layer_error;

#[async_trait::async_trait]
impl RenewableKeyRepository for RenewableKeyProvider {
    async fn acquire_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
        acquired_at: OffsetDateTime,
    ) -> Result<Option<RenewableKey>, DataLayerError> {
        let tx = self.db.begin().await.map_err(to_data_layer_error)?;

        let Some(free) = renewable_key::Entity::find()
            .filter(renewable_key::Column::CryptoTokenId.eq(crypto_token_id.0))
            .filter(renewable_key::Column::Algorithm.eq(algorithm.to_string()))
            .filter(renewable_key::Column::InUse.eq(false))
            .order_by_asc(renewable_key::Column::CreatedDate)
            .lock_exclusive()
            .one(&tx)
            .await
            .map_err(to_data_layer_error)?
        else {
            return Ok(None);
        };

        let mut model: renewable_key::ActiveModel = free.into();
        model.in_use = Set(true);
        model.acquired_at = Set(Some(acquired_at));
        let acquired = model.update(&tx).await.map_err(to_data_layer_error)?;

        tx.commit().await.map_err(to_data_layer_error)?;

        acquired.try_into().map(Some)
    }

    async fn create(&self, key: RenewableKey) -> Result<SigningKeyId, DataLayerError> {
        let id = key.id;

        renewable_key::ActiveModel::from(key)
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
        renewable_key::Entity::find()
            .filter(renewable_key::Column::CryptoTokenId.eq(crypto_token_id.0))
            .filter(renewable_key::Column::Algorithm.eq(algorithm.to_string()))
            .filter(renewable_key::Column::InUse.eq(false))
            .count(&self.db)
            .await
            .map_err(to_data_layer_error)
    }

    async fn get_by_alias(
        &self,
        crypto_token_id: CryptoTokenId,
        key_alias: &str,
    ) -> Result<Option<RenewableKey>, DataLayerError> {
        renewable_key::Entity::find()
            .filter(renewable_key::Column::CryptoTokenId.eq(crypto_token_id.0))
            .filter(renewable_key::Column::KeyAlias.eq(key_alias))
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .map(RenewableKey::try_from)
            .transpose()
    }

    async fn get_in_use_acquired_before(
        &self,
        acquired_before: OffsetDateTime,
    ) -> Result<Vec<RenewableKey>, DataLayerError> {
        renewable_key::Entity::find()
            .filter(renewable_key::Column::InUse.eq(true))
            .filter(renewable_key::Column::AcquiredAt.lt(acquired_before))
            .order_by_asc(renewable_key::Column::AcquiredAt)
            .all(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .into_iter()
            .map(RenewableKey::try_from)
            .collect()
    }

    async fn delete(&self, id: &SigningKeyId) -> Result<(), DataLayerError> {
        let result = renewable_key::Entity::delete_by_id(*id)
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        if result.rows_affected == 0 {
            return Err(DataLayerError::RecordNotUpdated);
        }

        Ok(())
    }
}
