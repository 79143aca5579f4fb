use qsign_core::model::credential::{CredentialMetadata, CredentialStatus};
use qsign_core::repository::credential_repository::CredentialRepository;
use qsign_core::repository::error::DataLayerError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, Unchanged,
};
use shared_types::CredentialId;
use time::OffsetDateTime;

use super::CredentialProvider;
use super::mapper::to_active_model;
use crate::entity::credential;
use crate::error_mapper::to_data_layer_error;

#[async_trait::async_trait]
impl CredentialRepository for CredentialProvider {
    async fn create_credential(
        &self,
        credential: CredentialMetadata,
    ) -> Result<CredentialId, DataLayerError> {
        let id = credential.id;

        to_active_model(credential, None)?
            .insert(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(id)
    }

    async fn get_credential(
        &self,
        id: &CredentialId,
    ) -> Result<Option<CredentialMetadata>, DataLayerError> {
        credential::Entity::find_by_id(id)
            .filter(credential::Column::SessionId.is_null())
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .map(CredentialMetadata::try_from)
            .transpose()
    }

    async fn get_credentials_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<CredentialMetadata>, DataLayerError> {
        credential::Entity::find()
            .filter(credential::Column::UserId.eq(user_id))
            .filter(credential::Column::SessionId.is_null())
            .order_by_asc(credential::Column::CreatedDate)
            .all(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .into_iter()
            .map(CredentialMetadata::try_from)
            .collect()
    }

    async fn update_status(
        &self,
        id: &CredentialId,
        status: CredentialStatus,
        last_modified: OffsetDateTime,
    ) -> Result<(), DataLayerError> {
        let model = credential::ActiveModel {
            id: Unchanged(*id),
            status: Set(status.to_string()),
            last_modified: Set(last_modified),
            ..Default::default()
        };

        model.update(&self.db).await.map_err(to_data_layer_error)?;

        Ok(())
    }

    async fn delete_credential(&self, id: &CredentialId) -> Result<(), DataLayerError> {
        let result = credential::Entity::delete_many()
            .filter(credential::Column::Id.eq(id))
            .filter(credential::Column::SessionId.is_null())
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        if result.rows_affected == 0 {
            return Err(DataLayerError::RecordNotUpdated);
        }

        Ok(())
    }
}
