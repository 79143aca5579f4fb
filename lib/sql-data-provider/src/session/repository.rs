use qsign_core::model::credential::CredentialMetadata;
use qsign_core::model::crypto_token::CryptoTokenId;
use qsign_core::model::session::{
    CredentialSession, SessionCredentialMetadata, SessionWithCredential,
};
use qsign_core::repository::error::DataLayerError;
use qsign_core::repository::session_repository::SessionRepository;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};
use shared_types::SessionId;
use time::OffsetDateTime;

use super::SessionProvider;
use crate::credential::mapper::to_active_model;
use crate::entity::{credential, credential_session};
use crate::error_mapper::to_data_layer_error;

impl From<credential_session::Model> for CredentialSession {
    fn from(value: credential_session::Model) -> Self {
        Self {
            id: value.id,
            credential_id: value.credential_id,
            created_date: value.created_date,
            expires_at: value.expires_at,
        }
    }
}

#[async_trait::async_trait]
impl SessionRepository for SessionProvider {
    async fn create_session(
        &self,
        session: CredentialSession,
        credential: SessionCredentialMetadata,
    ) -> Result<(), DataLayerError> {
        let credential = to_active_model(credential.credential, Some(credential.session_id))?;

        let tx = self.db.begin().await.map_err(to_data_layer_error)?;

        credential_session::ActiveModel {
            id: Set(session.id),
            credential_id: Set(session.credential_id),
            created_date: Set(session.created_date),
            expires_at: Set(session.expires_at),
        }
        .insert(&tx)
        .await
        .map_err(to_data_layer_error)?;

        credential
            .insert(&tx)
            .await
            .map_err(to_data_layer_error)?;

        tx.commit().await.map_err(to_data_layer_error)
    }

    async fn get_session(
        &self,
        id: &SessionId,
    ) -> Result<Option<SessionWithCredential>, DataLayerError> {
        let Some((session, credential)) = credential_session::Entity::find_by_id(id)
            .find_also_related(credential::Entity)
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?
        else {
            return Ok(None);
        };

        let credential = credential.ok_or_else(|| {
            DataLayerError::MappingError(format!("session `{id}` has no credential"))
        })?;

        Ok(Some(SessionWithCredential {
            credential: SessionCredentialMetadata {
                session_id: session.id.to_owned(),
                credential: CredentialMetadata::try_from(credential)?,
            },
            session: session.into(),
        }))
    }

    async fn delete_session(&self, id: &SessionId) -> Result<(), DataLayerError> {
        let tx = self.db.begin().await.map_err(to_data_layer_error)?;

        credential::Entity::delete_many()
            .filter(credential::Column::SessionId.eq(id))
            .exec(&tx)
            .await
            .map_err(to_data_layer_error)?;

        let result = credential_session::Entity::delete_by_id(id)
            .exec(&tx)
            .await
            .map_err(to_data_layer_error)?;

        if result.rows_affected == 0 {
            return Err(DataLayerError::RecordNotUpdated);
        }

        tx.commit().await.map_err(to_data_layer_error)
    }

    async fn delete_expired_before(
        &self,
        cutoff: OffsetDateTime,
    ) -> Result<Vec<SessionCredentialMetadata>, DataLayerError> {
        let tx = self.db.begin().await.map_err(to_data_layer_error)?;

        let expired = credential_session::Entity::find()
            .find_also_related(credential::Entity)
            .filter(credential_session::Column::ExpiresAt.lt(cutoff))
            .all(&tx)
            .await
            .map_err(to_data_layer_error)?;

        if expired.is_empty() {
            return Ok(vec![]);
        }

        let expired_ids: Vec<SessionId> = expired
            .iter()
            .map(|(session, _)| session.id.to_owned())
            .collect();

        let deleted_credentials = expired
            .into_iter()
            .filter_map(|(session, credential)| {
                credential.map(|credential| {
                    CredentialMetadata::try_from(credential).map(|credential| {
                        SessionCredentialMetadata {
                            session_id: session.id,
                            credential,
                        }
                    })
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        credential::Entity::delete_many()
            .filter(credential::Column::SessionId.is_in(expired_ids.iter()))
            .exec(&tx)
            .await
            .map_err(to_data_layer_error)?;

        credential_session::Entity::delete_many()
            .filter(credential_session::Column::Id.is_in(expired_ids.iter()))
            .exec(&tx)
            .await
            .map_err(to_data_layer_error)?;

        tx.commit().await.map_err(to_data_layer_error)?;

        Ok(deleted_credentials)
    }

    async fn has_session_with_key(
        &self,
        crypto_token_id: CryptoTokenId,
        key_alias: &str,
    ) -> Result<bool, DataLayerError> {
        let count = credential::Entity::find()
            .filter(credential::Column::SessionId.is_not_null())
            .filter(credential::Column::CryptoTokenId.eq(crypto_token_id.0))
            .filter(credential::Column::KeyAlias.eq(key_alias))
            .count(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(count > 0)
    }
}
