use std::sync::Arc;

use shared_types::CredentialId;
use time::OffsetDateTime;

use super::{RetryPolicy, with_retry};
use crate::model::credential::{CredentialMetadata, CredentialStatus};
use crate::repository::credential_repository::CredentialRepository;
use crate::repository::error::DataLayerError;

pub(crate) struct RetryingCredentialRepository {
    pub inner: Arc<dyn CredentialRepository>,
    pub policy: RetryPolicy,
}

#[async_trait::async_trait]
impl CredentialRepository for RetryingCredentialRepository {
    async fn create_credential(
        &self,
        credential: CredentialMetadata,
    ) -> Result<CredentialId, DataLayerError> {
        with_retry(&self.policy, "credential.create", || {
            self.inner.create_credential(credential.clone())
        })
        .await
    }

    async fn get_credential(
        &self,
        id: &CredentialId,
    ) -> Result<Option<CredentialMetadata>, DataLayerError> {
        with_retry(&self.policy, "credential.get", || self.inner.get_credential(id)).await
    }

    async fn get_credentials_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<CredentialMetadata>, DataLayerError> {
        with_retry(&self.policy, "credential.get_by_user", || {
            self.inner.get_credentials_by_user(user_id)
        })
        .await
    }

    async fn update_status(
        &self,
        id: &CredentialId,
        status: CredentialStatus,
        last_modified: OffsetDateTime,
    ) -> Result<(), DataLayerError> {
        with_retry(&self.policy, "credential.update_status", || {
            self.inner.update_status(id, status, last_modified)
        })
        .await
    }

    async fn delete_credential(&self, id: &CredentialId) -> Result<(), DataLayerError> {
        with_retry(&self.policy, "credential.delete", || {
            self.inner.delete_credential(id)
        })
        .await
    }
}
