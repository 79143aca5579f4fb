use shared_types::CredentialId;
use time::OffsetDateTime;

use super::error::DataLayerError;
use crate::model::credential::{CredentialMetadata, CredentialStatus};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn create_credential(
        &self,
        credential: CredentialMetadata,
    ) -> Result<CredentialId, DataLayerError>;

    async fn get_credential(
        &self,
        id: &CredentialId,
    ) -> Result<Option<CredentialMetadata>, DataLayerError>;

    async fn get_credentials_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<CredentialMetadata>, DataLayerError>;

    async fn update_status(
        &self,
        id: &CredentialId,
        status: CredentialStatus,
        last_modified: OffsetDateTime,
    ) -> Result<(), DataLayerError>;

    async fn delete_credential(&self, id: &CredentialId) -> Result<(), DataLayerError>;
}
