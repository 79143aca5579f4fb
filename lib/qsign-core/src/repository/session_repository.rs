use shared_types::SessionId;
use time::OffsetDateTime;

use super::error::DataLayerError;
use crate::model::crypto_token::CryptoTokenId;
use crate::model::session::{CredentialSession, SessionCredentialMetadata, SessionWithCredential};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores the session and its credential in one transaction.
    /// Fails with [`DataLayerError::AlreadyExists`] if the session id is taken.
    async fn create_session(
        &self,
        session: CredentialSession,
        credential: SessionCredentialMetadata,
    ) -> Result<(), DataLayerError>;

    async fn get_session(
        &self,
        id: &SessionId,
    ) -> Result<Option<SessionWithCredential>, DataLayerError>;

    async fn delete_session(&self, id: &SessionId) -> Result<(), DataLayerError>;

    /// Deletes sessions that expired before `cutoff` together with their credentials.
    /// Returns the deleted credentials, their keys are still in the crypto token.
    async fn delete_expired_before(
        &self,
        cutoff: OffsetDateTime,
    ) -> Result<Vec<SessionCredentialMetadata>, DataLayerError>;

    /// Whether a stored session, expired or not, signs with the key
    async fn has_session_with_key(
        &self,
        crypto_token_id: CryptoTokenId,
        key_alias: &str,
    ) -> Result<bool, DataLayerError>;
}
