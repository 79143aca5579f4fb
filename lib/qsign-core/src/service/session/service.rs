use shared_types::SessionId;
use time::{Duration, OffsetDateTime};

use super::SessionService;
use super::dto::SessionLookup;
use crate::error::{ContextWithErrorCode, NestedError};
use crate::model::credential::CredentialMetadata;
use crate::model::session::{
    CredentialSession, SessionCredentialMetadata, SessionStatus, SessionWithCredential,
};
use crate::repository::error::DataLayerError;
use crate::service::error::{EntityAlreadyExistsError, EntityNotFoundError, ServiceError};

impl SessionService {
    /// Stores a new session together with its credential
    ///
    /// # Arguments
    ///
    /// * `session_id` - caller supplied id, fails with `EntityAlreadyExists` when taken
    /// * `credential` - credential issued for the session
    /// * `expires_at` - end of the session
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn create_session(
        &self,
        session_id: &SessionId,
        credential: CredentialMetadata,
        expires_at: OffsetDateTime,
    ) -> Result<SessionWithCredential, ServiceError> {
        let session = CredentialSession {
            id: session_id.to_owned(),
            credential_id: credential.id,
            created_date: self.clock.now_utc(),
            expires_at,
        };
        let credential = SessionCredentialMetadata {
            session_id: session_id.to_owned(),
            credential,
        };

        match self
            .session_repository
            .create_session(session.clone(), credential.clone())
            .await
        {
            Ok(()) => {}
            Err(DataLayerError::AlreadyExists) => {
                return Err(EntityAlreadyExistsError::Session(session_id.to_owned()).into());
            }
            Err(error) => return Err(NestedError::new("creating session", error).into()),
        }

        tracing::info!(session_id = %session_id, %expires_at, "Created session");
        Ok(SessionWithCredential {
            session,
            credential,
        })
    }

    /// Looks up a session, deriving its status from the stored expiry
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn get_session(&self, session_id: &SessionId) -> Result<SessionLookup, ServiceError> {
        let session = self
            .session_repository
            .get_session(session_id)
            .await
            .error_while("loading session")?;

        let status = match &session {
            None => SessionStatus::Nonexistent,
            Some(found) => found.session.status(self.clock.now_utc()),
        };

        Ok(SessionLookup { status, session })
    }

    /// Deletes a session and its credential, active sessions included, then releases the
    /// session key
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn delete_session(&self, session_id: &SessionId) -> Result<(), ServiceError> {
        let lookup = self.get_session(session_id).await?;

        let stored = match (lookup.status, lookup.session) {
            (SessionStatus::Nonexistent, _) | (_, None) => {
                return Err(EntityNotFoundError::Session(session_id.to_owned()).into());
            }
            (SessionStatus::Active, Some(stored)) => {
                tracing::warn!(session_id = %session_id, "Deleting active session");
                stored
            }
            (SessionStatus::Expired, Some(stored)) => stored,
        };

        self.session_repository
            .delete_session(session_id)
            .await
            .error_while("deleting session")?;

        self.release_session_key(&stored.credential).await;
        Ok(())
    }

    /// Deletes sessions that expired more than `older_than` ago, returns how many were deleted
    #[tracing::instrument(level = "debug", skip_all, err(Debug))]
    pub async fn clean_expired_sessions(&self, older_than: Duration) -> Result<u64, ServiceError> {
        let cutoff = self.clock.now_utc() - older_than;

        let deleted = self
            .session_repository
            .delete_expired_before(cutoff)
            .await
            .error_while("deleting expired sessions")?;

        for credential in &deleted {
            self.release_session_key(credential).await;
        }

        let deleted = deleted.len() as u64;
        tracing::info!(deleted, %cutoff, "Cleaned expired sessions");
        Ok(deleted)
    }

    /// Best effort, a key that fails to be released is reported as stale by the key pool
    async fn release_session_key(&self, credential: &SessionCredentialMetadata) {
        let key = credential.credential.key_reference();
        if let Err(error) = self.key_pool.release_key(&key).await {
            tracing::warn!(
                session_id = %credential.session_id,
                key_alias = %key.key_alias,
                %error,
                "Failed to release session key"
            );
        }
    }
}
