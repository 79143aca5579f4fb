use std::sync::Arc;

use shared_types::SessionId;

use super::error::TokenProviderError;
use super::{SigningToken, TokenContext, check_compatibility};
use crate::error::{ContextWithErrorCode, NestedError};
use crate::model::session::{SessionStatus, SessionWithCredential};
use crate::model::signing_key::RenewableKey;
use crate::proto::clock::Clock;
use crate::provider::credential_factory::CredentialFactory;
use crate::provider::key_pool::renewable::RenewableKeyPool;
use crate::service::error::{EntityAlreadyExistsError, ServiceError};
use crate::service::session::SessionService;

/// Credential bound to a caller supplied session id, created on first use.
pub struct SessionTokenProvider {
    key_pool: Arc<RenewableKeyPool>,
    credential_factory: Arc<CredentialFactory>,
    session_service: Arc<SessionService>,
    clock: Arc<dyn Clock>,
}

impl SessionTokenProvider {
    pub fn new(
        key_pool: Arc<RenewableKeyPool>,
        credential_factory: Arc<CredentialFactory>,
        session_service: Arc<SessionService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            key_pool,
            credential_factory,
            session_service,
            clock,
        }
    }

    pub(super) async fn get_signing_token(
        &self,
        session_id: &SessionId,
        context: &TokenContext<'_>,
    ) -> Result<SigningToken, TokenProviderError> {
        let lookup = self
            .session_service
            .get_session(session_id)
            .await
            .error_while("loading session")?;

        match (lookup.status, lookup.session) {
            (SessionStatus::Active, Some(existing)) => into_token(existing, context),
            (SessionStatus::Expired, _) => {
                Err(TokenProviderError::SessionExpired(session_id.to_owned()))
            }
            _ => self.create_session(session_id, context).await,
        }
    }

    async fn create_session(
        &self,
        session_id: &SessionId,
        context: &TokenContext<'_>,
    ) -> Result<SigningToken, TokenProviderError> {
        let profile = self
            .credential_factory
            .signature_qualifier_profile(context.signature_qualifier)
            .error_while("resolving signature qualifier")?;
        let validity_offset = profile.validity_offset;
        let validity = profile.validity;

        let key = self
            .key_pool
            .acquire_key(context.crypto_token, context.key_algorithm)
            .await
            .error_while("acquiring session key")?;

        let credential = match self
            .credential_factory
            .create_credential(
                &key.reference(),
                context.signature_qualifier,
                context.caller,
                context.sad,
            )
            .await
        {
            Ok(credential) => credential,
            Err(error) => {
                self.release_key(&key).await;
                return Err(NestedError::new("creating session credential", error).into());
            }
        };

        let expires_at = self.clock.now_utc() + validity_offset + validity;

        match self
            .session_service
            .create_session(session_id, credential, expires_at)
            .await
        {
            Ok(created) => into_token(created, context),
            Err(ServiceError::EntityAlreadyExists(EntityAlreadyExistsError::Session(_))) => {
                tracing::debug!(
                    session_id = %session_id,
                    "Session created concurrently, using stored session"
                );
                self.release_key(&key).await;

                let lookup = self
                    .session_service
                    .get_session(session_id)
                    .await
                    .error_while("reloading session")?;
                match (lookup.status, lookup.session) {
                    (SessionStatus::Active, Some(existing)) => into_token(existing, context),
                    _ => Err(TokenProviderError::SessionExpired(session_id.to_owned())),
                }
            }
            Err(error) => {
                self.release_key(&key).await;
                Err(NestedError::new("storing session", error).into())
            }
        }
    }

    async fn release_key(&self, key: &RenewableKey) {
        if let Err(error) = self.key_pool.delete_key(key).await {
            tracing::warn!(
                key_alias = %key.key_alias,
                %error,
                "Failed to delete unused session key"
            );
        }
    }
}

fn into_token(
    stored: SessionWithCredential,
    context: &TokenContext<'_>,
) -> Result<SigningToken, TokenProviderError> {
    if stored.credential.credential.user_id != context.caller.id {
        return Err(TokenProviderError::SessionNotOwned(stored.session.id));
    }

    check_compatibility(&stored.credential.credential, context)?;

    Ok(SigningToken::Session {
        session: stored.session,
        credential: stored.credential,
    })
}
