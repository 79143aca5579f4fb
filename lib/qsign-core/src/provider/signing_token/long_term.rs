use std::sync::Arc;

use shared_types::CredentialId;

use super::error::TokenProviderError;
use super::{SigningToken, TokenContext, check_compatibility};
use crate::error::ContextWithErrorCode;
use crate::model::credential::CredentialStatus;
use crate::repository::credential_repository::CredentialRepository;

/// Persisted credential reused for every call with the same id.
pub struct LongTermTokenProvider {
    credential_repository: Arc<dyn CredentialRepository>,
}

impl LongTermTokenProvider {
    pub fn new(credential_repository: Arc<dyn CredentialRepository>) -> Self {
        Self {
            credential_repository,
        }
    }

    pub(super) async fn get_signing_token(
        &self,
        credential_id: &CredentialId,
        context: &TokenContext<'_>,
    ) -> Result<SigningToken, TokenProviderError> {
        let credential = self
            .credential_repository
            .get_credential(credential_id)
            .await
            .error_while("loading credential")?
            .ok_or(TokenProviderError::CredentialNotFound(*credential_id))?;

        if credential.user_id != context.caller.id {
            return Err(TokenProviderError::CredentialNotOwned(*credential_id));
        }

        if credential.status == CredentialStatus::Disabled {
            return Err(TokenProviderError::CredentialDisabled(*credential_id));
        }

        check_compatibility(&credential, context)?;

        Ok(SigningToken::LongTerm { credential })
    }
}
