//! Signing tokens and the three lifecycles that produce them.
//!
//! The set of lifecycles is closed, [`SigningTokenProviders`] dispatches over it with a `match`.

use error::TokenProviderError;
use long_term::LongTermTokenProvider;
use one_time::OneTimeTokenProvider;
use session::SessionTokenProvider;
use shared_types::{CredentialId, SessionId};

use crate::model::caller::Caller;
use crate::model::credential::CredentialMetadata;
use crate::model::crypto_token::{CryptoToken, CryptoTokenId, KeyAlgorithm};
use crate::model::session::{CredentialSession, SessionCredentialMetadata};
use crate::model::signature::SignatureActivationData;
use crate::model::signing_key::RenewableKey;

pub mod error;
pub mod long_term;
pub mod one_time;
pub mod session;


/// Ready to use key and certificate. Never persisted as such.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningToken {
    OneTime {
        key: RenewableKey,
        credential: CredentialMetadata,
    },
    LongTerm {
        credential: CredentialMetadata,
    },
    Session {
        session: CredentialSession,
        credential: SessionCredentialMetadata,
    },
}

impl SigningToken {
    pub fn credential(&self) -> &CredentialMetadata {
        match self {
            Self::OneTime { credential, .. } | Self::LongTerm { credential } => credential,
            Self::Session { credential, .. } => &credential.credential,
        }
    }

    pub fn key_alias(&self) -> &str {
        &self.credential().key_alias
    }

    pub fn crypto_token_id(&self) -> CryptoTokenId {
        self.credential().crypto_token_id
    }

    pub fn multisign(&self) -> u32 {
        self.credential().multisign
    }

    pub fn certificate_chain(&self) -> &[Vec<u8>] {
        &self.credential().certificate_chain
    }

    pub fn can_sign_data(&self, data: &[Vec<u8>]) -> bool {
        data.len() as u64 <= u64::from(self.multisign())
    }
}

/// A stored credential can only sign on the worker's crypto token, with its own key algorithm and
/// for the qualifier it was issued for
fn check_compatibility(
    credential: &CredentialMetadata,
    context: &TokenContext<'_>,
) -> Result<(), TokenProviderError> {
    if credential.crypto_token_id != context.crypto_token.id {
        return Err(TokenProviderError::IncompatibleCredential(format!(
            "key lives in crypto token {}, worker uses `{}`",
            credential.crypto_token_id, context.crypto_token.name
        )));
    }

    if credential.key_algorithm != context.key_algorithm {
        return Err(TokenProviderError::IncompatibleCredential(format!(
            "{} key cannot produce {} signatures",
            credential.key_algorithm, context.key_algorithm
        )));
    }

    if credential.signature_qualifier != context.signature_qualifier {
        return Err(TokenProviderError::IncompatibleCredential(format!(
            "issued for `{}`",
            credential.signature_qualifier
        )));
    }

    Ok(())
}

/// Lifecycle chosen by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenConfiguration {
    OneTime,
    LongTerm { credential_id: CredentialId },
    Session { session_id: SessionId },
}

/// Request data a token provider needs to produce a token.
pub struct TokenContext<'a> {
    pub caller: &'a Caller,
    /// Crypto token of the selected worker
    pub crypto_token: &'a CryptoToken,
    pub signature_qualifier: &'a str,
    pub key_algorithm: KeyAlgorithm,
    pub sad: &'a SignatureActivationData,
}

pub struct SigningTokenProviders {
    one_time: OneTimeTokenProvider,
    long_term: LongTermTokenProvider,
    session: SessionTokenProvider,
}

impl SigningTokenProviders {
    pub fn new(
        one_time: OneTimeTokenProvider,
        long_term: LongTermTokenProvider,
        session: SessionTokenProvider,
    ) -> Self {
        Self {
            one_time,
            long_term,
            session,
        }
    }

    pub async fn get_signing_token(
        &self,
        configuration: &TokenConfiguration,
        context: &TokenContext<'_>,
    ) -> Result<SigningToken, TokenProviderError> {
        match configuration {
            TokenConfiguration::OneTime => self.one_time.get_signing_token(context).await,
            TokenConfiguration::LongTerm { credential_id } => {
                self.long_term
                    .get_signing_token(credential_id, context)
                    .await
            }
            TokenConfiguration::Session { session_id } => {
                self.session.get_signing_token(session_id, context).await
            }
        }
    }

    /// Best effort, failures are logged
    pub async fn cleanup(&self, token: SigningToken) {
        match token {
            SigningToken::OneTime { key, .. } => self.one_time.cleanup(&key).await,
            SigningToken::LongTerm { .. } | SigningToken::Session { .. } => {}
        }
    }
}
