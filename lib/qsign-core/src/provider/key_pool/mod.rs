//! Key pools of the crypto tokens.
//!
//! Both pools share one [`CryptoTokenLocks`] registry: every acquisition or generation on a crypto
//! token holds that token's lock, across all algorithms, for the whole database and crypto token
//! round trip. The lock is process local, separate instances only rely on database row locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use error::KeyPoolError;
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use crate::error::NestedError;
use crate::model::crypto_token::{CryptoToken, CryptoTokenId};
use crate::provider::crypto_token::CryptoTokenClient;
use crate::repository::error::DataLayerError;

pub mod error;
pub mod renewable;
pub mod single_use;


#[derive(Debug, Default)]
pub struct CryptoTokenLocks {
    locks: Mutex<HashMap<CryptoTokenId, Arc<tokio::sync::Mutex<()>>>>,
}

impl CryptoTokenLocks {
    pub fn new(crypto_tokens: impl IntoIterator<Item = CryptoTokenId>) -> Self {
        let locks = crypto_tokens
            .into_iter()
            .map(|id| (id, Arc::default()))
            .collect();

        Self {
            locks: Mutex::new(locks),
        }
    }

    pub async fn lock(&self, crypto_token_id: CryptoTokenId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(crypto_token_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}

pub(crate) fn generate_key_alias(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Rollback of a generated key whose pool row could not be written.
///
/// A failed rollback leaves the key in the crypto token, reported as [`KeyPoolError::OrphanedKey`].
pub(crate) async fn remove_unpersisted_key(
    crypto_token_client: &dyn CryptoTokenClient,
    crypto_token: &CryptoToken,
    key_alias: &str,
    persist_error: DataLayerError,
) -> KeyPoolError {
    match crypto_token_client
        .remove_key(crypto_token, key_alias, true)
        .await
    {
        Ok(()) => {
            tracing::info!(
                crypto_token = %crypto_token.name,
                key_alias,
                "Removed generated key after failed persistence"
            );
            NestedError::new("persisting generated key", persist_error).into()
        }
        Err(remove_error) => {
            tracing::error!(
                crypto_token = %crypto_token.name,
                key_alias,
                %remove_error,
                %persist_error,
                "Generated key could not be persisted nor removed, key is orphaned"
            );
            KeyPoolError::OrphanedKey {
                key_alias: key_alias.to_owned(),
                source: persist_error,
            }
        }
    }
}
