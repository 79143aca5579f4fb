use shared_types::SigningKeyId;
use time::OffsetDateTime;

use super::crypto_token::{CryptoTokenId, KeyAlgorithm};

/// Row of the renewable pool. Acquisition flags the row, it is removed only by explicit deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewableKey {
    pub id: SigningKeyId,
    pub created_date: OffsetDateTime,
    pub crypto_token_id: CryptoTokenId,
    pub key_alias: String,
    pub algorithm: KeyAlgorithm,
    pub in_use: bool,
    pub acquired_at: Option<OffsetDateTime>,
}

impl RenewableKey {
    pub fn reference(&self) -> KeyReference {
        KeyReference {
            crypto_token_id: self.crypto_token_id,
            key_alias: self.key_alias.to_owned(),
            algorithm: self.algorithm,
        }
    }
}

/// Row of the single-use pool. The row is deleted when the key is acquired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleUseKey {
    pub id: SigningKeyId,
    pub created_date: OffsetDateTime,
    pub crypto_token_id: CryptoTokenId,
    pub key_alias: String,
    pub algorithm: KeyAlgorithm,
}

impl SingleUseKey {
    pub fn reference(&self) -> KeyReference {
        KeyReference {
            crypto_token_id: self.crypto_token_id,
            key_alias: self.key_alias.to_owned(),
            algorithm: self.algorithm,
        }
    }
}

/// Key inside a crypto token, independent of any pool row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReference {
    pub crypto_token_id: CryptoTokenId,
    pub key_alias: String,
    pub algorithm: KeyAlgorithm,
}
