use shared_types::CredentialId;
use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;

use super::crypto_token::{CryptoTokenId, KeyAlgorithm};
use super::signing_key::KeyReference;

/// Binding of a key alias to an issued certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialMetadata {
    pub id: CredentialId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub user_id: String,
    pub crypto_token_id: CryptoTokenId,
    pub key_alias: String,
    pub key_algorithm: KeyAlgorithm,
    pub end_entity_name: String,
    pub subject_dn: String,
    pub issuer_dn: String,
    pub serial_number: String,
    pub signature_qualifier: String,
    pub multisign: u32,
    pub certificate_chain: Vec<Vec<u8>>,
    pub valid_until: OffsetDateTime,
    pub status: CredentialStatus,
}

impl CredentialMetadata {
    pub fn key_reference(&self) -> KeyReference {
        KeyReference {
            crypto_token_id: self.crypto_token_id,
            key_alias: self.key_alias.to_owned(),
            algorithm: self.key_algorithm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialStatus {
    Enabled,
    Disabled,
}
