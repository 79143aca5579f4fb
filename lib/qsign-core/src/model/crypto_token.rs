use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CryptoTokenId(pub u32);

impl std::fmt::Display for CryptoTokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// HSM backed key container in the crypto token service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoToken {
    pub id: CryptoTokenId,
    pub name: String,
    pub key_pool_profiles: Vec<KeyPoolProfile>,
}

impl CryptoToken {
    pub fn key_pool_profile(
        &self,
        algorithm: KeyAlgorithm,
        usage: KeyUsage,
    ) -> Option<&KeyPoolProfile> {
        self.key_pool_profiles
            .iter()
            .find(|profile| profile.algorithm == algorithm && profile.usage == usage)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPoolProfile {
    pub algorithm: KeyAlgorithm,
    pub key_specification: String,
    pub usage: KeyUsage,
    pub alias_prefix: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum KeyAlgorithm {
    #[serde(rename = "RSA")]
    #[strum(serialize = "RSA")]
    Rsa,
    #[serde(rename = "EC")]
    #[strum(serialize = "EC")]
    Ec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyUsage {
    #[strum(serialize = "LONG_TERM")]
    LongTerm,
    #[strum(serialize = "EPHEMERAL")]
    Ephemeral,
}
