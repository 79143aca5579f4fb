use serde::{Deserialize, Serialize};
use strum::Display;

use super::signature::SignatureAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub u32);

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Signing execution unit of the crypto token service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub crypto_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerCapabilities {
    pub signature_qualifiers: Vec<String>,
    pub signature_format: SignatureFormat,
    pub conformance_level: ConformanceLevel,
    pub packaging: SignaturePackaging,
    pub signature_algorithms: Vec<SignatureAlgorithm>,
    #[serde(default)]
    pub validation_info: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureFormat {
    #[strum(serialize = "CADES")]
    Cades,
    #[strum(serialize = "PADES")]
    Pades,
    #[strum(serialize = "XADES")]
    Xades,
    #[strum(serialize = "JADES")]
    Jades,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ConformanceLevel {
    #[serde(rename = "ADES_B_B")]
    #[strum(serialize = "ADES_B_B")]
    AdesBB,
    #[serde(rename = "ADES_B_T")]
    #[strum(serialize = "ADES_B_T")]
    AdesBT,
    #[serde(rename = "ADES_B_LT")]
    #[strum(serialize = "ADES_B_LT")]
    AdesBLT,
    #[serde(rename = "ADES_B_LTA")]
    #[strum(serialize = "ADES_B_LTA")]
    AdesBLTA,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignaturePackaging {
    #[strum(serialize = "ENVELOPED")]
    Enveloped,
    #[strum(serialize = "ENVELOPING")]
    Enveloping,
    #[strum(serialize = "DETACHED")]
    Detached,
    #[strum(serialize = "INTERNALLY_DETACHED")]
    InternallyDetached,
}
