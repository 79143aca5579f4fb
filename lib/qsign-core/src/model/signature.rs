use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::crypto_token::KeyAlgorithm;
use super::worker::{ConformanceLevel, SignatureFormat, SignaturePackaging};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureAlgorithm {
    Sha256WithRsa,
    Sha384WithRsa,
    Sha512WithRsa,
    Sha256WithEcdsa,
    Sha384WithEcdsa,
    Sha512WithEcdsa,
}

impl SignatureAlgorithm {
    pub const fn oid(&self) -> &'static str {
        match self {
            Self::Sha256WithRsa => "1.2.840.113549.1.1.11",
            Self::Sha384WithRsa => "1.2.840.113549.1.1.12",
            Self::Sha512WithRsa => "1.2.840.113549.1.1.13",
            Self::Sha256WithEcdsa => "1.2.840.10045.4.3.2",
            Self::Sha384WithEcdsa => "1.2.840.10045.4.3.3",
            Self::Sha512WithEcdsa => "1.2.840.10045.4.3.4",
        }
    }

    /// Algorithm name used when asking the crypto token service for a CSR
    pub const fn csr_algorithm(&self) -> &'static str {
        match self {
            Self::Sha256WithRsa => "SHA256WithRSA",
            Self::Sha384WithRsa => "SHA384WithRSA",
            Self::Sha512WithRsa => "SHA512WithRSA",
            Self::Sha256WithEcdsa => "SHA256WithECDSA",
            Self::Sha384WithEcdsa => "SHA384WithECDSA",
            Self::Sha512WithEcdsa => "SHA512WithECDSA",
        }
    }

    pub const fn key_algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Sha256WithRsa | Self::Sha384WithRsa | Self::Sha512WithRsa => KeyAlgorithm::Rsa,
            Self::Sha256WithEcdsa | Self::Sha384WithEcdsa | Self::Sha512WithEcdsa => {
                KeyAlgorithm::Ec
            }
        }
    }
}

/// What the caller wants produced; drives worker selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameters {
    pub signature_qualifier: String,
    pub signature_format: SignatureFormat,
    pub conformance_level: ConformanceLevel,
    pub signature_algorithm: SignatureAlgorithm,
    pub packaging: SignaturePackaging,
    pub with_validation_info: bool,
}

/// Already validated proof that the caller authorized signing of specific digests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureActivationData {
    pub digests: Vec<Vec<u8>>,
    /// Identity claims carried by the activation data, they take precedence over user info
    pub claims: HashMap<String, String>,
}

impl SignatureActivationData {
    pub fn covers(&self, data: &[Vec<u8>]) -> bool {
        data.iter().all(|item| self.digests.contains(item))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationInfo {
    pub crls: Vec<Vec<u8>>,
    pub ocsp_responses: Vec<Vec<u8>>,
    pub certificates: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDocuments {
    pub signatures: Vec<Vec<u8>>,
    pub certificate_chain: Vec<Vec<u8>>,
    pub validation_info: Option<ValidationInfo>,
}
