use crate::model::crypto_token::KeyAlgorithm;
use crate::model::signature::{SignatureAlgorithm, ValidationInfo};
use crate::model::worker::WorkerId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyQueryFilter {
    pub alias_prefix: Option<String>,
    pub algorithm: Option<KeyAlgorithm>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenKeyInfo {
    pub alias: String,
    pub algorithm: KeyAlgorithm,
    pub specification: String,
    pub certified: bool,
    /// Only filled when queried with data
    pub certificate_chain: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSignRequest {
    pub worker_id: WorkerId,
    pub key_alias: String,
    pub certificate_chain: Vec<Vec<u8>>,
    pub signature_algorithm: SignatureAlgorithm,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleSignRequest {
    pub worker_id: WorkerId,
    pub key_alias: String,
    pub certificate_chain: Vec<Vec<u8>>,
    pub signature_algorithm: SignatureAlgorithm,
    pub data: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureWithValidationInfo {
    pub signature: Vec<u8>,
    pub validation_info: ValidationInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturesWithValidationInfo {
    pub signatures: Vec<Vec<u8>>,
    pub validation_info: ValidationInfo,
}
