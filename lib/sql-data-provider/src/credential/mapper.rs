use std::str::FromStr;

use qsign_core::model::credential::{CredentialMetadata, CredentialStatus};
use qsign_core::model::crypto_token::{CryptoTokenId, KeyAlgorithm};
use qsign_core::repository::error::DataLayerError;
use sea_orm::Set;
use shared_types::SessionId;

use crate::entity::credential;

pub(crate) fn encode_certificate_chain(chain: &[Vec<u8>]) -> Result<Vec<u8>, DataLayerError> {
    let encoded: Vec<String> = chain.iter().map(hex::encode).collect();
    serde_json::to_vec(&encoded).map_err(|e| DataLayerError::MappingError(e.to_string()))
}

pub(crate) fn decode_certificate_chain(value: &[u8]) -> Result<Vec<Vec<u8>>, DataLayerError> {
    let encoded: Vec<String> =
        serde_json::from_slice(value).map_err(|e| DataLayerError::MappingError(e.to_string()))?;

    encoded
        .iter()
        .map(|certificate| {
            hex::decode(certificate).map_err(|e| DataLayerError::MappingError(e.to_string()))
        })
        .collect()
}

impl TryFrom<credential::Model> for CredentialMetadata {
    type Error = DataLayerError;

    fn try_from(value: credential::Model) -> Result<Self, Self::Error> {
        let key_algorithm = KeyAlgorithm::from_str(&value.key_algorithm).map_err(|_| {
            DataLayerError::MappingError(format!("unknown key algorithm `{}`", value.key_algorithm))
        })?;
        let status = CredentialStatus::from_str(&value.status).map_err(|_| {
            DataLayerError::MappingError(format!("unknown credential status `{}`", value.status))
        })?;

        Ok(Self {
            id: value.id,
            created_date: value.created_date,
            last_modified: value.last_modified,
            user_id: value.user_id,
            crypto_token_id: CryptoTokenId(value.crypto_token_id),
            key_alias: value.key_alias,
            key_algorithm,
            end_entity_name: value.end_entity_name,
            subject_dn: value.subject_dn,
            issuer_dn: value.issuer_dn,
            serial_number: value.serial_number,
            signature_qualifier: value.signature_qualifier,
            multisign: value.multisign,
            certificate_chain: decode_certificate_chain(&value.certificate_chain)?,
            valid_until: value.valid_until,
            status,
        })
    }
}

pub(crate) fn to_active_model(
    value: CredentialMetadata,
    session_id: Option<SessionId>,
) -> Result<credential::ActiveModel, DataLayerError> {
    Ok(credential::ActiveModel {
        id: Set(value.id),
        created_date: Set(value.created_date),
        last_modified: Set(value.last_modified),
        user_id: Set(value.user_id),
        session_id: Set(session_id),
        crypto_token_id: Set(value.crypto_token_id.0),
        key_alias: Set(value.key_alias),
        key_algorithm: Set(value.key_algorithm.to_string()),
        end_entity_name: Set(value.end_entity_name),
        subject_dn: Set(value.subject_dn),
        issuer_dn: Set(value.issuer_dn),
        serial_number: Set(value.serial_number),
        signature_qualifier: Set(value.signature_qualifier),
        multisign: Set(value.multisign),
        certificate_chain: Set(encode_certificate_chain(&value.certificate_chain)?),
        valid_until: Set(value.valid_until),
        status: Set(value.status.to_string()),
    })
}
