use std::str::FromStr;

use qsign_core::model::crypto_token::{CryptoTokenId, KeyAlgorithm};
use qsign_core::model::signing_key::{RenewableKey, SingleUseKey};
use qsign_core::repository::error::DataLayerError;
use sea_orm::Set;

use crate::entity::{renewable_key, single_use_key};

pub(super) fn parse_algorithm(value: &str) -> Result<KeyAlgorithm, DataLayerError> {
    KeyAlgorithm::from_str(value)
        .map_err(|_| DataLayerError::MappingError(format!("unknown key algorithm `{value}`")))
}

impl TryFrom<renewable_key::Model> for RenewableKey {
    type Error = DataLayerError;

    fn try_from(value: renewable_key::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            created_date: value.created_date,
            crypto_token_id: CryptoTokenId(value.crypto_token_id),
            algorithm: parse_algorithm(&value.algorithm)?,
            key_alias: value.key_alias,
            in_use: value.in_use,
            acquired_at: value.acquired_at,
        })
    }
}

impl From<RenewableKey> for renewable_key::ActiveModel {
    fn from(value: RenewableKey) -> Self {
        Self {
            id: Set(value.id),
            created_date: Set(value.created_date),
            crypto_token_id: Set(value.crypto_token_id.0),
            key_alias: Set(value.key_alias),
            algorithm: Set(value.algorithm.to_string()),
            in_use: Set(value.in_use),
            acquired_at: Set(value.acquired_at),
        }
    }
}

impl TryFrom<single_use_key::Model> for SingleUseKey {
    type Error = DataLayerError;

    fn try_from(value: single_use_key::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            created_date: value.created_date,
            crypto_token_id: CryptoTokenId(value.crypto_token_id),
            algorithm: parse_algorithm(&value.algorithm)?,
            key_alias: value.key_alias,
        })
    }
}

impl From<SingleUseKey> for single_use_key::ActiveModel {
    fn from(value: SingleUseKey) -> Self {
        Self {
            id: Set(value.id),
            created_date: Set(value.created_date),
            crypto_token_id: Set(value.crypto_token_id.0),
            key_alias: Set(value.key_alias),
            algorithm: Set(value.algorithm.to_string()),
        }
    }
}
