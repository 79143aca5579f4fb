use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
use figment::providers::{Data, Format};
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};

use super::{ConfigParsingError, ConfigValidationError};
use crate::model::crypto_token::{CryptoToken, CryptoTokenId, KeyPoolProfile};
use crate::model::signature_qualifier::SignatureQualifierProfile;
use crate::model::worker::{Worker, WorkerCapabilities, WorkerId};

type Dict<K, V> = BTreeMap<K, V>;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    pub crypto_tokens: Dict<String, CryptoTokenConfig>,
    /// Declaration order is the worker selection order
    pub workers: Vec<WorkerConfig>,
    pub signature_qualifiers: Dict<String, SignatureQualifierConfig>,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoTokenConfig {
    pub id: u32,
    #[serde(default)]
    pub key_pool_profiles: Vec<KeyPoolProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfig {
    pub id: u32,
    pub name: String,
    pub crypto_token: String,
    pub capabilities: WorkerCapabilities,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureQualifierConfig {
    pub ca_name: String,
    pub certificate_profile: String,
    pub end_entity_profile: String,
    pub username: String,
    pub distinguished_name: String,
    #[serde(default)]
    pub subject_alt_name: Option<String>,
    #[serde_as(as = "DurationSeconds<i64>")]
    #[serde(default)]
    pub validity_offset: time::Duration,
    #[serde_as(as = "DurationSeconds<i64>")]
    pub validity: time::Duration,
    pub multisign: u32,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    pub max_attempts: u32,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub initial_backoff: std::time::Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: std::time::Duration::from_secs(1),
        }
    }
}

pub enum InputFormat {
    #[cfg(feature = "config_yaml")]
    Yaml(Data<Yaml>),
    #[cfg(feature = "config_json")]
    Json(Data<Json>),
}

impl CoreConfig {
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigParsingError> {
        let mut inputs: Vec<InputFormat> = Vec::with_capacity(files.len());

        for path in files {
            #[cfg(feature = "config_yaml")]
            if path
                .as_ref()
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml")
            {
                inputs.push(InputFormat::Yaml(Yaml::file(path)));
                continue;
            }

            #[cfg(feature = "config_json")]
            if path.as_ref().extension() == Some("json".as_ref()) {
                inputs.push(InputFormat::Json(Json::file(path)));
                continue;
            }

            return Err(ConfigParsingError::GeneralParsingError(format!(
                "Unsupported file or missing file extension: {:?}",
                path.as_ref().to_str()
            )));
        }

        CoreConfig::parse(inputs)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(
        configs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigParsingError> {
        let inputs = configs
            .into_iter()
            .map(|s| Yaml::string(s.as_ref()))
            .map(InputFormat::Yaml);

        CoreConfig::parse(inputs)
    }

    pub fn parse(
        inputs: impl IntoIterator<Item = InputFormat>,
    ) -> Result<Self, ConfigParsingError> {
        let mut figment = Figment::new();

        for data in inputs {
            figment = match data {
                #[cfg(feature = "config_yaml")]
                InputFormat::Yaml(content) => figment.merge(content),
                #[cfg(feature = "config_json")]
                InputFormat::Json(content) => figment.merge(content),
            };
        }

        #[cfg(feature = "config_env")]
        {
            figment = figment.merge(Env::prefixed("QSIGN_").split("__").lowercase(false));
        }

        figment
            .extract::<CoreConfig>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut token_ids = HashSet::new();
        for token in self.crypto_tokens.values() {
            if !token_ids.insert(token.id) {
                return Err(ConfigValidationError::DuplicateCryptoTokenId(token.id));
            }
        }

        let mut worker_ids = HashSet::new();
        let mut worker_names = HashSet::new();
        for worker in &self.workers {
            if !self.crypto_tokens.contains_key(&worker.crypto_token) {
                return Err(ConfigValidationError::UnknownCryptoToken {
                    worker: worker.name.to_owned(),
                    crypto_token: worker.crypto_token.to_owned(),
                });
            }
            if !worker_ids.insert(worker.id) {
                return Err(ConfigValidationError::DuplicateWorkerId(worker.id));
            }
            if !worker_names.insert(worker.name.as_str()) {
                return Err(ConfigValidationError::DuplicateWorkerName(
                    worker.name.to_owned(),
                ));
            }
        }

        for (name, qualifier) in &self.signature_qualifiers {
            if qualifier.multisign == 0 {
                return Err(ConfigValidationError::ZeroMultisign(name.to_owned()));
            }
            if !qualifier.validity.is_positive() {
                return Err(ConfigValidationError::InvalidValidity(name.to_owned()));
            }
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigValidationError::InvalidRetryAttempts);
        }

        Ok(())
    }

    pub fn crypto_tokens(&self) -> Vec<CryptoToken> {
        self.crypto_tokens
            .iter()
            .map(|(name, fields)| CryptoToken {
                id: CryptoTokenId(fields.id),
                name: name.to_owned(),
                key_pool_profiles: fields.key_pool_profiles.to_owned(),
            })
            .collect()
    }

    pub fn workers(&self) -> Vec<(Worker, WorkerCapabilities)> {
        self.workers
            .iter()
            .map(|fields| {
                (
                    Worker {
                        id: WorkerId(fields.id),
                        name: fields.name.to_owned(),
                        crypto_token: fields.crypto_token.to_owned(),
                    },
                    fields.capabilities.to_owned(),
                )
            })
            .collect()
    }

    pub fn signature_qualifier_profiles(&self) -> HashMap<String, SignatureQualifierProfile> {
        self.signature_qualifiers
            .iter()
            .map(|(name, fields)| {
                (
                    name.to_owned(),
                    SignatureQualifierProfile {
                        name: name.to_owned(),
                        ca_name: fields.ca_name.to_owned(),
                        certificate_profile: fields.certificate_profile.to_owned(),
                        end_entity_profile: fields.end_entity_profile.to_owned(),
                        username_pattern: fields.username.to_owned(),
                        distinguished_name_pattern: fields.distinguished_name.to_owned(),
                        subject_alt_name_pattern: fields.subject_alt_name.to_owned(),
                        validity_offset: fields.validity_offset,
                        validity: fields.validity,
                        multisign: fields.multisign,
                    },
                )
            })
            .collect()
    }
}
