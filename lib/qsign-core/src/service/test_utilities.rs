use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use indoc::indoc;
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair, SerialNumber};
use secrecy::SecretString;
use shared_types::{CredentialId, SigningKeyId};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::core_config::CoreConfig;
use crate::model::caller::Caller;
use crate::model::credential::{CredentialMetadata, CredentialStatus};
use crate::model::crypto_token::{CryptoToken, CryptoTokenId, KeyAlgorithm};
use crate::model::signing_key::{KeyReference, RenewableKey};
use crate::proto::clock::{Clock, MockClock};
use crate::provider::certificate_authority::MockCertificateAuthorityClient;
use crate::provider::credential_factory::CredentialFactory;
use crate::provider::crypto_token::MockCryptoTokenClient;
use crate::provider::key_pool::CryptoTokenLocks;
use crate::provider::key_pool::renewable::RenewableKeyPool;
use crate::provider::user_info::{MockUserInfoProvider, UserInfoError};
use crate::provider::worker::WorkerRegistry;
use crate::repository::error::DataLayerError;
use crate::repository::session_repository::MockSessionRepository;
use crate::repository::signing_key_repository::RenewableKeyRepository;

pub const NOW: OffsetDateTime = datetime!(2025-03-01 12:00:00 UTC);

pub fn generic_config() -> CoreConfig {
    let config = indoc! {"
        cryptoTokens:
            HSM1:
                id: 1
                keyPoolProfiles:
                    - algorithm: RSA
                      keySpecification: '2048'
                      usage: EPHEMERAL
                      aliasPrefix: ephemeral-rsa
                    - algorithm: RSA
                      keySpecification: '3072'
                      usage: LONG_TERM
                      aliasPrefix: longterm-rsa
                    - algorithm: EC
                      keySpecification: secp256r1
                      usage: EPHEMERAL
                      aliasPrefix: ephemeral-ec
            HSM2:
                id: 2
        workers:
            - id: 100
              name: PAdES_QES
              cryptoToken: HSM1
              capabilities:
                  signatureQualifiers: [eu_eidas_qes]
                  signatureFormat: PADES
                  conformanceLevel: ADES_B_B
                  packaging: ENVELOPED
                  signatureAlgorithms: [SHA256_WITH_RSA]
            - id: 101
              name: CAdES_QES_LT
              cryptoToken: HSM1
              capabilities:
                  signatureQualifiers: [eu_eidas_qes, eu_eidas_aes]
                  signatureFormat: CADES
                  conformanceLevel: ADES_B_LT
                  packaging: DETACHED
                  signatureAlgorithms: [SHA256_WITH_RSA, SHA256_WITH_ECDSA]
                  validationInfo: true
            - id: 102
              name: CAdES_AES_HSM2
              cryptoToken: HSM2
              capabilities:
                  signatureQualifiers: [eu_eidas_aes]
                  signatureFormat: CADES
                  conformanceLevel: ADES_B_B
                  packaging: DETACHED
                  signatureAlgorithms: [SHA256_WITH_RSA]
        signatureQualifiers:
            eu_eidas_qes:
                caName: QualifiedCA
                certificateProfile: QES_SIGN
                endEntityProfile: QES_USER
                username: '{sub}'
                distinguishedName: 'CN={givenName} {familyName},SERIALNUMBER={serialNumber},C={country}'
                subjectAltName: 'rfc822Name={email}'
                validity: 3600
                multisign: 1
            eu_eidas_aes:
                caName: AdvancedCA
                certificateProfile: AES_SIGN
                endEntityProfile: AES_USER
                username: '{sub}'
                distinguishedName: 'CN={givenName} {familyName}'
                validityOffset: 60
                validity: 86400
                multisign: 5
    "};

    CoreConfig::from_yaml([config]).unwrap()
}

pub fn dummy_registry() -> Arc<WorkerRegistry> {
    let config = generic_config();
    Arc::new(WorkerRegistry::new(
        config.workers(),
        config.crypto_tokens(),
    ))
}

pub fn dummy_crypto_token() -> CryptoToken {
    generic_config()
        .crypto_tokens()
        .into_iter()
        .find(|token| token.name == "HSM1")
        .unwrap()
}

pub fn fixed_clock(now: OffsetDateTime) -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_now_utc().returning(move || now);
    Arc::new(clock)
}

pub fn dummy_caller() -> Caller {
    Caller {
        id: "user-1".to_string(),
        auth_token: SecretString::from("token".to_string()),
    }
}

pub fn dummy_user_info() -> HashMap<String, String> {
    HashMap::from([
        ("sub".to_string(), "user-1".to_string()),
        ("givenName".to_string(), "John".to_string()),
        ("familyName".to_string(), "Doe".to_string()),
        ("serialNumber".to_string(), "PNOCH-123".to_string()),
        ("country".to_string(), "CH".to_string()),
        ("email".to_string(), "john@example.com".to_string()),
    ])
}

pub fn dummy_key_reference(key_alias: &str) -> KeyReference {
    KeyReference {
        crypto_token_id: CryptoTokenId(1),
        key_alias: key_alias.to_string(),
        algorithm: KeyAlgorithm::Rsa,
    }
}

pub fn dummy_credential(user_id: &str, multisign: u32) -> CredentialMetadata {
    CredentialMetadata {
        id: Uuid::new_v4().into(),
        created_date: NOW,
        last_modified: NOW,
        user_id: user_id.to_string(),
        crypto_token_id: CryptoTokenId(1),
        key_alias: "longterm-rsa-1".to_string(),
        key_algorithm: KeyAlgorithm::Rsa,
        end_entity_name: user_id.to_string(),
        subject_dn: "CN=John Doe".to_string(),
        issuer_dn: "CN=John Doe".to_string(),
        serial_number: "01".to_string(),
        signature_qualifier: "eu_eidas_qes".to_string(),
        multisign,
        certificate_chain: vec![vec![1, 2, 3]],
        valid_until: NOW + Duration::days(365),
        status: CredentialStatus::Enabled,
    }
}

pub fn dummy_credential_id() -> CredentialId {
    Uuid::new_v4().into()
}

pub fn free_renewable_key(key_alias: &str) -> RenewableKey {
    RenewableKey {
        id: SigningKeyId::from(Uuid::new_v4()),
        created_date: NOW,
        crypto_token_id: CryptoTokenId(1),
        key_alias: key_alias.to_string(),
        algorithm: KeyAlgorithm::Rsa,
        in_use: false,
        acquired_at: None,
    }
}

/// Self-signed DER certificate with the given common name and serial
pub fn self_signed_certificate(common_name: &str, serial: u64) -> Vec<u8> {
    let mut params = CertificateParams::default();
    let mut distinguished_name = DistinguishedName::new();
    distinguished_name.push(DnType::CommonName, common_name);
    distinguished_name.push(DnType::CountryName, "CH");
    params.distinguished_name = distinguished_name;
    params.serial_number = Some(SerialNumber::from(serial));
    params.not_before = datetime!(2025-01-01 00:00:00 UTC);
    params.not_after = datetime!(2027-01-01 00:00:00 UTC);

    let keys = KeyPair::generate().unwrap();
    params.self_signed(&keys).unwrap().der().to_vec()
}

/// Factory whose collaborators successfully issue `times` certificates
pub fn issuing_credential_factory(times: usize) -> Arc<CredentialFactory> {
    let chain = vec![self_signed_certificate("John Doe", 7)];

    let mut user_info = MockUserInfoProvider::new();
    user_info
        .expect_get_user_info()
        .times(times)
        .returning(|_, _| Ok(dummy_user_info()));

    let mut certificate_authority = MockCertificateAuthorityClient::new();
    certificate_authority
        .expect_create_end_entity()
        .times(times)
        .returning(|_| Ok(()));
    certificate_authority
        .expect_sign_certificate_request()
        .times(times)
        .returning(move |_, _, _| Ok(chain.clone()));

    let mut crypto_token_client = MockCryptoTokenClient::new();
    crypto_token_client
        .expect_generate_csr()
        .times(times)
        .returning(|_, _, _, _| Ok(vec![0x30, 0x00]));
    crypto_token_client
        .expect_import_certificate_chain()
        .times(times)
        .returning(|_, _, _| Ok(()));

    Arc::new(CredentialFactory::new(
        Arc::new(certificate_authority),
        Arc::new(crypto_token_client),
        Arc::new(user_info),
        dummy_registry(),
        generic_config().signature_qualifier_profiles(),
        fixed_clock(NOW),
    ))
}

/// Factory whose user info lookup rejects the caller, nothing is issued
pub fn failing_credential_factory() -> Arc<CredentialFactory> {
    let mut user_info = MockUserInfoProvider::new();
    user_info
        .expect_get_user_info()
        .once()
        .returning(|id, _| Err(UserInfoError::UserNotFound(id.to_string())));

    let mut certificate_authority = MockCertificateAuthorityClient::new();
    certificate_authority.expect_create_end_entity().never();

    Arc::new(CredentialFactory::new(
        Arc::new(certificate_authority),
        Arc::new(MockCryptoTokenClient::new()),
        Arc::new(user_info),
        dummy_registry(),
        generic_config().signature_qualifier_profiles(),
        fixed_clock(NOW),
    ))
}

pub fn renewable_key_pool(
    repository: Arc<InMemoryRenewableKeyRepository>,
    crypto_token_client: MockCryptoTokenClient,
) -> Arc<RenewableKeyPool> {
    Arc::new(RenewableKeyPool::new(
        repository,
        Arc::new(MockSessionRepository::new()),
        Arc::new(crypto_token_client),
        dummy_registry(),
        Arc::new(CryptoTokenLocks::default()),
        fixed_clock(NOW),
    ))
}

/// Renewable key table kept in memory.
///
/// Yields inside `acquire_free` so concurrent callers interleave, and records how many calls
/// overlapped.
#[derive(Default)]
pub struct InMemoryRenewableKeyRepository {
    pub keys: Mutex<Vec<RenewableKey>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl InMemoryRenewableKeyRepository {
    pub fn with_keys(keys: Vec<RenewableKey>) -> Self {
        Self {
            keys: Mutex::new(keys),
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> Vec<RenewableKey> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RenewableKeyRepository for InMemoryRenewableKeyRepository {
    async fn acquire_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
        acquired_at: OffsetDateTime,
    ) -> Result<Option<RenewableKey>, DataLayerError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::task::yield_now().await;

        let acquired = {
            let mut keys = self.keys.lock().unwrap();
            keys.iter_mut()
                .find(|key| {
                    key.crypto_token_id == crypto_token_id
                        && key.algorithm == algorithm
                        && !key.in_use
                })
                .map(|key| {
                    key.in_use = true;
                    key.acquired_at = Some(acquired_at);
                    key.clone()
                })
        };

        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(acquired)
    }

    async fn create(&self, key: RenewableKey) -> Result<SigningKeyId, DataLayerError> {
        let id = key.id;
        self.keys.lock().unwrap().push(key);
        Ok(id)
    }

    async fn count_free(
        &self,
        crypto_token_id: CryptoTokenId,
        algorithm: KeyAlgorithm,
    ) -> Result<u64, DataLayerError> {
        Ok(self
            .keys
            .lock()
            .unwrap()
            .iter()
            .filter(|key| {
                key.crypto_token_id == crypto_token_id && key.algorithm == algorithm && !key.in_use
            })
            .count() as u64)
    }

    async fn get_by_alias(
        &self,
        crypto_token_id: CryptoTokenId,
        key_alias: &str,
    ) -> Result<Option<RenewableKey>, DataLayerError> {
        Ok(self
            .keys
            .lock()
            .unwrap()
            .iter()
            .find(|key| key.crypto_token_id == crypto_token_id && key.key_alias == key_alias)
            .cloned())
    }

    async fn get_in_use_acquired_before(
        &self,
        acquired_before: OffsetDateTime,
    ) -> Result<Vec<RenewableKey>, DataLayerError> {
        Ok(self
            .keys
            .lock()
            .unwrap()
            .iter()
            .filter(|key| key.in_use && key.acquired_at.is_some_and(|at| at < acquired_before))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &SigningKeyId) -> Result<(), DataLayerError> {
        self.keys.lock().unwrap().retain(|key| key.id != *id);
        Ok(())
    }
}
