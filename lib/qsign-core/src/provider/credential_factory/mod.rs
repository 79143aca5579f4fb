//! Provisioning of a certificate for an acquired key.
//!
//! The factory renders the identity of the caller, registers it at the certificate authority,
//! certifies the key and imports the chain into the crypto token. It persists nothing.

use std::collections::HashMap;
use std::sync::Arc;

use error::CredentialFactoryError;
use pattern::{keep_value, render_pattern, sanitize_component_value};
use uuid::Uuid;
use x509_parser::prelude::{FromDer, X509Certificate};

use crate::error::ContextWithErrorCode;
use crate::model::caller::Caller;
use crate::model::credential::{CredentialMetadata, CredentialStatus};
use crate::model::crypto_token::KeyAlgorithm;
use crate::model::signature::{SignatureActivationData, SignatureAlgorithm};
use crate::model::signature_qualifier::SignatureQualifierProfile;
use crate::model::signing_key::KeyReference;
use crate::proto::clock::Clock;
use crate::provider::certificate_authority::{CertificateAuthorityClient, EndEntity};
use crate::provider::crypto_token::CryptoTokenClient;
use crate::provider::user_info::UserInfoProvider;
use crate::provider::worker::WorkerRegistry;

pub mod error;
pub(crate) mod pattern;


pub struct CredentialFactory {
    certificate_authority_client: Arc<dyn CertificateAuthorityClient>,
    crypto_token_client: Arc<dyn CryptoTokenClient>,
    user_info_provider: Arc<dyn UserInfoProvider>,
    worker_registry: Arc<WorkerRegistry>,
    signature_qualifiers: HashMap<String, SignatureQualifierProfile>,
    clock: Arc<dyn Clock>,
}

impl CredentialFactory {
    pub fn new(
        certificate_authority_client: Arc<dyn CertificateAuthorityClient>,
        crypto_token_client: Arc<dyn CryptoTokenClient>,
        user_info_provider: Arc<dyn UserInfoProvider>,
        worker_registry: Arc<WorkerRegistry>,
        signature_qualifiers: HashMap<String, SignatureQualifierProfile>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            certificate_authority_client,
            crypto_token_client,
            user_info_provider,
            worker_registry,
            signature_qualifiers,
            clock,
        }
    }

    pub fn signature_qualifier_profile(
        &self,
        signature_qualifier: &str,
    ) -> Result<&SignatureQualifierProfile, CredentialFactoryError> {
        self.signature_qualifiers
            .get(signature_qualifier)
            .ok_or_else(|| {
                CredentialFactoryError::UnknownSignatureQualifier(signature_qualifier.to_owned())
            })
    }

    pub async fn create_credential(
        &self,
        key: &KeyReference,
        signature_qualifier: &str,
        caller: &Caller,
        sad: &SignatureActivationData,
    ) -> Result<CredentialMetadata, CredentialFactoryError> {
        let mut attributes = self
            .user_info_provider
            .get_user_info(&caller.id, &caller.auth_token)
            .await
            .error_while("fetching user info")?;
        attributes.extend(sad.claims.clone());

        let profile = self.signature_qualifier_profile(signature_qualifier)?;

        let end_entity = EndEntity {
            username: render_pattern(&profile.username_pattern, &attributes, keep_value)?,
            subject_dn: render_pattern(
                &profile.distinguished_name_pattern,
                &attributes,
                sanitize_component_value,
            )?,
            subject_alt_name: profile
                .subject_alt_name_pattern
                .as_deref()
                .map(|pattern| render_pattern(pattern, &attributes, sanitize_component_value))
                .transpose()?,
            ca_name: profile.ca_name.to_owned(),
            end_entity_profile: profile.end_entity_profile.to_owned(),
            certificate_profile: profile.certificate_profile.to_owned(),
        };

        let crypto_token = self
            .worker_registry
            .get_crypto_token_by_id(key.crypto_token_id)
            .ok_or(CredentialFactoryError::UnknownCryptoToken(key.crypto_token_id))?;

        self.certificate_authority_client
            .create_end_entity(&end_entity)
            .await
            .error_while("creating end entity")?;

        let csr = self
            .crypto_token_client
            .generate_csr(
                crypto_token,
                &key.key_alias,
                &end_entity.subject_dn,
                csr_signature_algorithm(key.algorithm).csr_algorithm(),
            )
            .await
            .error_while("generating certificate request")?;

        let certificate_chain = self
            .certificate_authority_client
            .sign_certificate_request(&end_entity, &profile.certificate_profile, &csr)
            .await
            .error_while("signing certificate request")?;

        let leaf = parse_leaf(&certificate_chain)?;

        self.crypto_token_client
            .import_certificate_chain(crypto_token, &key.key_alias, &certificate_chain)
            .await
            .error_while("importing certificate chain")?;

        tracing::info!(
            crypto_token = %crypto_token.name,
            key_alias = %key.key_alias,
            end_entity = %end_entity.username,
            serial_number = %leaf.serial_number,
            "Issued certificate"
        );

        let now = self.clock.now_utc();
        Ok(CredentialMetadata {
            id: Uuid::new_v4().into(),
            created_date: now,
            last_modified: now,
            user_id: caller.id.to_owned(),
            crypto_token_id: key.crypto_token_id,
            key_alias: key.key_alias.to_owned(),
            key_algorithm: key.algorithm,
            end_entity_name: end_entity.username,
            subject_dn: leaf.subject_dn,
            issuer_dn: leaf.issuer_dn,
            serial_number: leaf.serial_number,
            signature_qualifier: profile.name.to_owned(),
            multisign: profile.multisign,
            certificate_chain,
            valid_until: leaf.not_after,
            status: CredentialStatus::Enabled,
        })
    }
}

fn csr_signature_algorithm(algorithm: KeyAlgorithm) -> SignatureAlgorithm {
    match algorithm {
        KeyAlgorithm::Rsa => SignatureAlgorithm::Sha256WithRsa,
        KeyAlgorithm::Ec => SignatureAlgorithm::Sha256WithEcdsa,
    }
}

struct LeafCertificate {
    serial_number: String,
    subject_dn: String,
    issuer_dn: String,
    not_after: time::OffsetDateTime,
}

fn parse_leaf(certificate_chain: &[Vec<u8>]) -> Result<LeafCertificate, CredentialFactoryError> {
    let leaf = certificate_chain.first().ok_or_else(|| {
        CredentialFactoryError::InvalidCertificate("empty certificate chain".to_owned())
    })?;

    let (_, certificate) = X509Certificate::from_der(leaf)
        .map_err(|error| CredentialFactoryError::InvalidCertificate(error.to_string()))?;

    Ok(LeafCertificate {
        serial_number: hex::encode_upper(certificate.raw_serial()),
        subject_dn: certificate.subject().to_string(),
        issuer_dn: certificate.issuer().to_string(),
        not_after: certificate.validity().not_after.to_datetime(),
    })
}
