use qsign_core::model::credential::{CredentialMetadata, CredentialStatus};
use qsign_core::model::crypto_token::{CryptoTokenId, KeyAlgorithm};
use qsign_core::model::signing_key::{RenewableKey, SingleUseKey};
use sea_orm::{ActiveModelTrait, ConnectOptions, DatabaseConnection};
use shared_types::{CredentialId, SigningKeyId};
use time::OffsetDateTime;
use time::macros::datetime;
use uuid::Uuid;

use crate::db_conn;
use crate::entity::{renewable_key, single_use_key};

pub const NOW: OffsetDateTime = datetime!(2025-03-01 10:00 UTC);

pub async fn setup_db() -> DatabaseConnection {
    // every connection to an in-memory sqlite opens a separate database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    db_conn(options).await.unwrap()
}

pub fn dummy_renewable_key(alias: &str, created_date: OffsetDateTime) -> RenewableKey {
    RenewableKey {
        id: SigningKeyId::from(Uuid::new_v4()),
        created_date,
        crypto_token_id: CryptoTokenId(1),
        key_alias: alias.to_owned(),
        algorithm: KeyAlgorithm::Rsa,
        in_use: false,
        acquired_at: None,
    }
}

pub async fn insert_renewable_key(db: &DatabaseConnection, key: RenewableKey) -> RenewableKey {
    renewable_key::ActiveModel::from(key.clone())
        .insert(db)
        .await
        .unwrap();
    key
}

pub fn dummy_single_use_key(alias: &str, created_date: OffsetDateTime) -> SingleUseKey {
    SingleUseKey {
        id: SigningKeyId::from(Uuid::new_v4()),
        created_date,
        crypto_token_id: CryptoTokenId(1),
        key_alias: alias.to_owned(),
        algorithm: KeyAlgorithm::Ec,
    }
}

pub async fn insert_single_use_key(db: &DatabaseConnection, key: SingleUseKey) -> SingleUseKey {
    single_use_key::ActiveModel::from(key.clone())
        .insert(db)
        .await
        .unwrap();
    key
}

pub fn dummy_credential(user_id: &str) -> CredentialMetadata {
    CredentialMetadata {
        id: CredentialId::from(Uuid::new_v4()),
        created_date: NOW,
        last_modified: NOW,
        user_id: user_id.to_owned(),
        crypto_token_id: CryptoTokenId(1),
        key_alias: format!("long-term-rsa-{}", Uuid::new_v4()),
        key_algorithm: KeyAlgorithm::Rsa,
        end_entity_name: format!("{user_id}-end-entity"),
        subject_dn: format!("CN={user_id},C=CH"),
        issuer_dn: "CN=QSign Issuing CA,C=CH".to_owned(),
        serial_number: "0A1B2C".to_owned(),
        signature_qualifier: "eu_eidas_qes".to_owned(),
        multisign: 1,
        certificate_chain: vec![vec![0x30, 0x82, 0x01], vec![0x30, 0x82, 0x02]],
        valid_until: datetime!(2027-03-01 10:00 UTC),
        status: CredentialStatus::Enabled,
    }
}
