use qsign_core::model::credential::CredentialStatus;
use qsign_core::model::session::{CredentialSession, SessionCredentialMetadata};
use qsign_core::repository::credential_repository::CredentialRepository;
use qsign_core::repository::error::DataLayerError;
use qsign_core::repository::session_repository::SessionRepository;
use sea_orm::EntityTrait;
use similar_asserts::assert_eq;
use time::Duration;

use super::CredentialProvider;
use super::mapper::{decode_certificate_chain, encode_certificate_chain};
use crate::entity::credential;
use crate::session::SessionProvider;
use crate::test_utilities::*;

#[test]
fn test_certificate_chain_is_stored_as_hex_json() {
    let encoded = encode_certificate_chain(&[vec![0xde, 0xad], vec![0x01]]).unwrap();
    assert_eq!(String::from_utf8(encoded).unwrap(), r#"["dead","01"]"#);

    assert!(matches!(
        decode_certificate_chain(br#"["zz"]"#),
        Err(DataLayerError::MappingError(_))
    ));
}

#[tokio::test]
async fn test_create_and_get_credential() {
    let db = setup_db().await;
    let provider = CredentialProvider { db: db.clone() };
    let credential = dummy_credential("alice");

    let id = provider.create_credential(credential.clone()).await.unwrap();
    assert_eq!(id, credential.id);

    let found = provider.get_credential(&id).await.unwrap();
    assert_eq!(found, Some(credential));

    let row = credential::Entity::find_by_id(id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "ENABLED");
    assert_eq!(row.key_algorithm, "RSA");
    assert!(row.session_id.is_none());
}

#[tokio::test]
async fn test_duplicate_credential_id() {
    let db = setup_db().await;
    let provider = CredentialProvider { db };
    let credential = dummy_credential("alice");

    provider.create_credential(credential.clone()).await.unwrap();
    let result = provider.create_credential(credential).await;

    assert!(matches!(result, Err(DataLayerError::AlreadyExists)));
}

#[tokio::test]
async fn test_session_credentials_are_not_listed() {
    let db = setup_db().await;
    let provider = CredentialProvider { db: db.clone() };
    let sessions = SessionProvider { db };

    let first = dummy_credential("alice");
    let mut second = dummy_credential("alice");
    second.created_date = NOW + Duration::minutes(1);
    provider.create_credential(first.clone()).await.unwrap();
    provider.create_credential(second.clone()).await.unwrap();
    provider
        .create_credential(dummy_credential("bob"))
        .await
        .unwrap();

    let session_credential = dummy_credential("alice");
    sessions
        .create_session(
            CredentialSession {
                id: "session-1".into(),
                credential_id: session_credential.id,
                created_date: NOW,
                expires_at: NOW + Duration::hours(1),
            },
            SessionCredentialMetadata {
                session_id: "session-1".into(),
                credential: session_credential.clone(),
            },
        )
        .await
        .unwrap();

    let listed = provider.get_credentials_by_user("alice").await.unwrap();
    assert_eq!(listed, vec![first, second]);

    assert!(
        provider
            .get_credential(&session_credential.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_update_status() {
    let db = setup_db().await;
    let provider = CredentialProvider { db };
    let credential = dummy_credential("alice");
    provider.create_credential(credential.clone()).await.unwrap();

    let modified = NOW + Duration::days(1);
    provider
        .update_status(&credential.id, CredentialStatus::Disabled, modified)
        .await
        .unwrap();

    let found = provider.get_credential(&credential.id).await.unwrap().unwrap();
    assert_eq!(found.status, CredentialStatus::Disabled);
    assert_eq!(found.last_modified, modified);
    assert_eq!(found.created_date, credential.created_date);
}

#[tokio::test]
async fn test_update_status_of_missing_credential() {
    let db = setup_db().await;
    let provider = CredentialProvider { db };

    let result = provider
        .update_status(
            &dummy_credential("alice").id,
            CredentialStatus::Disabled,
            NOW,
        )
        .await;

    assert!(matches!(result, Err(DataLayerError::RecordNotUpdated)));
}

#[tokio::test]
async fn test_delete_credential() {
    let db = setup_db().await;
    let provider = CredentialProvider { db };
    let credential = dummy_credential("alice");
    provider.create_credential(credential.clone()).await.unwrap();

    provider.delete_credential(&credential.id).await.unwrap();

    assert!(
        provider
            .get_credential(&credential.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(matches!(
        provider.delete_credential(&credential.id).await,
        Err(DataLayerError::RecordNotUpdated)
    ));
}
