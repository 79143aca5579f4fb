use std::sync::Arc;

use mockall::predicate::eq;
use shared_types::SessionId;
use similar_asserts::assert_eq;
use time::Duration;

use super::SessionService;
use crate::error::{ErrorCode, ErrorCodeMixin};
use crate::model::session::{
    CredentialSession, SessionCredentialMetadata, SessionStatus, SessionWithCredential,
};
use crate::model::signing_key::RenewableKey;
use crate::provider::crypto_token::MockCryptoTokenClient;
use crate::provider::crypto_token::error::CryptoTokenError;
use crate::repository::error::DataLayerError;
use crate::repository::session_repository::MockSessionRepository;
use crate::service::error::{EntityAlreadyExistsError, ServiceError};
use crate::service::test_utilities::*;

fn setup_service(repository: MockSessionRepository) -> SessionService {
    setup_service_with_keys(
        repository,
        Arc::new(InMemoryRenewableKeyRepository::default()),
        MockCryptoTokenClient::new(),
    )
}

fn setup_service_with_keys(
    repository: MockSessionRepository,
    key_repository: Arc<InMemoryRenewableKeyRepository>,
    pool_client: MockCryptoTokenClient,
) -> SessionService {
    SessionService::new(
        Arc::new(repository),
        renewable_key_pool(key_repository, pool_client),
        fixed_clock(NOW),
    )
}

fn session_key(session_id: &str) -> RenewableKey {
    let mut key = free_renewable_key(&format!("ephemeral-rsa-{session_id}"));
    key.in_use = true;
    key.acquired_at = Some(NOW - Duration::hours(1));
    key
}

fn expect_key_removal(client: &mut MockCryptoTokenClient, session_ids: &[&str]) {
    let aliases: Vec<String> = session_ids
        .iter()
        .map(|id| format!("ephemeral-rsa-{id}"))
        .collect();
    client
        .expect_remove_key()
        .times(session_ids.len())
        .withf(move |_, alias, ok_if_missing| {
            aliases.iter().any(|expected| expected == alias) && *ok_if_missing
        })
        .returning(|_, _, _| Ok(()));
}

fn stored_session(session_id: &str, expires_at: time::OffsetDateTime) -> SessionWithCredential {
    let mut credential = dummy_credential("user-1", 1);
    credential.key_alias = format!("ephemeral-rsa-{session_id}");
    SessionWithCredential {
        session: CredentialSession {
            id: session_id.into(),
            credential_id: credential.id,
            created_date: NOW - Duration::hours(1),
            expires_at,
        },
        credential: SessionCredentialMetadata {
            session_id: session_id.into(),
            credential,
        },
    }
}

#[tokio::test]
async fn test_create_session() {
    let credential = dummy_credential("user-1", 1);
    let credential_id = credential.id;
    let expires_at = NOW + Duration::hours(1);

    let mut repository = MockSessionRepository::new();
    repository
        .expect_create_session()
        .once()
        .withf(move |session, session_credential| {
            session.id.as_str() == "session-1"
                && session.credential_id == credential_id
                && session.created_date == NOW
                && session.expires_at == expires_at
                && session_credential.session_id.as_str() == "session-1"
                && session_credential.credential.id == credential_id
        })
        .returning(|_, _| Ok(()));

    let service = setup_service(repository);
    let created = service
        .create_session(&SessionId::from("session-1"), credential, expires_at)
        .await
        .unwrap();

    assert_eq!(created.session.id.as_str(), "session-1");
    assert_ne!(created.session.id.as_str(), created.session.credential_id.to_string());
}

#[tokio::test]
async fn test_create_session_already_exists() {
    let mut repository = MockSessionRepository::new();
    repository
        .expect_create_session()
        .once()
        .returning(|_, _| Err(DataLayerError::AlreadyExists));

    let service = setup_service(repository);
    let result = service
        .create_session(
            &SessionId::from("session-1"),
            dummy_credential("user-1", 1),
            NOW + Duration::hours(1),
        )
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::EntityAlreadyExists(
            EntityAlreadyExistsError::Session(_)
        ))
    ));
}

#[tokio::test]
async fn test_get_session_statuses() {
    let mut repository = MockSessionRepository::new();
    repository
        .expect_get_session()
        .with(eq(SessionId::from("active")))
        .returning(|_| Ok(Some(stored_session("active", NOW + Duration::seconds(1)))));
    repository
        .expect_get_session()
        .with(eq(SessionId::from("expired")))
        .returning(|_| Ok(Some(stored_session("expired", NOW))));
    repository
        .expect_get_session()
        .with(eq(SessionId::from("missing")))
        .returning(|_| Ok(None));

    let service = setup_service(repository);

    let active = service.get_session(&"active".into()).await.unwrap();
    assert_eq!(active.status, SessionStatus::Active);
    assert!(active.session.is_some());

    let expired = service.get_session(&"expired".into()).await.unwrap();
    assert_eq!(expired.status, SessionStatus::Expired);

    let missing = service.get_session(&"missing".into()).await.unwrap();
    assert_eq!(missing.status, SessionStatus::Nonexistent);
    assert!(missing.session.is_none());
}

#[tokio::test]
async fn test_delete_active_session_releases_key() {
    let mut repository = MockSessionRepository::new();
    repository
        .expect_get_session()
        .once()
        .returning(|_| Ok(Some(stored_session("active", NOW + Duration::hours(1)))));
    repository
        .expect_delete_session()
        .once()
        .with(eq(SessionId::from("active")))
        .returning(|_| Ok(()));

    let key_repository = Arc::new(InMemoryRenewableKeyRepository::with_keys(vec![
        session_key("active"),
        session_key("other"),
    ]));
    let mut pool_client = MockCryptoTokenClient::new();
    expect_key_removal(&mut pool_client, &["active"]);

    let service = setup_service_with_keys(repository, key_repository.clone(), pool_client);
    service.delete_session(&"active".into()).await.unwrap();

    let remaining: Vec<_> = key_repository
        .snapshot()
        .into_iter()
        .map(|key| key.key_alias)
        .collect();
    assert_eq!(remaining, vec!["ephemeral-rsa-other".to_string()]);
}

#[tokio::test]
async fn test_delete_session_keeps_going_when_key_removal_fails() {
    let mut repository = MockSessionRepository::new();
    repository
        .expect_get_session()
        .once()
        .returning(|_| Ok(Some(stored_session("expired", NOW - Duration::hours(1)))));
    repository
        .expect_delete_session()
        .once()
        .returning(|_| Ok(()));

    let key_repository = Arc::new(InMemoryRenewableKeyRepository::with_keys(vec![session_key(
        "expired",
    )]));
    let mut pool_client = MockCryptoTokenClient::new();
    pool_client
        .expect_remove_key()
        .once()
        .returning(|_, _, _| Err(CryptoTokenError::Unavailable("timeout".to_string())));

    let service = setup_service_with_keys(repository, key_repository.clone(), pool_client);
    service.delete_session(&"expired".into()).await.unwrap();

    let remaining = key_repository.snapshot();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].in_use);
}

#[tokio::test]
async fn test_delete_missing_session() {
    let mut repository = MockSessionRepository::new();
    repository
        .expect_get_session()
        .once()
        .returning(|_| Ok(None));
    repository.expect_delete_session().never();

    let service = setup_service(repository);
    let error = service
        .delete_session(&"missing".into())
        .await
        .unwrap_err();

    assert_eq!(error.error_code(), ErrorCode::BR_0019);
}

#[tokio::test]
async fn test_clean_expired_sessions_releases_keys() {
    let mut repository = MockSessionRepository::new();
    repository
        .expect_delete_expired_before()
        .once()
        .with(eq(NOW - Duration::days(1)))
        .returning(|_| {
            Ok(["old-1", "old-2"]
                .into_iter()
                .map(|id| stored_session(id, NOW - Duration::days(2)).credential)
                .collect())
        });

    let key_repository = Arc::new(InMemoryRenewableKeyRepository::with_keys(vec![
        session_key("old-1"),
        session_key("old-2"),
        session_key("live"),
    ]));
    let mut pool_client = MockCryptoTokenClient::new();
    expect_key_removal(&mut pool_client, &["old-1", "old-2"]);

    let service = setup_service_with_keys(repository, key_repository.clone(), pool_client);
    let deleted = service
        .clean_expired_sessions(Duration::days(1))
        .await
        .unwrap();

    assert_eq!(deleted, 2);
    let remaining: Vec<_> = key_repository
        .snapshot()
        .into_iter()
        .map(|key| key.key_alias)
        .collect();
    assert_eq!(remaining, vec!["ephemeral-rsa-live".to_string()]);
}

#[tokio::test]
async fn test_clean_expired_sessions_nothing_expired() {
    let mut repository = MockSessionRepository::new();
    repository
        .expect_delete_expired_before()
        .once()
        .returning(|_| Ok(vec![]));

    let service = setup_service(repository);
    let deleted = service
        .clean_expired_sessions(Duration::days(1))
        .await
        .unwrap();

    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn test_repository_error_keeps_database_code() {
    let mut repository = MockSessionRepository::new();
    repository
        .expect_get_session()
        .once()
        .returning(|_| Err(DataLayerError::Connection(anyhow::anyhow!("refused"))));

    let service = setup_service(repository);
    let error = service.get_session(&"any".into()).await.unwrap_err();

    assert_eq!(error.error_code(), ErrorCode::BR_0006);
}
