use std::sync::Arc;

use qsign_core::model::crypto_token::{CryptoTokenId, KeyAlgorithm};
use qsign_core::repository::error::DataLayerError;
use qsign_core::repository::signing_key_repository::{
    RenewableKeyRepository, SingleUseKeyRepository,
};
use sea_orm::EntityTrait;
use similar_asserts::assert_eq;
use time::Duration;

use super::{RenewableKeyProvider, SingleUseKeyProvider};
use crate::entity::{renewable_key, single_use_key};
use crate::test_utilities::*;

#[tokio::test]
async fn test_acquire_free_takes_oldest_and_flags_it() {
    let db = setup_db().await;
    insert_renewable_key(&db, dummy_renewable_key("rsa-2", NOW)).await;
    let oldest =
        insert_renewable_key(&db, dummy_renewable_key("rsa-1", NOW - Duration::hours(1))).await;

    let provider = RenewableKeyProvider { db: db.clone() };
    let acquired = provider
        .acquire_free(CryptoTokenId(1), KeyAlgorithm::Rsa, NOW)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(acquired.id, oldest.id);
    assert!(acquired.in_use);
    assert_eq!(acquired.acquired_at, Some(NOW));

    let row = renewable_key::Entity::find_by_id(oldest.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(row.in_use);
    assert_eq!(
        provider
            .count_free(CryptoTokenId(1), KeyAlgorithm::Rsa)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_acquire_free_skips_other_tokens_and_algorithms() {
    let db = setup_db().await;
    let mut other_token = dummy_renewable_key("rsa-other", NOW);
    other_token.crypto_token_id = CryptoTokenId(2);
    insert_renewable_key(&db, other_token).await;
    let mut ec = dummy_renewable_key("ec-1", NOW);
    ec.algorithm = KeyAlgorithm::Ec;
    insert_renewable_key(&db, ec).await;

    let provider = RenewableKeyProvider { db };
    let acquired = provider
        .acquire_free(CryptoTokenId(1), KeyAlgorithm::Rsa, NOW)
        .await
        .unwrap();

    assert!(acquired.is_none());
}

#[tokio::test]
async fn test_concurrent_acquire_never_hands_out_the_same_key() {
    let db = setup_db().await;
    for i in 0..3 {
        insert_renewable_key(
            &db,
            dummy_renewable_key(&format!("rsa-{i}"), NOW + Duration::seconds(i)),
        )
        .await;
    }

    let provider = Arc::new(RenewableKeyProvider { db });
    let results = futures::future::join_all((0..5).map(|_| {
        let provider = provider.clone();
        async move {
            provider
                .acquire_free(CryptoTokenId(1), KeyAlgorithm::Rsa, NOW)
                .await
                .unwrap()
        }
    }))
    .await;

    let mut aliases: Vec<_> = results.into_iter().flatten().map(|k| k.key_alias).collect();
    aliases.sort();
    assert_eq!(aliases, ["rsa-0", "rsa-1", "rsa-2"].map(String::from).to_vec());
}

#[tokio::test]
async fn test_get_by_alias_and_stale_in_use_keys() {
    let db = setup_db().await;
    let mut stale = dummy_renewable_key("rsa-stale", NOW - Duration::days(2));
    stale.in_use = true;
    stale.acquired_at = Some(NOW - Duration::days(1));
    let stale = insert_renewable_key(&db, stale).await;
    let mut fresh = dummy_renewable_key("rsa-fresh", NOW);
    fresh.in_use = true;
    fresh.acquired_at = Some(NOW);
    insert_renewable_key(&db, fresh).await;

    let provider = RenewableKeyProvider { db };

    let found = provider
        .get_by_alias(CryptoTokenId(1), "rsa-stale")
        .await
        .unwrap();
    assert_eq!(found, Some(stale.clone()));
    assert!(
        provider
            .get_by_alias(CryptoTokenId(2), "rsa-stale")
            .await
            .unwrap()
            .is_none()
    );

    let before = provider
        .get_in_use_acquired_before(NOW - Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(before, vec![stale]);
}

#[tokio::test]
async fn test_create_rejects_duplicate_alias() {
    let db = setup_db().await;
    let provider = RenewableKeyProvider { db };

    let key = dummy_renewable_key("rsa-1", NOW);
    provider.create(key).await.unwrap();

    let result = provider.create(dummy_renewable_key("rsa-1", NOW)).await;
    assert!(matches!(result, Err(DataLayerError::AlreadyExists)));
}

#[tokio::test]
async fn test_delete_renewable_key() {
    let db = setup_db().await;
    let key = insert_renewable_key(&db, dummy_renewable_key("rsa-1", NOW)).await;
    let provider = RenewableKeyProvider { db };

    provider.delete(&key.id).await.unwrap();

    assert!(matches!(
        provider.delete(&key.id).await,
        Err(DataLayerError::RecordNotUpdated)
    ));
}

#[tokio::test]
async fn test_take_free_removes_the_row() {
    let db = setup_db().await;
    let oldest =
        insert_single_use_key(&db, dummy_single_use_key("ec-1", NOW - Duration::minutes(5))).await;
    insert_single_use_key(&db, dummy_single_use_key("ec-2", NOW)).await;

    let provider = SingleUseKeyProvider { db: db.clone() };
    let taken = provider
        .take_free(CryptoTokenId(1), KeyAlgorithm::Ec)
        .await
        .unwrap();

    assert_eq!(taken, Some(oldest.clone()));
    assert!(
        single_use_key::Entity::find_by_id(oldest.id)
            .one(&db)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(
        provider
            .count_free(CryptoTokenId(1), KeyAlgorithm::Ec)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_take_free_on_empty_pool() {
    let db = setup_db().await;
    let provider = SingleUseKeyProvider { db };

    let taken = provider
        .take_free(CryptoTokenId(1), KeyAlgorithm::Rsa)
        .await
        .unwrap();

    assert!(taken.is_none());
}

#[tokio::test]
async fn test_create_and_delete_single_use_key() {
    let db = setup_db().await;
    let provider = SingleUseKeyProvider { db };

    let key = dummy_single_use_key("ec-1", NOW);
    let id = provider.create(key).await.unwrap();
    assert_eq!(
        provider
            .count_free(CryptoTokenId(1), KeyAlgorithm::Ec)
            .await
            .unwrap(),
        1
    );

    provider.delete(&id).await.unwrap();
    assert!(matches!(
        provider.delete(&id).await,
        Err(DataLayerError::RecordNotUpdated)
    ));
}
