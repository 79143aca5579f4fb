use std::sync::Arc;

use super::RetryPolicy;
use super::credential::RetryingCredentialRepository;
use super::key::RetryingSingleUseKeyRepository;
use crate::repository::DataRepository;
use crate::repository::credential_repository::CredentialRepository;
use crate::repository::session_repository::SessionRepository;
use crate::repository::signing_key_repository::{RenewableKeyRepository, SingleUseKeyRepository};

struct DecoratedDataProvider {
    // for non-decorated repositories
    data_provider: Arc<dyn DataRepository>,

    // long-term repositories, retried
    single_use_key_repository: Arc<dyn SingleUseKeyRepository>,
    credential_repository: Arc<dyn CredentialRepository>,
}

impl DataRepository for DecoratedDataProvider {
    // decorated
    fn get_single_use_key_repository(&self) -> Arc<dyn SingleUseKeyRepository> {
        self.single_use_key_repository.clone()
    }
    fn get_credential_repository(&self) -> Arc<dyn CredentialRepository> {
        self.credential_repository.clone()
    }

    // non-decorated
    fn get_renewable_key_repository(&self) -> Arc<dyn RenewableKeyRepository> {
        self.data_provider.get_renewable_key_repository()
    }
    fn get_session_repository(&self) -> Arc<dyn SessionRepository> {
        self.data_provider.get_session_repository()
    }
}

pub(crate) fn decorate_data_provider(
    data_provider: Arc<dyn DataRepository>,
    policy: RetryPolicy,
) -> Arc<dyn DataRepository> {
    let single_use_key_repository = Arc::new(RetryingSingleUseKeyRepository {
        inner: data_provider.get_single_use_key_repository(),
        policy,
    });

    let credential_repository = Arc::new(RetryingCredentialRepository {
        inner: data_provider.get_credential_repository(),
        policy,
    });

    Arc::new(DecoratedDataProvider {
        data_provider,
        single_use_key_repository,
        credential_repository,
    })
}
