use std::sync::Arc;

use crate::proto::clock::Clock;
use crate::provider::credential_factory::CredentialFactory;
use crate::provider::key_pool::single_use::SingleUseKeyPool;
use crate::provider::worker::WorkerRegistry;
use crate::repository::credential_repository::CredentialRepository;

pub mod dto;
pub mod service;


#[derive(Clone)]
pub struct CredentialService {
    worker_registry: Arc<WorkerRegistry>,
    key_pool: Arc<SingleUseKeyPool>,
    credential_factory: Arc<CredentialFactory>,
    credential_repository: Arc<dyn CredentialRepository>,
    clock: Arc<dyn Clock>,
}

impl CredentialService {
    pub fn new(
        worker_registry: Arc<WorkerRegistry>,
        key_pool: Arc<SingleUseKeyPool>,
        credential_factory: Arc<CredentialFactory>,
        credential_repository: Arc<dyn CredentialRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            worker_registry,
            key_pool,
            credential_factory,
            credential_repository,
            clock,
        }
    }
}
