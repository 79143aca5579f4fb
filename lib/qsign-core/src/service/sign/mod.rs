use std::sync::Arc;

use crate::provider::signer::RemoteSigner;
use crate::provider::signing_token::SigningTokenProviders;
use crate::provider::worker::WorkerRegistry;

pub mod dto;
pub mod service;


#[derive(Clone)]
pub struct SignService {
    worker_registry: Arc<WorkerRegistry>,
    token_providers: Arc<SigningTokenProviders>,
    signer: Arc<RemoteSigner>,
}

impl SignService {
    pub fn new(
        worker_registry: Arc<WorkerRegistry>,
        token_providers: Arc<SigningTokenProviders>,
        signer: Arc<RemoteSigner>,
    ) -> Self {
        Self {
            worker_registry,
            token_providers,
            signer,
        }
    }
}
