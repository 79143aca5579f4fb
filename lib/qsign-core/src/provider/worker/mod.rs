//! Static registry of signing workers and their crypto tokens, built once from config.

use criteria::CapabilityRequirement;

use crate::model::crypto_token::{CryptoToken, CryptoTokenId};
use crate::model::worker::{Worker, WorkerCapabilities, WorkerId};

pub mod criteria;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredWorker {
    pub worker: Worker,
    pub capabilities: WorkerCapabilities,
    pub crypto_token: CryptoToken,
}

#[derive(Debug, Default)]
pub struct WorkerRegistry {
    workers: Vec<RegisteredWorker>,
    crypto_tokens: Vec<CryptoToken>,
}

impl WorkerRegistry {
    /// Workers whose crypto token is unknown are skipped, config validation rejects them earlier.
    pub fn new(
        workers: Vec<(Worker, WorkerCapabilities)>,
        crypto_tokens: Vec<CryptoToken>,
    ) -> Self {
        let workers = workers
            .into_iter()
            .filter_map(|(worker, capabilities)| {
                let Some(crypto_token) = crypto_tokens
                    .iter()
                    .find(|token| token.name == worker.crypto_token)
                else {
                    tracing::warn!(
                        worker = %worker.name,
                        crypto_token = %worker.crypto_token,
                        "Skipping worker with unknown crypto token"
                    );
                    return None;
                };

                Some(RegisteredWorker {
                    crypto_token: crypto_token.to_owned(),
                    worker,
                    capabilities,
                })
            })
            .collect();

        Self {
            workers,
            crypto_tokens,
        }
    }

    /// First worker in declaration order that satisfies every criterion
    pub fn select_worker(&self, requirement: &CapabilityRequirement) -> Option<&RegisteredWorker> {
        self.workers
            .iter()
            .find(|registered| requirement.is_satisfied_by(&registered.capabilities))
    }

    pub fn get_worker_by_id(&self, id: WorkerId) -> Option<&RegisteredWorker> {
        self.workers
            .iter()
            .find(|registered| registered.worker.id == id)
    }

    pub fn get_worker_by_name(&self, name: &str) -> Option<&RegisteredWorker> {
        self.workers
            .iter()
            .find(|registered| registered.worker.name == name)
    }

    pub fn get_crypto_token(&self, name: &str) -> Option<&CryptoToken> {
        self.crypto_tokens.iter().find(|token| token.name == name)
    }

    pub fn get_crypto_token_by_id(&self, id: CryptoTokenId) -> Option<&CryptoToken> {
        self.crypto_tokens.iter().find(|token| token.id == id)
    }

    pub fn crypto_tokens(&self) -> &[CryptoToken] {
        &self.crypto_tokens
    }
}
