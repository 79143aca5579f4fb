use std::sync::Arc;

use crate::proto::clock::Clock;
use crate::provider::key_pool::renewable::RenewableKeyPool;
use crate::repository::session_repository::SessionRepository;

pub mod dto;
pub mod service;

#[cfg(test)]
mod test;

#[derive(Clone)]
pub struct SessionService {
    session_repository: Arc<dyn SessionRepository>,
    key_pool: Arc<RenewableKeyPool>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        key_pool: Arc<RenewableKeyPool>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session_repository,
            key_pool,
            clock,
        }
    }
}
