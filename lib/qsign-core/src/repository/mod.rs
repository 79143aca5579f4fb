use std::sync::Arc;

use credential_repository::CredentialRepository;
use session_repository::SessionRepository;
use signing_key_repository::{RenewableKeyRepository, SingleUseKeyRepository};

pub mod credential_repository;
pub mod error;
pub mod session_repository;
pub mod signing_key_repository;

pub trait DataRepository: Send + Sync {
    fn get_renewable_key_repository(&self) -> Arc<dyn RenewableKeyRepository>;
    fn get_single_use_key_repository(&self) -> Arc<dyn SingleUseKeyRepository>;
    fn get_credential_repository(&self) -> Arc<dyn CredentialRepository>;
    fn get_session_repository(&self) -> Arc<dyn SessionRepository>;
}
