//! sea-orm implementation of the qsign-core repositories.

use std::sync::Arc;

use credential::CredentialProvider;
use error_mapper::to_data_layer_error;
use migration::{Migrator, MigratorTrait};
use qsign_core::repository::DataRepository;
use qsign_core::repository::credential_repository::CredentialRepository;
use qsign_core::repository::error::DataLayerError;
use qsign_core::repository::session_repository::SessionRepository;
use qsign_core::repository::signing_key_repository::{
    RenewableKeyRepository, SingleUseKeyRepository,
};
use sea_orm::{ConnectOptions, DatabaseConnection};
use session::SessionProvider;
use signing_key::{RenewableKeyProvider, SingleUseKeyProvider};

mod entity;
mod error_mapper;

pub mod credential;
pub mod session;
pub mod signing_key;

#[cfg(test)]
mod test_utilities;

#[derive(Clone)]
pub struct DataLayer {
    renewable_key_repository: Arc<dyn RenewableKeyRepository>,
    single_use_key_repository: Arc<dyn SingleUseKeyRepository>,
    credential_repository: Arc<dyn CredentialRepository>,
    session_repository: Arc<dyn SessionRepository>,
}

impl DataLayer {
    /// Connects and brings the schema up to date
    pub async fn create(database_url: &str) -> Result<Self, DataLayerError> {
        let db = db_conn(ConnectOptions::new(database_url)).await?;
        Ok(Self::build(db))
    }

    pub fn build(db: DatabaseConnection) -> Self {
        Self {
            renewable_key_repository: Arc::new(RenewableKeyProvider { db: db.clone() }),
            single_use_key_repository: Arc::new(SingleUseKeyProvider { db: db.clone() }),
            credential_repository: Arc::new(CredentialProvider { db: db.clone() }),
            session_repository: Arc::new(SessionProvider { db }),
        }
    }
}

pub async fn db_conn(options: ConnectOptions) -> Result<DatabaseConnection, DataLayerError> {
    let db = sea_orm::Database::connect(options)
        .await
        .map_err(to_data_layer_error)?;

    Migrator::up(&db, None).await.map_err(to_data_layer_error)?;
    tracing::debug!("Database schema migrated");

    Ok(db)
}

impl DataRepository for DataLayer {
    fn get_renewable_key_repository(&self) -> Arc<dyn RenewableKeyRepository> {
        self.renewable_key_repository.clone()
    }
    fn get_single_use_key_repository(&self) -> Arc<dyn SingleUseKeyRepository> {
        self.single_use_key_repository.clone()
    }
    fn get_credential_repository(&self) -> Arc<dyn CredentialRepository> {
        self.credential_repository.clone()
    }
    fn get_session_repository(&self) -> Arc<dyn SessionRepository> {
        self.session_repository.clone()
    }
}
