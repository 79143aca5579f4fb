use sea_orm::DatabaseConnection;

mod repository;

pub(crate) struct SessionProvider {
    pub db: DatabaseConnection,
}
