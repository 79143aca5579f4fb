use sea_orm::DatabaseConnection;

pub(crate) mod mapper;
mod repository;

pub(crate) struct CredentialProvider {
    pub db: DatabaseConnection,
}

#[cfg(test)]
mod test;
