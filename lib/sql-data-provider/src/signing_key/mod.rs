use sea_orm::DatabaseConnection;

mod mapper;
mod renewable;
mod single_use;

pub(crate) struct RenewableKeyProvider {
    pub db: DatabaseConnection,
}

pub(crate) struct SingleUseKeyProvider {
    pub db: DatabaseConnection,
}

#[cfg(test)]
mod test;
