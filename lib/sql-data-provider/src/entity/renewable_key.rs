use sea_orm::entity::prelude::*;
use shared_types::SigningKeyId;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "renewable_key")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: SigningKeyId,

    pub created_date: OffsetDateTime,
    pub crypto_token_id: u32,
    pub key_alias: String,
    pub algorithm: String,
    pub in_use: bool,
    pub acquired_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
