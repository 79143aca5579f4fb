use sea_orm::entity::prelude::*;
use shared_types::{CredentialId, SessionId};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credential")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: CredentialId,

    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub user_id: String,
    /// Set for credentials created together with a session
    pub session_id: Option<SessionId>,
    pub crypto_token_id: u32,
    pub key_alias: String,
    pub key_algorithm: String,
    pub end_entity_name: String,
    pub subject_dn: String,
    pub issuer_dn: String,
    pub serial_number: String,
    pub signature_qualifier: String,
    pub multisign: u32,

    /// JSON array of hex encoded DER certificates, leaf first
    #[sea_orm(column_type = "Blob")]
    pub certificate_chain: Vec<u8>,

    pub valid_until: OffsetDateTime,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credential_session::Entity",
        from = "Column::SessionId",
        to = "super::credential_session::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    CredentialSession,
}

impl Related<super::credential_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CredentialSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
