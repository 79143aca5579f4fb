use sea_orm_migration::prelude::*;

use crate::datatype::ColumnDefExt;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RenewableKey::Table)
                    .col(
                        ColumnDef::new(RenewableKey::Id)
                            .char_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RenewableKey::CreatedDate)
                            .datetime_millisecond_precision(manager)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RenewableKey::CryptoTokenId)
                            .unsigned()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RenewableKey::KeyAlias).string().not_null())
                    .col(ColumnDef::new(RenewableKey::Algorithm).string().not_null())
                    .col(ColumnDef::new(RenewableKey::InUse).boolean().not_null())
                    .col(
                        ColumnDef::new(RenewableKey::AcquiredAt)
                            .datetime_millisecond_precision(manager)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("index-RenewableKey-CryptoTokenId-KeyAlias-Unique")
                    .unique()
                    .table(RenewableKey::Table)
                    .col(RenewableKey::CryptoTokenId)
                    .col(RenewableKey::KeyAlias)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("index-RenewableKey-CryptoTokenId-Algorithm-InUse")
                    .table(RenewableKey::Table)
                    .col(RenewableKey::CryptoTokenId)
                    .col(RenewableKey::Algorithm)
                    .col(RenewableKey::InUse)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SingleUseKey::Table)
                    .col(
                        ColumnDef::new(SingleUseKey::Id)
                            .char_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SingleUseKey::CreatedDate)
                            .datetime_millisecond_precision(manager)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SingleUseKey::CryptoTokenId)
                            .unsigned()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SingleUseKey::KeyAlias).string().not_null())
                    .col(ColumnDef::new(SingleUseKey::Algorithm).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("index-SingleUseKey-CryptoTokenId-Algorithm")
                    .table(SingleUseKey::Table)
                    .col(SingleUseKey::CryptoTokenId)
                    .col(SingleUseKey::Algorithm)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CredentialSession::Table)
                    .col(
                        ColumnDef::new(CredentialSession::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CredentialSession::CredentialId)
                            .char_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CredentialSession::CreatedDate)
                            .datetime_millisecond_precision(manager)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CredentialSession::ExpiresAt)
                            .datetime_millisecond_precision(manager)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("index-CredentialSession-ExpiresAt")
                    .table(CredentialSession::Table)
                    .col(CredentialSession::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Credential::Table)
                    .col(
                        ColumnDef::new(Credential::Id)
                            .char_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Credential::CreatedDate)
                            .datetime_millisecond_precision(manager)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Credential::LastModified)
                            .datetime_millisecond_precision(manager)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Credential::UserId).string().not_null())
                    .col(ColumnDef::new(Credential::SessionId).string().null())
                    .col(
                        ColumnDef::new(Credential::CryptoTokenId)
                            .unsigned()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Credential::KeyAlias).string().not_null())
                    .col(ColumnDef::new(Credential::KeyAlgorithm).string().not_null())
                    .col(ColumnDef::new(Credential::EndEntityName).string().not_null())
                    .col(ColumnDef::new(Credential::SubjectDn).text().not_null())
                    .col(ColumnDef::new(Credential::IssuerDn).text().not_null())
                    .col(ColumnDef::new(Credential::SerialNumber).string().not_null())
                    .col(
                        ColumnDef::new(Credential::SignatureQualifier)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Credential::Multisign).unsigned().not_null())
                    .col(
                        ColumnDef::new(Credential::CertificateChain)
                            .large_blob(manager)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Credential::ValidUntil)
                            .datetime_millisecond_precision(manager)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Credential::Status).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-Credential-SessionId")
                            .from_tbl(Credential::Table)
                            .from_col(Credential::SessionId)
                            .to_tbl(CredentialSession::Table)
                            .to_col(CredentialSession::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("index-Credential-UserId")
                    .table(Credential::Table)
                    .col(Credential::UserId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum RenewableKey {
    Table,
    Id,
    CreatedDate,
    CryptoTokenId,
    KeyAlias,
    Algorithm,
    InUse,
    AcquiredAt,
}

#[derive(DeriveIden)]
pub(crate) enum SingleUseKey {
    Table,
    Id,
    CreatedDate,
    CryptoTokenId,
    KeyAlias,
    Algorithm,
}

#[derive(DeriveIden)]
pub(crate) enum Credential {
    Table,
    Id,
    CreatedDate,
    LastModified,
    UserId,
    SessionId,
    CryptoTokenId,
    KeyAlias,
    KeyAlgorithm,
    EndEntityName,
    SubjectDn,
    IssuerDn,
    SerialNumber,
    SignatureQualifier,
    Multisign,
    CertificateChain,
    ValidUntil,
    Status,
}

#[derive(DeriveIden)]
pub(crate) enum CredentialSession {
    Table,
    Id,
    CredentialId,
    CreatedDate,
    ExpiresAt,
}
