use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sea-orm")]
use crate::macros::sea_orm_text_id;
use crate::macros::uuid_id;

/// Identifier of a long-term or session credential.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct CredentialId(Uuid);

uuid_id!(CredentialId);

#[cfg(feature = "sea-orm")]
sea_orm_text_id!(CredentialId);
