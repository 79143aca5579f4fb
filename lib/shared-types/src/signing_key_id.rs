use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sea-orm")]
use crate::macros::sea_orm_text_id;
use crate::macros::uuid_id;

/// Identifier of a key pool row.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct SigningKeyId(Uuid);

uuid_id!(SigningKeyId);

#[cfg(feature = "sea-orm")]
sea_orm_text_id!(SigningKeyId);
