use serde::{Deserialize, Serialize};

#[cfg(feature = "sea-orm")]
use crate::macros::sea_orm_text_id;
use crate::macros::id_conversions;

/// Caller supplied session identifier.
///
/// The value is opaque and acts as an idempotency key: the first sign request that carries it
/// creates the session, later requests reuse it.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for SessionId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

id_conversions!(SessionId; String);

#[cfg(feature = "sea-orm")]
sea_orm_text_id!(SessionId);
