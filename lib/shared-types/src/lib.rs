//! Identifier newtypes shared between the signing core and its data providers.

mod credential_id;
mod macros;
mod session_id;
mod signing_key_id;

pub use credential_id::CredentialId;
pub use session_id::SessionId;
pub use signing_key_id::SigningKeyId;
