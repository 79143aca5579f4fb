pub mod caller;
pub mod credential;
pub mod crypto_token;
pub mod session;
pub mod signature;
pub mod signature_qualifier;
pub mod signing_key;
pub mod worker;
