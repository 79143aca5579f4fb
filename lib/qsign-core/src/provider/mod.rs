pub mod certificate_authority;
pub mod credential_factory;
pub mod crypto_token;
pub mod key_pool;
pub mod signer;
pub mod signing_token;
pub mod user_info;
pub mod worker;
