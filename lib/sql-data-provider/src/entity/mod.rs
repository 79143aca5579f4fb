pub mod credential;
pub mod credential_session;
pub mod renewable_key;
pub mod single_use_key;
