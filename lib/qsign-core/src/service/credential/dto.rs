use crate::model::caller::Caller;
use crate::model::crypto_token::KeyAlgorithm;
use crate::model::signature::SignatureActivationData;

#[derive(Debug)]
pub struct CreateCredentialRequest {
    pub caller: Caller,
    /// Name of the crypto token that holds the key
    pub crypto_token: String,
    pub signature_qualifier: String,
    pub key_algorithm: KeyAlgorithm,
    pub sad: SignatureActivationData,
}
