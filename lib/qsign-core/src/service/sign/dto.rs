use crate::model::caller::Caller;
use crate::model::signature::{SignatureActivationData, SignatureParameters};

/// Everything about one sign call except the token lifecycle and the data itself.
#[derive(Debug)]
pub struct SignProcessConfiguration {
    pub caller: Caller,
    pub parameters: SignatureParameters,
    pub sad: SignatureActivationData,
}
