use secrecy::SecretString;

/// Already authenticated caller of a sign or credential operation.
#[derive(Debug)]
pub struct Caller {
    pub id: String,
    /// Forwarded to the user info lookup
    pub auth_token: SecretString,
}
