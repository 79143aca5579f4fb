use time::Duration;

/// Issuance rules of a signature qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureQualifierProfile {
    pub name: String,
    pub ca_name: String,
    pub certificate_profile: String,
    pub end_entity_profile: String,
    pub username_pattern: String,
    pub distinguished_name_pattern: String,
    pub subject_alt_name_pattern: Option<String>,
    pub validity_offset: Duration,
    pub validity: Duration,
    pub multisign: u32,
}
