use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::error::CredentialFactoryError;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\{([A-Za-z0-9_.\-]+)\}").expect("placeholder pattern is valid")
});

/// Replaces every `{attribute}` placeholder with the attribute value passed through `sanitize`.
pub(crate) fn render_pattern(
    pattern: &str,
    attributes: &HashMap<String, String>,
    sanitize: impl Fn(&str) -> String,
) -> Result<String, CredentialFactoryError> {
    if let Some(missing) = PLACEHOLDER
        .captures_iter(pattern)
        .map(|captures| captures[1].to_owned())
        .find(|attribute| !attributes.contains_key(attribute))
    {
        return Err(CredentialFactoryError::MissingAttribute {
            attribute: missing,
            pattern: pattern.to_owned(),
        });
    }

    Ok(PLACEHOLDER
        .replace_all(pattern, |captures: &Captures| {
            attributes
                .get(&captures[1])
                .map(|value| sanitize(value))
                .unwrap_or_default()
        })
        .into_owned())
}

/// Escapes characters reserved in DN and SAN component values
pub(crate) fn sanitize_component_value(value: &str) -> String {
    let mut sanitized = String::with_capacity(value.len());
    for (index, character) in value.chars().enumerate() {
        match character {
            '\\' | ',' | '+' | '=' | '"' => {
                sanitized.push('\\');
                sanitized.push(character);
            }
            '#' if index == 0 => sanitized.push_str("\\#"),
            _ => sanitized.push(character),
        }
    }
    sanitized
}

pub(crate) fn keep_value(value: &str) -> String {
    value.to_owned()
}
