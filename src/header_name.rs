use once_cell::sync::Lazy;
use regex_automata::meta::Regex;
use thiserror::Error;

static HEADER_NAME_SYNTAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$").expect("header name grammar compiles")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderNameError {
    #[error("the header field name must not be an empty string")]
    Empty,
    #[error("invalid header field name syntax: {0}")]
    InvalidSyntax(String),
}

/// Formats a header field name in canonical form, e.g. `x-forwarded-for`
/// becomes `X-Forwarded-For`.
///
/// The name must begin with a letter and may then contain only letters,
/// digits, `_` and `-`.
pub fn format_canonical(name: &str) -> Result<String, HeaderNameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HeaderNameError::Empty);
    }

    if !HEADER_NAME_SYNTAX.is_match(trimmed) {
        return Err(HeaderNameError::InvalidSyntax(trimmed.to_owned()));
    }

    let lowered = trimmed.to_ascii_lowercase();
    let tokens = lowered.split('-').map(capitalize).collect::<Vec<_>>();
    Ok(tokens.join("-"))
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "header_name_test.rs"]
mod header_name_test;
