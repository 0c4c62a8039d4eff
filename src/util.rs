/// Splits a configuration value made of words separated by commas and/or
/// whitespace. Empty segments are dropped.
pub fn parse_words(value: &str) -> Vec<String> {
    split_list(value).map(str::to_owned).collect()
}

/// Splits a multi-valued header such as `Access-Control-Request-Headers`.
/// An absent or blank header yields no values.
pub fn parse_multiple_header_values(value: Option<&str>) -> Vec<String> {
    match value {
        Some(value) => parse_words(value),
        None => Vec::new(),
    }
}

/// Joins header values with the given separator.
pub fn serialize<I, S>(values: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (idx, value) in values.into_iter().enumerate() {
        if idx > 0 {
            out.push_str(separator);
        }
        out.push_str(value.as_ref());
    }
    out
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .trim()
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|word| !word.is_empty())
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
