use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("missing property: {key}")]
    Missing { key: String },
    #[error("invalid boolean property: {key}={value}")]
    InvalidBoolean { key: String, value: String },
    #[error("invalid int property: {key}={value}")]
    InvalidInt { key: String, value: String },
    #[error("invalid long property: {key}={value}")]
    InvalidLong { key: String, value: String },
    #[error("invalid enum string property: {key}={value}")]
    InvalidEnum { key: String, value: String },
}

/// Anything that can look up a string property by key.
pub trait PropertySource {
    fn property(&self, key: &str) -> Option<&str>;
}

impl PropertySource for HashMap<String, String> {
    fn property(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn property(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl PropertySource for IndexMap<String, String> {
    fn property(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn property(&self, key: &str) -> Option<&str> {
        (**self).property(key)
    }
}

/// An ordered set of `key=value` properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: IndexMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses Java-style `.properties` text.
    ///
    /// A natural line ending in an odd number of backslashes continues on
    /// the next one, whose leading whitespace is dropped. Lines whose first
    /// non-blank character is `#` or `!` are comments. The key ends at the
    /// first unescaped `=`, `:` or whitespace; whitespace and one `=` or `:`
    /// after it are skipped. Keys and values understand `\t`, `\n`, `\r`,
    /// `\f` and `\uXXXX`; any other escaped character stands for itself.
    /// Later definitions win.
    pub fn parse(text: &str) -> Self {
        let mut properties = Self::new();
        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            properties.set(unescape(key), unescape(value));
        }
        properties
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.insert(key.into(), value.into());
    }

    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PropertySource for Properties {
    fn property(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.set(key, value);
        }
        properties
    }
}

/// Typed getters over a [`PropertySource`].
pub struct PropertyRetriever<'a, P: ?Sized> {
    source: &'a P,
}

impl<'a, P: PropertySource + ?Sized> PropertyRetriever<'a, P> {
    pub fn new(source: &'a P) -> Self {
        Self { source }
    }

    pub fn get_string(&self, key: &str) -> Result<&'a str, PropertyError> {
        self.source.property(key).ok_or_else(|| missing(key))
    }

    pub fn get_opt_string(&self, key: &str, default: &'a str) -> &'a str {
        self.source.property(key).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, PropertyError> {
        parse_bool(key, self.get_string(key)?)
    }

    pub fn get_opt_bool(&self, key: &str, default: bool) -> Result<bool, PropertyError> {
        match self.source.property(key) {
            Some(value) => parse_bool(key, value),
            None => Ok(default),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i32, PropertyError> {
        let value = self.get_string(key)?;
        value.trim().parse().map_err(|_| PropertyError::InvalidInt {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }

    pub fn get_opt_int(&self, key: &str, default: i32) -> Result<i32, PropertyError> {
        match self.source.property(key) {
            Some(_) => self.get_int(key),
            None => Ok(default),
        }
    }

    pub fn get_long(&self, key: &str) -> Result<i64, PropertyError> {
        let value = self.get_string(key)?;
        value.trim().parse().map_err(|_| PropertyError::InvalidLong {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }

    pub fn get_opt_long(&self, key: &str, default: i64) -> Result<i64, PropertyError> {
        match self.source.property(key) {
            Some(_) => self.get_long(key),
            None => Ok(default),
        }
    }

    /// Returns the value when it case-insensitively equals one of `allowed`.
    pub fn get_enum_string(&self, key: &str, allowed: &[&str]) -> Result<&'a str, PropertyError> {
        let value = self.get_string(key)?;
        if allowed
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(value))
        {
            Ok(value)
        } else {
            Err(PropertyError::InvalidEnum {
                key: key.to_owned(),
                value: value.to_owned(),
            })
        }
    }

    pub fn get_opt_enum_string(
        &self,
        key: &str,
        allowed: &[&str],
        default: &'a str,
    ) -> Result<&'a str, PropertyError> {
        match self.source.property(key) {
            Some(_) => self.get_enum_string(key, allowed),
            None => Ok(default),
        }
    }
}

const BLANK: [char; 3] = [' ', '\t', '\u{c}'];

fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for natural in text.lines() {
        let natural = natural.trim_start_matches(BLANK);
        let mut line = match pending.take() {
            Some(mut joined) => {
                joined.push_str(natural);
                joined
            }
            None if natural.is_empty() || natural.starts_with(['#', '!']) => continue,
            None => natural.to_owned(),
        };

        if continues(&line) {
            line.pop();
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }

    lines.extend(pending);
    lines
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&ch| ch == '\\').count() % 2 == 1
}

/// Splits a logical line into its raw key and raw value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (index, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                return (&line[..index], line[index + 1..].trim_start_matches(BLANK));
            }
            ch if BLANK.contains(&ch) => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(BLANK);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (&line[..key_end], rest.trim_start_matches(BLANK))
}

/// Resolves escapes. A malformed `\u` escape is kept as written.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32);
                match decoded {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn missing(key: &str) -> PropertyError {
    PropertyError::Missing {
        key: key.to_owned(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, PropertyError> {
    let word = value.trim();
    if word.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if word.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(PropertyError::InvalidBoolean {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "properties_test.rs"]
mod properties_test;
