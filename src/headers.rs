use crate::constants::header;
use indexmap::IndexMap;

/// Response headers in the order the handler emitted them.
pub type Headers = IndexMap<String, String>;

/// CORS response headers as the handler builds them; one value per name.
#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert<V: Into<String>>(&mut self, name: &str, value: V) {
        self.headers.insert(name.to_owned(), value.into());
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }
}

/// Adds CORS headers to the headers a downstream handler already produced.
///
/// Names match case-insensitively. `Vary` tokens are appended to the
/// downstream value with [`merge_vary`]; any other CORS header replaces the
/// downstream value and keeps its position.
pub fn merge_response_headers(response: &mut Headers, cors: &Headers) {
    for (name, value) in cors {
        let existing = response
            .iter()
            .position(|(present, _)| present.eq_ignore_ascii_case(name));

        match existing {
            Some(index) if name.eq_ignore_ascii_case(header::VARY) => {
                if let Some((_, present)) = response.get_index_mut(index) {
                    *present = merge_vary(Some(present.as_str()), value);
                }
            }
            Some(index) => {
                if let Some((_, present)) = response.get_index_mut(index) {
                    *present = value.clone();
                }
            }
            None => {
                response.insert(name.clone(), value.clone());
            }
        }
    }
}

/// Joins two `Vary` values into one list without case-insensitive
/// duplicates. A `*` on either side yields `*`.
pub fn merge_vary(existing: Option<&str>, added: &str) -> String {
    let mut tokens: Vec<&str> = Vec::new();
    for token in existing
        .into_iter()
        .chain(std::iter::once(added))
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
    {
        if token == "*" {
            return "*".to_owned();
        }
        if !tokens.iter().any(|seen| seen.eq_ignore_ascii_case(token)) {
            tokens.push(token);
        }
    }
    tokens.join(", ")
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
