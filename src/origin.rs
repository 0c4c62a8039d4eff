use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OriginError {
    #[error("bad origin URI {value}: {reason}")]
    BadUri { value: String, reason: String },
    #[error("bad origin URI {0}: missing host")]
    MissingHost(String),
}

/// An `Origin` header value exactly as the web client sent it.
///
/// Matching against the allow-list uses the raw string so that request
/// origins never need parsing on the fast path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin(String);

impl Origin {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the origin into scheme, host and port.
    pub fn validate(&self) -> Result<ValidatedOrigin, OriginError> {
        ValidatedOrigin::parse(self.clone())
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Origin {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Origin {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An origin that parsed as `scheme://host[:port]` per RFC 6454.
///
/// Scheme and host are lower-cased and internationalised host names are
/// converted to their ASCII form. Default ports of special schemes are
/// dropped by the URL parser, so `https://a.test:443` has suffix `a.test`.
///
/// Equality and hashing only consider the raw value.
#[derive(Debug, Clone)]
pub struct ValidatedOrigin {
    origin: Origin,
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl ValidatedOrigin {
    fn parse(origin: Origin) -> Result<Self, OriginError> {
        let url = Url::parse(origin.as_str()).map_err(|err| OriginError::BadUri {
            value: origin.to_string(),
            reason: err.to_string(),
        })?;

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| OriginError::MissingHost(origin.to_string()))?
            .to_ascii_lowercase();

        Ok(Self {
            scheme: url.scheme().to_ascii_lowercase(),
            port: url.port(),
            host,
            origin,
        })
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn as_str(&self) -> &str {
        self.origin.as_str()
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The host with the explicit port appended, e.g. `example.com:8080`.
    pub fn suffix(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// Returns true when `self` is a strict subdomain of `parent` on the same
    /// scheme and port.
    pub fn is_subdomain_of(&self, parent: &ValidatedOrigin) -> bool {
        self.scheme.eq_ignore_ascii_case(&parent.scheme)
            && self.suffix().ends_with(&format!(".{}", parent.suffix()))
    }
}

impl PartialEq for ValidatedOrigin {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
    }
}

impl Eq for ValidatedOrigin {}

impl Hash for ValidatedOrigin {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for ValidatedOrigin {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ValidatedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.origin.fmt(f)
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
