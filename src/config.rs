use crate::constants::{method, property};
use crate::header_name::format_canonical;
use crate::origin::{Origin, ValidatedOrigin};
use crate::properties::{PropertyError, PropertyRetriever, PropertySource};
use crate::util::parse_words;
use indexmap::IndexSet;
use thiserror::Error;

pub const DEFAULT_SUPPORTED_METHODS: [&str; 4] =
    [method::GET, method::POST, method::HEAD, method::OPTIONS];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error("bad origin URL in property {key}: {value}")]
    BadOrigin { key: &'static str, value: String },
    #[error("bad header field name in property {key}: {value}")]
    BadHeaderName { key: &'static str, value: String },
}

/// Cross-origin access policy. Treat as immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Lets non-CORS requests through. When false only valid, accepted CORS
    /// requests pass.
    pub allow_generic_http_requests: bool,
    /// Accept requests from any origin, ignoring [`Self::allowed_origins`].
    pub allow_any_origin: bool,
    pub allowed_origins: IndexSet<ValidatedOrigin>,
    /// Also accept subdomains of the allowed origins,
    /// e.g. `http://foo.example.com` for `http://example.com`.
    pub allow_subdomains: bool,
    /// Upper-case method names.
    pub supported_methods: IndexSet<String>,
    pub support_any_header: bool,
    /// Canonical header names. Consulted only when
    /// [`Self::support_any_header`] is false.
    pub supported_headers: IndexSet<String>,
    pub exposed_headers: IndexSet<String>,
    pub supports_credentials: bool,
    /// Preflight cache lifetime in seconds; `-1` when unspecified.
    pub max_age: i32,
    pub tag_requests: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_generic_http_requests: true,
            allow_any_origin: true,
            allowed_origins: IndexSet::new(),
            allow_subdomains: false,
            supported_methods: DEFAULT_SUPPORTED_METHODS
                .iter()
                .map(|method| method.to_string())
                .collect(),
            support_any_header: true,
            supported_headers: IndexSet::new(),
            exposed_headers: IndexSet::new(),
            supports_credentials: true,
            max_age: -1,
            tag_requests: false,
        }
    }
}

impl CorsConfig {
    /// Builds a configuration from `cors.*` properties, falling back to the
    /// defaults for missing keys.
    pub fn from_properties<P>(properties: &P) -> Result<Self, ConfigError>
    where
        P: PropertySource + ?Sized,
    {
        let pr = PropertyRetriever::new(properties);

        let allow_generic_http_requests =
            pr.get_opt_bool(property::ALLOW_GENERIC_HTTP_REQUESTS, true)?;

        let origin_spec = pr.get_opt_string(property::ALLOW_ORIGIN, "*").trim();
        let allow_any_origin = origin_spec == "*";
        let mut allowed_origins = IndexSet::new();
        if !allow_any_origin {
            for url in parse_words(origin_spec) {
                let validated =
                    Origin::new(url.as_str())
                        .validate()
                        .map_err(|_| ConfigError::BadOrigin {
                            key: property::ALLOW_ORIGIN,
                            value: url.clone(),
                        })?;
                allowed_origins.insert(validated);
            }
        }

        let allow_subdomains = pr.get_opt_bool(property::ALLOW_SUBDOMAINS, false)?;

        let method_spec = pr
            .get_opt_string(property::SUPPORTED_METHODS, "GET, POST, HEAD, OPTIONS")
            .trim()
            .to_ascii_uppercase();
        let supported_methods = parse_words(&method_spec).into_iter().collect();

        // An empty value means "no supported headers", so only a missing key
        // falls back to the wildcard.
        let header_spec = pr.get_opt_string(property::SUPPORTED_HEADERS, "*").trim();
        let support_any_header = header_spec == "*";
        let supported_headers = if support_any_header {
            IndexSet::new()
        } else {
            canonical_headers(property::SUPPORTED_HEADERS, header_spec)?
        };

        let exposed_headers = canonical_headers(
            property::EXPOSED_HEADERS,
            pr.get_opt_string(property::EXPOSED_HEADERS, ""),
        )?;

        let supports_credentials = pr.get_opt_bool(property::SUPPORTS_CREDENTIALS, true)?;
        let max_age = pr.get_opt_int(property::MAX_AGE, -1)?;
        let tag_requests = pr.get_opt_bool(property::TAG_REQUESTS, false)?;

        Ok(Self {
            allow_generic_http_requests,
            allow_any_origin,
            allowed_origins,
            allow_subdomains,
            supported_methods,
            support_any_header,
            supported_headers,
            exposed_headers,
            supports_credentials,
            max_age,
            tag_requests,
        })
    }

    pub fn is_allowed_origin(&self, origin: Option<&Origin>) -> bool {
        if self.allow_any_origin {
            return true;
        }

        let Some(origin) = origin else {
            return false;
        };

        if self.allowed_origins.contains(origin.as_str()) {
            true
        } else if self.allow_subdomains {
            self.is_allowed_subdomain_origin(origin)
        } else {
            false
        }
    }

    /// Checks whether `origin` is a subdomain origin of one of the allowed
    /// origins: same scheme, and a host (plus port) ending in
    /// `.` + the allowed host (plus port).
    ///
    /// `https://foo.example.com` matches `https://example.com` but not
    /// `http://example.com`.
    pub fn is_allowed_subdomain_origin(&self, origin: &Origin) -> bool {
        let Ok(validated) = origin.validate() else {
            return false;
        };

        self.allowed_origins
            .iter()
            .any(|allowed| validated.is_subdomain_of(allowed))
    }

    pub fn is_supported_method(&self, method: &str) -> bool {
        self.supported_methods.contains(method)
    }

    /// `header` must already be in canonical form.
    pub fn is_supported_header(&self, header: &str) -> bool {
        self.support_any_header || self.supported_headers.contains(header)
    }
}

fn canonical_headers(key: &'static str, spec: &str) -> Result<IndexSet<String>, ConfigError> {
    parse_words(spec)
        .into_iter()
        .map(|header| {
            format_canonical(&header).map_err(|_| ConfigError::BadHeaderName {
                key,
                value: header.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
