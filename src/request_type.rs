use crate::constants::method;
use crate::context::RequestContext;
use std::fmt;

/// Classification of an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorsRequestType {
    /// A simple or actual cross-origin request.
    Actual,
    /// An `OPTIONS` request asking for permission ahead of an actual request.
    Preflight,
    /// A same-origin or otherwise non-CORS request.
    Other,
}

impl CorsRequestType {
    pub fn detect(request: &RequestContext<'_>) -> Self {
        let Some(origin) = request.origin else {
            return Self::Other;
        };

        if let Some(host) = request.host
            && is_same_origin(request.scheme, host, origin)
        {
            return Self::Other;
        }

        if request.method.eq_ignore_ascii_case(method::OPTIONS)
            && request.access_control_request_method.is_some()
        {
            return Self::Preflight;
        }

        Self::Actual
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actual => "actual",
            Self::Preflight => "preflight",
            Self::Other => "other",
        }
    }

    pub fn is_cors(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for CorsRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_same_origin(scheme: &str, host: &str, origin: &str) -> bool {
    origin
        .strip_prefix(scheme)
        .and_then(|rest| rest.strip_prefix("://"))
        .is_some_and(|rest| rest == host)
}

#[cfg(test)]
#[path = "request_type_test.rs"]
mod request_type_test;
