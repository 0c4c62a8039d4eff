use crate::constants::tag;
use crate::headers::{Headers, merge_response_headers};
use crate::request_type::CorsRequestType;
use thiserror::Error;

const RESPONSE_MESSAGE_PREFIX: &str = "Cross-Origin Resource Sharing (CORS) Filter: ";

/// Request attributes recorded when `cors.tagRequests` is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTags {
    pub is_cors_request: bool,
    pub origin: Option<String>,
    pub request_type: CorsRequestType,
    /// Raw `Access-Control-Request-Headers`, recorded for preflights only.
    pub request_headers: Option<String>,
}

impl RequestTags {
    /// Flattens the tags into `(attribute name, value)` pairs.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![(tag::IS_CORS_REQUEST, self.is_cors_request.to_string())];
        if !self.is_cors_request {
            return attributes;
        }

        if let Some(origin) = &self.origin {
            attributes.push((tag::REQUEST_ORIGIN, origin.clone()));
        }
        attributes.push((tag::REQUEST_TYPE, self.request_type.as_str().to_owned()));
        if let Some(headers) = &self.request_headers {
            attributes.push((tag::REQUEST_HEADERS, headers.clone()));
        }
        attributes
    }
}

/// Headers and response metadata emitted for an accepted CORS request.
#[derive(Debug, Clone)]
pub struct CorsResult {
    pub headers: Headers,
    pub status: Option<u16>,
    pub end_response: bool,
    pub tags: Option<RequestTags>,
}

impl CorsResult {
    /// Adds the CORS headers to a downstream response, extending any
    /// `Vary` it already carries.
    pub fn apply_to(&self, response: &mut Headers) {
        merge_response_headers(response, &self.headers);
    }
}

/// Overall decision returned by the filter.
#[derive(Debug, Clone)]
pub enum CorsDecision {
    /// Answer directly with [`CorsResult::status`]; do not forward.
    Preflight(CorsResult),
    /// Forward downstream and add the headers to its response.
    Actual(CorsResult),
    /// Not a CORS request; forward untouched.
    Generic { tags: Option<RequestTags> },
}

/// Errors that can be produced during CORS evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorsError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("CORS origin denied: {origin}")]
    OriginDenied { origin: String },
    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },
    #[error("Unsupported HTTP request header: {header}")]
    UnsupportedHeader { header: String },
}

impl CorsError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::OriginDenied { .. } | Self::UnsupportedHeader { .. } => 403,
            Self::UnsupportedMethod { .. } => 405,
        }
    }

    /// Body text for the error response. Omits request-derived values.
    pub fn response_message(&self) -> String {
        let detail = match self {
            Self::InvalidRequest(message) => message.as_str(),
            Self::OriginDenied { .. } => "CORS origin denied",
            Self::UnsupportedMethod { .. } => "Unsupported HTTP method",
            Self::UnsupportedHeader { .. } => "Unsupported HTTP request header",
        };
        format!("{RESPONSE_MESSAGE_PREFIX}{detail}")
    }
}

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;
