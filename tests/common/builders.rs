#![allow(dead_code)]

use picketlink_rs::constants::{method, property};
use picketlink_rs::{Cors, CorsDecision, CorsError, Properties, RequestContext};

pub const SERVER_SCHEME: &str = "https";
pub const SERVER_HOST: &str = "api.server.test";

/// Builds a [`Cors`] filter from `cors.*` properties.
#[derive(Default)]
pub struct CorsBuilder {
    properties: Properties,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties.set(key, value.into());
        self
    }

    pub fn allow_origin(self, origins: &str) -> Self {
        self.property(property::ALLOW_ORIGIN, origins)
    }

    pub fn allow_subdomains(self, enabled: bool) -> Self {
        self.property(property::ALLOW_SUBDOMAINS, enabled.to_string())
    }

    pub fn allow_generic_http_requests(self, enabled: bool) -> Self {
        self.property(property::ALLOW_GENERIC_HTTP_REQUESTS, enabled.to_string())
    }

    pub fn supported_methods(self, methods: &str) -> Self {
        self.property(property::SUPPORTED_METHODS, methods)
    }

    pub fn supported_headers(self, headers: &str) -> Self {
        self.property(property::SUPPORTED_HEADERS, headers)
    }

    pub fn exposed_headers(self, headers: &str) -> Self {
        self.property(property::EXPOSED_HEADERS, headers)
    }

    pub fn credentials(self, enabled: bool) -> Self {
        self.property(property::SUPPORTS_CREDENTIALS, enabled.to_string())
    }

    pub fn max_age(self, seconds: i32) -> Self {
        self.property(property::MAX_AGE, seconds.to_string())
    }

    pub fn tag_requests(self, enabled: bool) -> Self {
        self.property(property::TAG_REQUESTS, enabled.to_string())
    }

    pub fn build(self) -> Cors {
        Cors::from_properties(&self.properties).expect("valid CORS configuration")
    }
}

pub struct ActualRequestBuilder {
    method: String,
    origin: Option<String>,
    host: Option<String>,
}

impl ActualRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.into(),
            origin: None,
            host: Some(SERVER_HOST.into()),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn try_check(self, cors: &Cors) -> Result<CorsDecision, CorsError> {
        let ctx = RequestContext {
            method: &self.method,
            scheme: SERVER_SCHEME,
            host: self.host.as_deref(),
            origin: self.origin.as_deref(),
            access_control_request_method: None,
            access_control_request_headers: None,
        };
        cors.check(&ctx)
    }

    pub fn check(self, cors: &Cors) -> CorsDecision {
        self.try_check(cors)
            .expect("actual request evaluation should succeed")
    }
}

#[derive(Default)]
pub struct PreflightRequestBuilder {
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn try_check(self, cors: &Cors) -> Result<CorsDecision, CorsError> {
        let ctx = RequestContext {
            method: method::OPTIONS,
            scheme: SERVER_SCHEME,
            host: Some(SERVER_HOST),
            origin: self.origin.as_deref(),
            access_control_request_method: self.request_method.as_deref(),
            access_control_request_headers: self.request_headers.as_deref(),
        };
        cors.check(&ctx)
    }

    pub fn check(self, cors: &Cors) -> CorsDecision {
        self.try_check(cors)
            .expect("preflight request evaluation should succeed")
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub fn actual_request() -> ActualRequestBuilder {
    ActualRequestBuilder::new()
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::new()
}
