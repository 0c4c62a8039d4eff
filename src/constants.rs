pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
    pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
    pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
    pub const HOST: &str = "Host";
    pub const ORIGIN: &str = "Origin";
    pub const VARY: &str = "Vary";
}

pub mod method {
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const HEAD: &str = "HEAD";
    pub const OPTIONS: &str = "OPTIONS";
    pub const PATCH: &str = "PATCH";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
}

/// Keys recognised by [`crate::CorsConfig::from_properties`].
pub mod property {
    pub const ALLOW_GENERIC_HTTP_REQUESTS: &str = "cors.allowGenericHttpRequests";
    pub const ALLOW_ORIGIN: &str = "cors.allowOrigin";
    pub const ALLOW_SUBDOMAINS: &str = "cors.allowSubdomains";
    pub const SUPPORTED_METHODS: &str = "cors.supportedMethods";
    pub const SUPPORTED_HEADERS: &str = "cors.supportedHeaders";
    pub const EXPOSED_HEADERS: &str = "cors.exposedHeaders";
    pub const SUPPORTS_CREDENTIALS: &str = "cors.supportsCredentials";
    pub const MAX_AGE: &str = "cors.maxAge";
    pub const TAG_REQUESTS: &str = "cors.tagRequests";
}

/// Request attribute names used when request tagging is enabled.
pub mod tag {
    pub const IS_CORS_REQUEST: &str = "cors.isCorsRequest";
    pub const REQUEST_ORIGIN: &str = "cors.request.origin";
    pub const REQUEST_TYPE: &str = "cors.request.type";
    pub const REQUEST_HEADERS: &str = "cors.request.headers";
}
