use crate::config::CorsConfig;
use crate::constants::header;
use crate::context::RequestContext;
use crate::header_name::format_canonical;
use crate::headers::{HeaderCollection, Headers};
use crate::origin::Origin;
use crate::request_type::CorsRequestType;
use crate::result::CorsError;
use crate::util::{parse_multiple_header_values, serialize};
use tracing::debug;

/// Produces the response headers for actual and preflight CORS requests
/// according to a [`CorsConfig`].
#[derive(Debug, Clone)]
pub struct CorsRequestHandler {
    config: CorsConfig,
    supported_methods: String,
    supported_headers: Option<String>,
    exposed_headers: Option<String>,
}

impl CorsRequestHandler {
    pub fn new(config: CorsConfig) -> Self {
        let supported_methods = serialize(&config.supported_methods, ", ");
        let supported_headers = (!config.support_any_header && !config.supported_headers.is_empty())
            .then(|| serialize(&config.supported_headers, ", "));
        let exposed_headers = (!config.exposed_headers.is_empty())
            .then(|| serialize(&config.exposed_headers, ", "));

        Self {
            config,
            supported_methods,
            supported_headers,
            exposed_headers,
        }
    }

    pub fn config(&self) -> &CorsConfig {
        &self.config
    }

    pub fn handle_actual_request(
        &self,
        request: &RequestContext<'_>,
    ) -> Result<Headers, CorsError> {
        let origin = match (CorsRequestType::detect(request), request.origin) {
            (CorsRequestType::Actual, Some(origin)) => Origin::new(origin),
            _ => {
                return Err(CorsError::InvalidRequest(
                    "Invalid simple/actual CORS request".into(),
                ));
            }
        };

        self.check_origin(&origin)?;

        let method = request.method.to_ascii_uppercase();
        if !self.config.is_supported_method(&method) {
            debug!(%origin, %method, "CORS actual request method not supported");
            return Err(CorsError::UnsupportedMethod { method });
        }

        let mut headers = HeaderCollection::with_capacity(4);
        self.push_origin_headers(&mut headers, &origin);
        if let Some(exposed) = &self.exposed_headers {
            headers.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS, exposed.as_str());
        }

        Ok(headers.into_headers())
    }

    pub fn handle_preflight_request(
        &self,
        request: &RequestContext<'_>,
    ) -> Result<Headers, CorsError> {
        let origin = match (CorsRequestType::detect(request), request.origin) {
            (CorsRequestType::Preflight, Some(origin)) => Origin::new(origin),
            _ => {
                return Err(CorsError::InvalidRequest(
                    "Invalid preflight CORS request".into(),
                ));
            }
        };

        self.check_origin(&origin)?;

        let Some(requested_method) = request.access_control_request_method else {
            return Err(CorsError::InvalidRequest(
                "Invalid preflight CORS request: Missing Access-Control-Request-Method header"
                    .into(),
            ));
        };
        let requested_method = requested_method.trim().to_ascii_uppercase();

        let raw_request_headers = request.access_control_request_headers;
        let mut requested_headers = Vec::new();
        for value in parse_multiple_header_values(raw_request_headers) {
            let canonical = format_canonical(&value).map_err(|_| {
                CorsError::InvalidRequest(
                    "Invalid preflight CORS request: Bad request header value".into(),
                )
            })?;
            requested_headers.push(canonical);
        }

        if !self.config.is_supported_method(&requested_method) {
            debug!(%origin, method = %requested_method, "CORS preflight method not supported");
            return Err(CorsError::UnsupportedMethod {
                method: requested_method,
            });
        }

        if !self.config.support_any_header
            && let Some(unsupported) = requested_headers
                .into_iter()
                .find(|name| !self.config.is_supported_header(name))
        {
            debug!(%origin, header = %unsupported, "CORS preflight header not supported");
            return Err(CorsError::UnsupportedHeader {
                header: unsupported,
            });
        }

        let mut headers = HeaderCollection::with_capacity(6);
        self.push_origin_headers(&mut headers, &origin);

        if self.config.max_age > 0 {
            headers.insert(
                header::ACCESS_CONTROL_MAX_AGE,
                self.config.max_age.to_string(),
            );
        }

        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.supported_methods.as_str(),
        );

        if self.config.support_any_header
            && let Some(raw) = raw_request_headers
        {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, raw);
        } else if let Some(supported) = &self.supported_headers {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, supported.as_str());
        }

        Ok(headers.into_headers())
    }

    fn check_origin(&self, origin: &Origin) -> Result<(), CorsError> {
        if self.config.is_allowed_origin(Some(origin)) {
            return Ok(());
        }

        debug!(%origin, "CORS origin denied");
        Err(CorsError::OriginDenied {
            origin: origin.to_string(),
        })
    }

    fn push_origin_headers(&self, headers: &mut HeaderCollection, origin: &Origin) {
        if self.config.supports_credentials {
            headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.as_str());
            headers.insert(header::VARY, header::ORIGIN);
        } else if self.config.allow_any_origin {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
        } else {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.as_str());
            headers.insert(header::VARY, header::ORIGIN);
        }
    }
}

#[cfg(test)]
#[path = "handler_test.rs"]
mod handler_test;
