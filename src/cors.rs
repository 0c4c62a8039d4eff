use crate::config::{ConfigError, CorsConfig};
use crate::context::RequestContext;
use crate::handler::CorsRequestHandler;
use crate::properties::PropertySource;
use crate::request_type::CorsRequestType;
use crate::result::{CorsDecision, CorsError, CorsResult, RequestTags};
use tracing::trace;

const PREFLIGHT_SUCCESS_STATUS: u16 = 200;

/// CORS filter: classifies each request and applies the configured policy.
pub struct Cors {
    handler: CorsRequestHandler,
}

impl Cors {
    pub fn new(config: CorsConfig) -> Self {
        Self {
            handler: CorsRequestHandler::new(config),
        }
    }

    pub fn from_properties<P>(properties: &P) -> Result<Self, ConfigError>
    where
        P: PropertySource + ?Sized,
    {
        Ok(Self::new(CorsConfig::from_properties(properties)?))
    }

    pub fn config(&self) -> &CorsConfig {
        self.handler.config()
    }

    pub fn handler(&self) -> &CorsRequestHandler {
        &self.handler
    }

    pub fn check(&self, request: &RequestContext<'_>) -> Result<CorsDecision, CorsError> {
        let request_type = CorsRequestType::detect(request);
        trace!(%request_type, method = request.method, "classified request");

        match request_type {
            CorsRequestType::Actual => {
                let headers = self.handler.handle_actual_request(request)?;
                Ok(CorsDecision::Actual(CorsResult {
                    headers,
                    status: None,
                    end_response: false,
                    tags: self.tags(request, request_type),
                }))
            }
            CorsRequestType::Preflight => {
                let headers = self.handler.handle_preflight_request(request)?;
                Ok(CorsDecision::Preflight(CorsResult {
                    headers,
                    status: Some(PREFLIGHT_SUCCESS_STATUS),
                    end_response: true,
                    tags: self.tags(request, request_type),
                }))
            }
            CorsRequestType::Other => {
                if !self.config().allow_generic_http_requests {
                    return Err(CorsError::InvalidRequest(
                        "Generic HTTP requests not allowed".into(),
                    ));
                }
                Ok(CorsDecision::Generic {
                    tags: self.tags(request, request_type),
                })
            }
        }
    }

    fn tags(
        &self,
        request: &RequestContext<'_>,
        request_type: CorsRequestType,
    ) -> Option<RequestTags> {
        if !self.config().tag_requests {
            return None;
        }

        let is_cors_request = request_type.is_cors();
        Some(RequestTags {
            is_cors_request,
            origin: is_cors_request
                .then(|| request.origin.map(str::to_owned))
                .flatten(),
            request_type,
            request_headers: match request_type {
                CorsRequestType::Preflight => {
                    request.access_control_request_headers.map(str::to_owned)
                }
                _ => None,
            },
        })
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
