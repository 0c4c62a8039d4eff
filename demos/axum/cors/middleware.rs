use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::VARY},
    middleware::Next,
    response::Response,
};
use picketlink_rs::{
    CorsDecision, CorsError, CorsResult, Headers, RequestContext, RequestTags, constants::header,
    merge_vary,
};

use super::{AppState, SharedCors};

pub async fn cors_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cors: SharedCors = state.cors.clone();

    let owned_ctx = OwnedRequestContext::from_request(&request);
    let context = owned_ctx.as_request_context();

    match cors.check(&context) {
        Ok(CorsDecision::Preflight(result)) => preflight_response(result),
        Ok(CorsDecision::Actual(result)) => {
            attach_tags(&mut request, result.tags);
            let mut response = next.run(request).await;
            apply_headers(response.headers_mut(), &result.headers);
            response
        }
        Ok(CorsDecision::Generic { tags }) => {
            attach_tags(&mut request, tags);
            next.run(request).await
        }
        Err(err) => rejection_response(err),
    }
}

fn preflight_response(result: CorsResult) -> Response {
    let status = result
        .status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;

    apply_headers(response.headers_mut(), &result.headers);
    response
}

fn rejection_response(err: CorsError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::FORBIDDEN);
    let mut response = Response::new(Body::from(err.response_message()));
    *response.status_mut() = status;
    response
}

/// Copies CORS headers onto the response; `Vary` extends what the route set.
fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers.iter() {
        let Ok(header_name) = HeaderName::try_from(name.as_str()) else {
            continue;
        };
        let value = if header_name == VARY {
            let existing = map.get(&VARY).and_then(|present| present.to_str().ok());
            merge_vary(existing, value)
        } else {
            value.clone()
        };
        if let Ok(header_value) = HeaderValue::from_str(&value) {
            map.insert(header_name, header_value);
        }
    }
}

/// Makes the tags available to handlers through request extensions.
fn attach_tags(request: &mut Request, tags: Option<RequestTags>) {
    if let Some(tags) = tags {
        request.extensions_mut().insert(tags);
    }
}

struct OwnedRequestContext {
    method: String,
    scheme: String,
    host: Option<String>,
    origin: Option<String>,
    access_control_request_method: Option<String>,
    access_control_request_headers: Option<String>,
}

impl OwnedRequestContext {
    fn from_request(request: &Request) -> Self {
        let headers = request.headers();

        Self {
            method: request.method().as_str().to_string(),
            scheme: request.uri().scheme_str().unwrap_or("http").to_string(),
            host: header_value(headers, header::HOST),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
        }
    }

    fn as_request_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            scheme: &self.scheme,
            host: self.host.as_deref(),
            origin: self.origin.as_deref(),
            access_control_request_method: self.access_control_request_method.as_deref(),
            access_control_request_headers: self.access_control_request_headers.as_deref(),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
