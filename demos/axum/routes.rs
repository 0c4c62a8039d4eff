use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{Html, IntoResponse, Response},
};
use picketlink_rs::jose::{ContentEncryption, JweHeader, JwkSet, KeyManagementAlgorithm};
use serde::Serialize;

use crate::cors::AppState;

#[derive(Serialize)]
struct TokenResponse {
    token: String,
    enc: &'static str,
}

pub async fn greet(State(state): State<AppState>) -> impl IntoResponse {
    Html(format!(
        "<h1>{}</h1><p>Try calling this endpoint from your frontend to see CORS in action.</p>",
        state.greeting
    ))
}

/// Encrypts the request body for the demo key and returns the compact JWE.
pub async fn issue_token(State(state): State<AppState>, body: Bytes) -> Response {
    let enc = ContentEncryption::A128CbcHs256;
    let header = JweHeader::builder()
        .algorithm(KeyManagementAlgorithm::RsaOaep256)
        .encryption(enc)
        .key_id(state.key_id)
        .build();

    match state.encrypter.encrypt(&header, &body) {
        Ok(token) => Json(TokenResponse {
            token,
            enc: enc.name(),
        })
        .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

/// Publishes the demo encryption key as a JWK set.
pub async fn jwks(State(state): State<AppState>) -> Response {
    let set = JwkSet::new(vec![state.public_jwk.as_ref().clone()]);
    match set.to_json() {
        Ok(json) => ([(CONTENT_TYPE, "application/jwk-set+json")], json).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}
