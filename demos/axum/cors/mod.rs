use std::sync::Arc;

use picketlink_rs::jose::{JweEncrypter, Jwk, KEY_TYPE_RSA};
use picketlink_rs::{Cors, Properties};
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

const DEMO_KEY_ID: &str = "demo-2048";

const CORS_PROPERTIES: &str = "
cors.allowOrigin = http://api.example.com
cors.allowSubdomains = true
cors.supportedMethods = GET, POST, OPTIONS
cors.supportedHeaders = Content-Type, X-Requested-With, X-Example-Trace
cors.exposedHeaders = X-Example-Trace
cors.supportsCredentials = true
cors.maxAge = 600
cors.tagRequests = true
";

pub type SharedCors = Arc<Cors>;

#[derive(Clone)]
pub struct AppState {
    pub cors: SharedCors,
    pub encrypter: Arc<JweEncrypter>,
    pub public_jwk: Arc<Jwk>,
    pub key_id: &'static str,
    pub greeting: &'static str,
}

pub fn build_state() -> Result<AppState, Box<dyn std::error::Error>> {
    let cors = Arc::new(Cors::from_properties(&Properties::parse(CORS_PROPERTIES))?);

    let private_key = RsaPrivateKey::new(&mut OsRng, 2048)?;
    let public_key = RsaPublicKey::from(&private_key);
    let public_jwk = Arc::new(
        Jwk::builder()
            .key_type(KEY_TYPE_RSA)
            .key_use("enc")
            .key_id(DEMO_KEY_ID)
            .modulus(public_key.n())
            .public_exponent(public_key.e())
            .build(),
    );
    let encrypter = Arc::new(JweEncrypter::new(public_key));

    Ok(AppState {
        cors,
        encrypter,
        public_jwk,
        key_id: DEMO_KEY_ID,
        greeting: "Welcome to the Axum CORS example!",
    })
}

pub mod middleware;
