use thiserror::Error;

/// Errors raised while building, encrypting or decrypting a JWE.
#[derive(Debug, Error)]
pub enum JoseError {
    #[error("invalid JWE compact serialization: {0}")]
    InvalidSerialization(String),
    #[error("invalid JWE header: {0}")]
    InvalidHeader(String),
    #[error("missing JWE header parameter: {0}")]
    MissingHeader(&'static str),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("unsupported critical header parameters: {0}")]
    UnsupportedCritical(String),
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
    #[error("CEK bit length {bits} is not valid for {enc}")]
    UnsupportedKeyLength { enc: String, bits: u64 },
    #[error("invalid JWK: {0}")]
    InvalidKey(String),
    #[error("invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },
    #[error("key wrapping failed: {0}")]
    KeyWrap(String),
    #[error("key unwrapping failed: {0}")]
    KeyUnwrap(String),
    #[error("encryption failed: {0}")]
    Encryption(String),
    #[error("decryption failed: {0}")]
    Decryption(String),
    #[error("integrity check failed")]
    IntegrityFailure,
    #[error("compression failed: {0}")]
    Compression(String),
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
