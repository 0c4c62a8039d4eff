//! JSON Web Encryption (RFC 7516) with RSA key transport.
//!
//! [`JweEncrypter`] wraps a fresh content encryption key for an RSA public
//! key and produces the compact serialization; [`JweDecrypter`] reverses
//! the process with the matching private key.

mod algorithm;
mod compact;
mod crypto;
mod decrypter;
mod encrypter;
mod error;
mod header;
mod jwk;
#[cfg(test)]
mod test_keys;

pub use algorithm::{
    CompressionAlgorithm, ContentEncryption, EncryptionFamily, KeyManagementAlgorithm,
};
pub use compact::JweParts;
pub use crypto::AuthenticatedCipherText;
pub use decrypter::JweDecrypter;
pub use encrypter::JweEncrypter;
pub use error::JoseError;
pub use header::{JweHeader, JweHeaderBuilder, param};
pub use jwk::{Jwk, JwkBuilder, JwkSet, KEY_TYPE_RSA, jwk_param};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

pub(crate) fn b64_encode<T: AsRef<[u8]>>(input: T) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

pub(crate) fn b64_decode(input: &str) -> Result<Vec<u8>, JoseError> {
    Ok(URL_SAFE_NO_PAD.decode(input)?)
}
