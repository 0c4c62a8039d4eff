use super::random_bytes;
use crate::jose::algorithm::KeyManagementAlgorithm;
use crate::jose::error::JoseError;
use rand::rngs::OsRng;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::Sha256;
use tracing::debug;

/// Encrypts the CEK to the recipient's public key.
pub(crate) fn wrap(
    alg: KeyManagementAlgorithm,
    public_key: &RsaPublicKey,
    cek: &[u8],
) -> Result<Vec<u8>, JoseError> {
    let mut rng = OsRng;
    let wrapped = match alg {
        KeyManagementAlgorithm::Rsa1_5 => public_key.encrypt(&mut rng, Pkcs1v15Encrypt, cek),
        KeyManagementAlgorithm::RsaOaep => public_key.encrypt(&mut rng, Oaep::new::<Sha1>(), cek),
        KeyManagementAlgorithm::RsaOaep256 => {
            public_key.encrypt(&mut rng, Oaep::new::<Sha256>(), cek)
        }
    };
    wrapped.map_err(|e| JoseError::KeyWrap(e.to_string()))
}

/// Recovers a CEK of `cek_len` bytes.
///
/// For `RSA1_5` any failure, including a CEK of the wrong size, yields a
/// random CEK instead of an error (RFC 7516 §11.5). The mismatch then
/// surfaces as an integrity failure during content decryption.
pub(crate) fn unwrap(
    alg: KeyManagementAlgorithm,
    private_key: &RsaPrivateKey,
    encrypted_key: &[u8],
    cek_len: usize,
) -> Result<Vec<u8>, JoseError> {
    let cek = match alg {
        KeyManagementAlgorithm::Rsa1_5 => {
            return Ok(match private_key.decrypt(Pkcs1v15Encrypt, encrypted_key) {
                Ok(cek) if cek.len() == cek_len => cek,
                _ => {
                    debug!("RSA1_5 key unwrap failed, substituting random CEK");
                    random_bytes(cek_len)
                }
            });
        }
        KeyManagementAlgorithm::RsaOaep => {
            private_key.decrypt(Oaep::new::<Sha1>(), encrypted_key)
        }
        KeyManagementAlgorithm::RsaOaep256 => {
            private_key.decrypt(Oaep::new::<Sha256>(), encrypted_key)
        }
    }
    .map_err(|e| {
        debug!(%alg, "RSA-OAEP key unwrap failed");
        JoseError::KeyUnwrap(e.to_string())
    })?;

    if cek.len() != cek_len {
        return Err(JoseError::InvalidKeyLength {
            expected: cek_len,
            actual: cek.len(),
        });
    }
    Ok(cek)
}

#[cfg(test)]
#[path = "key_wrap_test.rs"]
mod key_wrap_test;
