use super::algorithm::{CompressionAlgorithm, EncryptionFamily};
use super::compact::JweParts;
use super::crypto::{aes_cbc, aes_gcm, concat_kdf, constant_time_eq, deflate, key_wrap};
use super::error::JoseError;
use rsa::RsaPrivateKey;
use std::fmt;
use tracing::debug;

/// Decrypts compact JWEs addressed to an RSA private key.
#[derive(Clone)]
pub struct JweDecrypter {
    private_key: RsaPrivateKey,
}

impl fmt::Debug for JweDecrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JweDecrypter").finish_non_exhaustive()
    }
}

impl JweDecrypter {
    pub fn new(private_key: RsaPrivateKey) -> Self {
        Self { private_key }
    }

    pub fn decrypt(&self, compact: &str) -> Result<Vec<u8>, JoseError> {
        self.decrypt_parts(&JweParts::parse(compact)?)
    }

    pub fn decrypt_parts(&self, parts: &JweParts) -> Result<Vec<u8>, JoseError> {
        let header = parts.header()?;

        let critical = header.critical();
        if !critical.is_empty() {
            return Err(JoseError::UnsupportedCritical(critical.join(", ")));
        }

        let alg = header.algorithm()?;
        let enc = header.encryption()?;
        let compression = header.compression()?;
        let cek_len = header.cek_length()?;

        let encrypted_key = parts.encrypted_key()?;
        let iv = parts.iv()?;
        let ciphertext = parts.ciphertext()?;
        let tag = parts.tag()?;
        let aad = parts.encoded_header().as_bytes();

        let cek = key_wrap::unwrap(alg, &self.private_key, &encrypted_key, cek_len)?;

        let payload = match enc.family() {
            EncryptionFamily::CbcHmac => {
                aes_cbc::decrypt_authenticated(&cek, &iv, &ciphertext, aad, &tag)?
            }
            EncryptionFamily::Gcm => aes_gcm::decrypt(&cek, &iv, &ciphertext, aad, &tag)?,
            EncryptionFamily::ConcatKdf => {
                let keys = concat_kdf::derive_from_header(&header, &cek)?;
                let expected_tag = keys
                    .mac
                    .compute(&keys.cik, &[parts.signing_input().as_bytes()])?;
                let tag_matches = constant_time_eq(&expected_tag, &tag);
                let plaintext = aes_cbc::decrypt(&keys.cek, &iv, &ciphertext);
                if !tag_matches {
                    debug!(%enc, "JWE integrity check failed");
                    return Err(JoseError::IntegrityFailure);
                }
                plaintext?
            }
        };

        match compression {
            Some(CompressionAlgorithm::Deflate) => deflate::decompress(&payload),
            None => Ok(payload),
        }
    }
}

#[cfg(test)]
#[path = "decrypter_test.rs"]
mod decrypter_test;
