use super::algorithm::{CompressionAlgorithm, EncryptionFamily};
use super::compact::JweParts;
use super::crypto::{aes_cbc, aes_gcm, concat_kdf, deflate, key_wrap, random_bytes};
use super::error::JoseError;
use super::header::JweHeader;
use rsa::RsaPublicKey;

/// Encrypts payloads to an RSA public key.
#[derive(Debug, Clone)]
pub struct JweEncrypter {
    public_key: RsaPublicKey,
}

impl JweEncrypter {
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self { public_key }
    }

    /// Encrypts `plaintext` under a freshly generated CEK and returns the
    /// compact serialization.
    pub fn encrypt(&self, header: &JweHeader, plaintext: &[u8]) -> Result<String, JoseError> {
        let cek = random_bytes(header.cek_length()?);
        self.encrypt_with_key(header, plaintext, &cek, None)
    }

    /// Like [`Self::encrypt`] but with a caller-supplied CEK and, optionally,
    /// IV. A random IV is used when `iv` is `None`.
    pub fn encrypt_with_key(
        &self,
        header: &JweHeader,
        plaintext: &[u8],
        cek: &[u8],
        iv: Option<&[u8]>,
    ) -> Result<String, JoseError> {
        let alg = header.algorithm()?;
        let enc = header.encryption()?;
        let cek_len = header.cek_length()?;
        if cek.len() != cek_len {
            return Err(JoseError::InvalidKeyLength {
                expected: cek_len,
                actual: cek.len(),
            });
        }

        let encrypted_key = key_wrap::wrap(alg, &self.public_key, cek)?;

        let payload = match header.compression()? {
            Some(CompressionAlgorithm::Deflate) => deflate::compress(plaintext)?,
            None => plaintext.to_vec(),
        };

        let encoded_header = header.encode()?;
        let aad = encoded_header.as_bytes();

        let parts = match enc.family() {
            EncryptionFamily::CbcHmac => {
                let iv = iv_or_random(iv, aes_cbc::IV_LENGTH);
                let sealed = aes_cbc::encrypt_authenticated(cek, &iv, &payload, aad)?;
                JweParts::from_raw(
                    encoded_header.as_str(),
                    &encrypted_key,
                    &iv,
                    &sealed.cipher_text,
                    &sealed.authentication_tag,
                )
            }
            EncryptionFamily::Gcm => {
                let iv = iv_or_random(iv, aes_gcm::IV_LENGTH);
                let sealed = aes_gcm::encrypt(cek, &iv, &payload, aad)?;
                JweParts::from_raw(
                    encoded_header.as_str(),
                    &encrypted_key,
                    &iv,
                    &sealed.cipher_text,
                    &sealed.authentication_tag,
                )
            }
            EncryptionFamily::ConcatKdf => {
                let iv = iv_or_random(iv, aes_cbc::IV_LENGTH);
                let keys = concat_kdf::derive_from_header(header, cek)?;
                let cipher_text = aes_cbc::encrypt(&keys.cek, &iv, &payload)?;
                let unsigned = JweParts::from_raw(
                    encoded_header.as_str(),
                    &encrypted_key,
                    &iv,
                    &cipher_text,
                    &[],
                );
                let tag = keys
                    .mac
                    .compute(&keys.cik, &[unsigned.signing_input().as_bytes()])?;
                JweParts::from_raw(encoded_header, &encrypted_key, &iv, &cipher_text, &tag)
            }
        };

        Ok(parts.to_string())
    }
}

fn iv_or_random(iv: Option<&[u8]>, len: usize) -> Vec<u8> {
    match iv {
        Some(iv) => iv.to_vec(),
        None => random_bytes(len),
    }
}

#[cfg(test)]
#[path = "encrypter_test.rs"]
mod encrypter_test;
