pub(crate) mod aes_cbc;
pub(crate) mod aes_gcm;
pub(crate) mod concat_kdf;
pub(crate) mod deflate;
pub(crate) mod key_wrap;

use super::error::JoseError;
use hmac::{Hmac, Mac};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

/// Ciphertext together with its authentication tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCipherText {
    pub cipher_text: Vec<u8>,
    pub authentication_tag: Vec<u8>,
}

pub(crate) fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MacAlgorithm {
    HS256,
    HS384,
    HS512,
}

impl MacAlgorithm {
    /// HMAC over the concatenation of `parts`.
    pub(crate) fn compute(&self, key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, JoseError> {
        match self {
            Self::HS256 => mac::<Hmac<Sha256>>(key, parts),
            Self::HS384 => mac::<Hmac<Sha384>>(key, parts),
            Self::HS512 => mac::<Hmac<Sha512>>(key, parts),
        }
    }
}

fn mac<M: Mac + hmac::digest::KeyInit>(key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, JoseError> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|_| JoseError::Encryption("invalid HMAC key".into()))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}

pub(crate) fn constant_time_eq(expected: &[u8], actual: &[u8]) -> bool {
    expected.len() == actual.len() && bool::from(expected.ct_eq(actual))
}
