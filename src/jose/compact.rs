use super::error::JoseError;
use super::header::JweHeader;
use super::{b64_decode, b64_encode};
use std::fmt;
use std::str::FromStr;

const SEGMENT_COUNT: usize = 5;

/// The five base64url segments of a compact JWE:
/// `header.encrypted_key.iv.ciphertext.tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JweParts {
    header: String,
    encrypted_key: String,
    iv: String,
    ciphertext: String,
    tag: String,
}

impl JweParts {
    pub fn parse(compact: &str) -> Result<Self, JoseError> {
        let segments: Vec<&str> = compact.trim().split('.').collect();
        let [header, encrypted_key, iv, ciphertext, tag] = segments[..] else {
            return Err(JoseError::InvalidSerialization(format!(
                "expected {SEGMENT_COUNT} segments, found {}",
                segments.len()
            )));
        };

        if header.is_empty() {
            return Err(JoseError::InvalidSerialization(
                "missing header segment".into(),
            ));
        }

        Ok(Self {
            header: header.to_owned(),
            encrypted_key: encrypted_key.to_owned(),
            iv: iv.to_owned(),
            ciphertext: ciphertext.to_owned(),
            tag: tag.to_owned(),
        })
    }

    /// Assembles parts from an already encoded header and raw byte values.
    pub fn from_raw(
        encoded_header: impl Into<String>,
        encrypted_key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Self {
        Self {
            header: encoded_header.into(),
            encrypted_key: b64_encode(encrypted_key),
            iv: b64_encode(iv),
            ciphertext: b64_encode(ciphertext),
            tag: b64_encode(tag),
        }
    }

    /// The header segment exactly as transmitted. This is the AAD.
    pub fn encoded_header(&self) -> &str {
        &self.header
    }

    pub fn header(&self) -> Result<JweHeader, JoseError> {
        JweHeader::decode(&self.header)
    }

    pub fn encrypted_key(&self) -> Result<Vec<u8>, JoseError> {
        b64_decode(&self.encrypted_key)
    }

    pub fn iv(&self) -> Result<Vec<u8>, JoseError> {
        b64_decode(&self.iv)
    }

    pub fn ciphertext(&self) -> Result<Vec<u8>, JoseError> {
        b64_decode(&self.ciphertext)
    }

    pub fn tag(&self) -> Result<Vec<u8>, JoseError> {
        b64_decode(&self.tag)
    }

    /// `header.encrypted_key.iv.ciphertext`, the input the legacy
    /// Concat KDF algorithms authenticate.
    pub(crate) fn signing_input(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.header, self.encrypted_key, self.iv, self.ciphertext
        )
    }
}

impl fmt::Display for JweParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.signing_input(), self.tag)
    }
}

impl FromStr for JweParts {
    type Err = JoseError;

    fn from_str(compact: &str) -> Result<Self, Self::Err> {
        Self::parse(compact)
    }
}

#[cfg(test)]
#[path = "compact_test.rs"]
mod compact_test;
