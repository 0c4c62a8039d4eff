use super::error::JoseError;
use std::fmt;
use std::str::FromStr;

/// How the content encryption key is wrapped for the recipient (`alg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyManagementAlgorithm {
    /// RSAES-PKCS1-v1_5.
    Rsa1_5,
    /// RSAES-OAEP with SHA-1 and MGF1-SHA-1.
    RsaOaep,
    /// RSAES-OAEP with SHA-256 and MGF1-SHA-256.
    RsaOaep256,
}

impl KeyManagementAlgorithm {
    pub const ALL: [Self; 3] = [Self::Rsa1_5, Self::RsaOaep, Self::RsaOaep256];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rsa1_5 => "RSA1_5",
            Self::RsaOaep => "RSA-OAEP",
            Self::RsaOaep256 => "RSA-OAEP-256",
        }
    }
}

impl FromStr for KeyManagementAlgorithm {
    type Err = JoseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == name)
            .ok_or_else(|| JoseError::UnsupportedAlgorithm(name.to_owned()))
    }
}

impl fmt::Display for KeyManagementAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Content encryption modes grouped by how they use the CEK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionFamily {
    /// AES-CBC with HMAC-SHA-2 over a split key (RFC 7518 §5.2).
    CbcHmac,
    /// AES-GCM.
    Gcm,
    /// Pre-RFC AES-CBC with keys derived through Concat KDF.
    ConcatKdf,
}

/// Content encryption algorithm (`enc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentEncryption {
    A128CbcHs256,
    A192CbcHs384,
    A256CbcHs512,
    A128Gcm,
    A192Gcm,
    A256Gcm,
    /// Deprecated draft algorithm `A128CBC+HS256`.
    A128CbcPlusHs256,
    /// Deprecated draft algorithm `A256CBC+HS512`.
    A256CbcPlusHs512,
}

impl ContentEncryption {
    pub const ALL: [Self; 8] = [
        Self::A128CbcHs256,
        Self::A192CbcHs384,
        Self::A256CbcHs512,
        Self::A128Gcm,
        Self::A192Gcm,
        Self::A256Gcm,
        Self::A128CbcPlusHs256,
        Self::A256CbcPlusHs512,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::A128CbcHs256 => "A128CBC-HS256",
            Self::A192CbcHs384 => "A192CBC-HS384",
            Self::A256CbcHs512 => "A256CBC-HS512",
            Self::A128Gcm => "A128GCM",
            Self::A192Gcm => "A192GCM",
            Self::A256Gcm => "A256GCM",
            Self::A128CbcPlusHs256 => "A128CBC+HS256",
            Self::A256CbcPlusHs512 => "A256CBC+HS512",
        }
    }

    pub fn family(&self) -> EncryptionFamily {
        match self {
            Self::A128CbcHs256 | Self::A192CbcHs384 | Self::A256CbcHs512 => {
                EncryptionFamily::CbcHmac
            }
            Self::A128Gcm | Self::A192Gcm | Self::A256Gcm => EncryptionFamily::Gcm,
            Self::A128CbcPlusHs256 | Self::A256CbcPlusHs512 => EncryptionFamily::ConcatKdf,
        }
    }

    /// Default CEK length in bits.
    pub fn cek_bits(&self) -> u64 {
        match self {
            Self::A128Gcm => 128,
            Self::A192Gcm => 192,
            Self::A128CbcHs256 | Self::A256Gcm | Self::A128CbcPlusHs256 => 256,
            Self::A192CbcHs384 => 384,
            Self::A256CbcHs512 | Self::A256CbcPlusHs512 => 512,
        }
    }

    /// Resolves the CEK length in bytes, honouring an explicit
    /// `cek_bitlength` when it suits the algorithm family.
    pub fn cek_length(&self, requested_bits: Option<u64>) -> Result<usize, JoseError> {
        let Some(bits) = requested_bits else {
            return Ok((self.cek_bits() / 8) as usize);
        };

        let valid = match self.family() {
            EncryptionFamily::Gcm => matches!(bits, 128 | 192 | 256),
            EncryptionFamily::CbcHmac => matches!(bits, 256 | 384 | 512),
            EncryptionFamily::ConcatKdf => bits == self.cek_bits(),
        };

        if valid {
            Ok((bits / 8) as usize)
        } else {
            Err(JoseError::UnsupportedKeyLength {
                enc: self.name().to_owned(),
                bits,
            })
        }
    }
}

impl FromStr for ContentEncryption {
    type Err = JoseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|enc| enc.name() == name)
            .ok_or_else(|| JoseError::UnsupportedAlgorithm(name.to_owned()))
    }
}

impl fmt::Display for ContentEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload compression (`zip`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionAlgorithm {
    /// Raw DEFLATE (RFC 1951).
    Deflate,
}

impl CompressionAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deflate => "DEF",
        }
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = JoseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "DEF" => Ok(Self::Deflate),
            other => Err(JoseError::UnsupportedAlgorithm(other.to_owned())),
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "algorithm_test.rs"]
mod algorithm_test;
