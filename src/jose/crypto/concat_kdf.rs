use super::MacAlgorithm;
use crate::jose::b64_decode;
use crate::jose::error::JoseError;
use crate::jose::header::JweHeader;
use sha2::{Digest, Sha256, Sha384, Sha512};

const ENCRYPTION_LABEL: &[u8] = b"Encryption";
const INTEGRITY_LABEL: &[u8] = b"Integrity";

/// Keys derived from a content master key for the `A128CBC+HS256` and
/// `A256CBC+HS512` algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DerivedKeys {
    /// AES key, half the digest size.
    pub(crate) cek: Vec<u8>,
    /// HMAC key, the full digest.
    pub(crate) cik: Vec<u8>,
    pub(crate) mac: MacAlgorithm,
}

/// Single-round Concat KDF (NIST SP 800-56A) as used by the JWE drafts.
///
/// `party_u` and `party_v` are the decoded `epu`/`epv` values.
pub(crate) fn derive_keys(
    cmk: &[u8],
    enc: &str,
    party_u: Option<&[u8]>,
    party_v: Option<&[u8]>,
) -> Result<DerivedKeys, JoseError> {
    let mac = match cmk.len() {
        32 => MacAlgorithm::HS256,
        64 => MacAlgorithm::HS512,
        actual => {
            return Err(JoseError::InvalidKeyLength {
                expected: 32,
                actual,
            });
        }
    };

    let cmk_bits = (cmk.len() * 8) as u32;
    let mut cek = digest(
        mac,
        &kdf_input(cmk, cmk_bits / 2, enc, party_u, party_v, ENCRYPTION_LABEL),
    );
    cek.truncate(cek.len() / 2);
    let cik = digest(
        mac,
        &kdf_input(cmk, cmk_bits, enc, party_u, party_v, INTEGRITY_LABEL),
    );

    Ok(DerivedKeys { cek, cik, mac })
}

/// Runs [`derive_keys`] with the header's `enc`, `epu` and `epv`.
pub(crate) fn derive_from_header(header: &JweHeader, cmk: &[u8]) -> Result<DerivedKeys, JoseError> {
    let party_u = header.party_u_info().map(b64_decode).transpose()?;
    let party_v = header.party_v_info().map(b64_decode).transpose()?;
    derive_keys(
        cmk,
        header.encryption()?.name(),
        party_u.as_deref(),
        party_v.as_deref(),
    )
}

fn digest(mac: MacAlgorithm, input: &[u8]) -> Vec<u8> {
    match mac {
        MacAlgorithm::HS256 => Sha256::digest(input).to_vec(),
        MacAlgorithm::HS384 => Sha384::digest(input).to_vec(),
        MacAlgorithm::HS512 => Sha512::digest(input).to_vec(),
    }
}

fn kdf_input(
    cmk: &[u8],
    key_bits: u32,
    enc: &str,
    party_u: Option<&[u8]>,
    party_v: Option<&[u8]>,
    label: &[u8],
) -> Vec<u8> {
    let mut input = Vec::with_capacity(4 + cmk.len() + 4 + enc.len() + 8 + label.len());
    input.extend_from_slice(&1u32.to_be_bytes());
    input.extend_from_slice(cmk);
    input.extend_from_slice(&key_bits.to_be_bytes());
    input.extend_from_slice(enc.as_bytes());
    push_party_info(&mut input, party_u);
    push_party_info(&mut input, party_v);
    input.extend_from_slice(label);
    input
}

fn push_party_info(input: &mut Vec<u8>, info: Option<&[u8]>) {
    let info = info.unwrap_or_default();
    input.extend_from_slice(&(info.len() as u32).to_be_bytes());
    input.extend_from_slice(info);
}

#[cfg(test)]
#[path = "concat_kdf_test.rs"]
mod concat_kdf_test;
