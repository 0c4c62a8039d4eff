use super::{AuthenticatedCipherText, MacAlgorithm, constant_time_eq};
use crate::jose::error::JoseError;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use tracing::debug;

pub(crate) const IV_LENGTH: usize = 16;

/// AES-CBC with PKCS#7 padding. The AES variant follows the key length.
pub(crate) fn encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, JoseError> {
    check_iv(iv)?;
    let invalid = |_| JoseError::Encryption("invalid AES key or IV".into());
    match key.len() {
        16 => Ok(cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        24 => Ok(cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        32 => Ok(cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        actual => Err(JoseError::InvalidKeyLength {
            expected: 32,
            actual,
        }),
    }
}

pub(crate) fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, JoseError> {
    check_iv(iv)?;
    let invalid = |_| JoseError::Decryption("invalid AES key or IV".into());
    let unpadded = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(invalid)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(invalid)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        32 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(invalid)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        actual => {
            return Err(JoseError::InvalidKeyLength {
                expected: 32,
                actual,
            });
        }
    };
    unpadded.map_err(|_| JoseError::Decryption("bad padding".into()))
}

/// AES_CBC_HMAC_SHA2 encryption (RFC 7518 §5.2.2.1).
///
/// The composite key is `MAC_KEY || ENC_KEY`, each half of `key`.
pub(crate) fn encrypt_authenticated(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<AuthenticatedCipherText, JoseError> {
    let (mac_key, enc_key, mac) = split_key(key)?;
    let cipher_text = encrypt(enc_key, iv, plaintext)?;
    let authentication_tag = compute_tag(mac, mac_key, aad, iv, &cipher_text)?;

    Ok(AuthenticatedCipherText {
        cipher_text,
        authentication_tag,
    })
}

/// AES_CBC_HMAC_SHA2 decryption (RFC 7518 §5.2.2.2).
///
/// The ciphertext is always decrypted before a tag mismatch is reported.
pub(crate) fn decrypt_authenticated(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, JoseError> {
    let (mac_key, enc_key, mac) = split_key(key)?;
    let expected_tag = compute_tag(mac, mac_key, aad, iv, ciphertext)?;
    let tag_matches = constant_time_eq(&expected_tag, tag);

    let plaintext = decrypt(enc_key, iv, ciphertext);
    if !tag_matches {
        debug!("AES-CBC-HMAC authentication tag mismatch");
        return Err(JoseError::IntegrityFailure);
    }
    plaintext
}

fn split_key(key: &[u8]) -> Result<(&[u8], &[u8], MacAlgorithm), JoseError> {
    let mac = match key.len() {
        32 => MacAlgorithm::HS256,
        48 => MacAlgorithm::HS384,
        64 => MacAlgorithm::HS512,
        actual => {
            return Err(JoseError::InvalidKeyLength {
                expected: 32,
                actual,
            });
        }
    };
    let (mac_key, enc_key) = key.split_at(key.len() / 2);
    Ok((mac_key, enc_key, mac))
}

fn compute_tag(
    mac: MacAlgorithm,
    mac_key: &[u8],
    aad: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, JoseError> {
    let al = ((aad.len() as u64) * 8).to_be_bytes();
    let mut full = mac.compute(mac_key, &[aad, iv, ciphertext, &al])?;
    full.truncate(mac_key.len());
    Ok(full)
}

fn check_iv(iv: &[u8]) -> Result<(), JoseError> {
    if iv.len() == IV_LENGTH {
        Ok(())
    } else {
        Err(JoseError::InvalidIvLength {
            expected: IV_LENGTH,
            actual: iv.len(),
        })
    }
}

#[cfg(test)]
#[path = "aes_cbc_test.rs"]
mod aes_cbc_test;
