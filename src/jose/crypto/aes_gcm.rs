use super::AuthenticatedCipherText;
use crate::jose::error::JoseError;
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};

pub(crate) const IV_LENGTH: usize = 12;
pub(crate) const TAG_LENGTH: usize = 16;

type Aes192Gcm = AesGcm<aes::Aes192, U12>;

/// AES-GCM with a 96-bit IV and 128-bit tag. The AES variant follows the
/// key length.
pub(crate) fn encrypt(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<AuthenticatedCipherText, JoseError> {
    check_iv(iv)?;
    match key.len() {
        16 => seal::<Aes128Gcm>(key, iv, plaintext, aad),
        24 => seal::<Aes192Gcm>(key, iv, plaintext, aad),
        32 => seal::<Aes256Gcm>(key, iv, plaintext, aad),
        actual => Err(JoseError::InvalidKeyLength {
            expected: 16,
            actual,
        }),
    }
}

pub(crate) fn decrypt(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, JoseError> {
    check_iv(iv)?;
    if tag.len() != TAG_LENGTH {
        return Err(JoseError::IntegrityFailure);
    }
    match key.len() {
        16 => open::<Aes128Gcm>(key, iv, ciphertext, aad, tag),
        24 => open::<Aes192Gcm>(key, iv, ciphertext, aad, tag),
        32 => open::<Aes256Gcm>(key, iv, ciphertext, aad, tag),
        actual => Err(JoseError::InvalidKeyLength {
            expected: 16,
            actual,
        }),
    }
}

fn seal<C>(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<AuthenticatedCipherText, JoseError>
where
    C: KeyInit + AeadInPlace,
{
    let cipher = C::new_from_slice(key)
        .map_err(|_| JoseError::Encryption("invalid AES-GCM key".into()))?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(iv), aad, &mut buffer)
        .map_err(|_| JoseError::Encryption("AES-GCM encryption failed".into()))?;

    Ok(AuthenticatedCipherText {
        cipher_text: buffer,
        authentication_tag: tag.to_vec(),
    })
}

fn open<C>(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, JoseError>
where
    C: KeyInit + AeadInPlace,
{
    let cipher = C::new_from_slice(key)
        .map_err(|_| JoseError::Decryption("invalid AES-GCM key".into()))?;
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(iv),
            aad,
            &mut buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| JoseError::IntegrityFailure)?;
    Ok(buffer)
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
#[path = "aes_gcm_test.rs"]
mod aes_gcm_test;
