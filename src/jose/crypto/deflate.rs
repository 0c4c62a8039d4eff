use crate::jose::error::JoseError;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::io::{Read, Write};

/// Upper bound on inflated payload size.
pub(crate) const MAX_INFLATED_SIZE: u64 = 16 * 1024 * 1024;

pub(crate) fn compress(data: &[u8]) -> Result<Vec<u8>, JoseError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| JoseError::Compression(format!("deflate error: {e}")))?;
    encoder
        .finish()
        .map_err(|e| JoseError::Compression(format!("deflate finish error: {e}")))
}

pub(crate) fn decompress(data: &[u8]) -> Result<Vec<u8>, JoseError> {
    decompress_limited(data, MAX_INFLATED_SIZE)
}

fn decompress_limited(data: &[u8], limit: u64) -> Result<Vec<u8>, JoseError> {
    let mut inflated = Vec::new();
    DeflateDecoder::new(data)
        .take(limit + 1)
        .read_to_end(&mut inflated)
        .map_err(|e| JoseError::Compression(format!("inflate error: {e}")))?;

    if inflated.len() as u64 > limit {
        return Err(JoseError::Compression(format!(
            "inflated payload exceeds {limit} bytes"
        )));
    }
    Ok(inflated)
}

#[cfg(test)]
#[path = "deflate_test.rs"]
mod deflate_test;
