//! Random hex strings drawn from the operating system's entropy source.

use rand::{rngs::OsRng, TryRngCore};
use thiserror::Error;

/// The operating system refused to hand out random bytes.
#[derive(Debug, Error)]
#[error("entropy source unavailable: {0}")]
pub struct EntropyError(String);

/// Draw `byte_len` random bytes and render them as lowercase hex.
///
/// The returned string is always `2 * byte_len` characters long.
pub fn random_hex(byte_len: usize) -> Result<String, EntropyError> {
    let mut bytes = vec![0u8; byte_len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| EntropyError(e.to_string()))?;
    Ok(hex::encode(bytes))
}
