use ::serde::Serialize;
use hsym_core::HsymError;
use sha2::{Digest, Sha256};

use crate::serde_io::to_canonical_json_bytes;

/// Hex SHA-256 fingerprint of the canonical JSON encoding of `value`.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, HsymError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
