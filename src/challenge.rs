//! Per-job challenge derivation and the demo labelling task.
//!
//! Challenge `i` for a job is `SHA256(seed || BE(job_id, 4) || BE(i, 4))` read
//! as a 256-bit big-endian integer and reduced modulo the input count. Draws are
//! independent, so the same index may be challenged more than once.

use crate::error::Error;
use sha2::{Digest, Sha256};

/// Decode a hex seed, with or without a leading `0x`.
pub fn decode_seed_hex(seed_hex: &str) -> Result<Vec<u8>, Error> {
    let trimmed = seed_hex.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| Error::InvalidSeed(e.to_string()))
}

/// Derive `k` challenge indices in `[0, n)` for `job_id`, in generation order.
pub fn derive_challenges(seed: &[u8], job_id: u32, k: u32, n: u32) -> Result<Vec<u32>, Error> {
    if n == 0 {
        return Err(Error::InvalidParams("input count must be >= 1".into()));
    }
    let indices: Vec<u32> = (0..k)
        .map(|i| {
            let mut hasher = Sha256::new();
            hasher.update(seed);
            hasher.update(job_id.to_be_bytes());
            hasher.update(i.to_be_bytes());
            let digest: [u8; 32] = hasher.finalize().into();
            reduce_be(&digest, n)
        })
        .collect();
    tracing::debug!(job_id, k, n, "derived job challenges");
    Ok(indices)
}

/// Label for input `index`: the first four digest bytes, big-endian, mod 10.
pub fn compute_label(seed: &[u8], index: u32) -> u8 {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(index.to_be_bytes());
    let digest = hasher.finalize();
    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    (head % 10) as u8
}

pub fn generate_all_labels(seed: &[u8], n: u32) -> Vec<u8> {
    (0..n).map(|i| compute_label(seed, i)).collect()
}

// Big-endian bytes mod `modulus`, one byte at a time.
fn reduce_be(bytes: &[u8], modulus: u32) -> u32 {
    let m = u64::from(modulus);
    let rem = bytes
        .iter()
        .fold(0u64, |acc, &b| ((acc << 8) | u64::from(b)) % m);
    rem as u32
}
