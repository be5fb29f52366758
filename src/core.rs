use sha2::{Digest, Sha256};
use std::fmt::Debug;

/// Pluggable digest applied to a raw seed before it keys the sampler.
pub trait SeedHasher: Send + Sync + Debug {
    /// Hash `seed` into a fixed 32-byte digest.
    fn digest(&self, seed: &[u8]) -> [u8; 32];
}

/// SHA-256, the reference digest for challenge derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256SeedHasher;

impl SeedHasher for Sha256SeedHasher {
    fn digest(&self, seed: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.finalize().into()
    }
}

/// Unkeyed BLAKE3. Indices derived with this hasher only agree with
/// verifiers that also use BLAKE3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3SeedHasher;

impl SeedHasher for Blake3SeedHasher {
    fn digest(&self, seed: &[u8]) -> [u8; 32] {
        blake3::hash(seed).into()
    }
}

/// Split a digest, read as a big-endian integer, into 32-bit words with the
/// least significant word first. High zero words are dropped but at least one
/// word is always returned.
pub fn digest_key_words(digest: &[u8; 32]) -> Vec<u32> {
    let mut words: Vec<u32> = digest
        .rchunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    while words.len() > 1 && words.last() == Some(&0) {
        words.pop();
    }
    words
}
