//! Deterministic challenge-index derivation for proof-of-sampling verifiers.
//!
//! - [`derive_indices`]: hash a seed, key a local MT19937 with the digest and
//!   sample `k` distinct indices from `[0, n_total)`, sorted ascending.
//! - Per-job challenges, demo labels and a Merkle commitment over those labels,
//!   with reproducible JSON test vectors.

pub mod challenge;
pub mod core;
pub mod error;
pub mod merkle;
pub mod mt;
pub mod sampler;
pub mod types;
pub mod vectors;

pub use crate::core::{Blake3SeedHasher, SeedHasher, Sha256SeedHasher};
pub use challenge::{compute_label, decode_seed_hex, derive_challenges, generate_all_labels};
pub use error::{Error, VerifyError};
pub use merkle::MerkleTree;
pub use mt::Mt19937;
pub use sampler::{
    derive_indices, derive_indices_with, sample_indices, DeterministicSampler,
    DeterministicSamplerBuilder,
};
pub use types::{Leaf, MerkleBranch, SampleProof, SamplingParams};
pub use vectors::{TestVectors, VectorVerification};
