use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Population and sample size for one challenge derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SamplingParams {
    pub n_total: usize,
    pub k: usize,
}

impl SamplingParams {
    pub const fn new(n_total: usize, k: usize) -> Self {
        Self { n_total, k }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.n_total == 0 {
            return Err(Error::InvalidParams("n_total must be >= 1".into()));
        }
        if self.k > self.n_total {
            return Err(Error::InvalidParams(format!(
                "k ({}) must not exceed n_total ({})",
                self.k, self.n_total
            )));
        }
        Ok(())
    }
}

/// A committed input position and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leaf {
    pub index: u32,
    pub label: u8,
}

/// One sibling on the path from a leaf to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerkleBranch {
    /// `true` when the sibling sits to the right of the running hash.
    pub dir: bool,
    #[serde(with = "hex")]
    pub hash: [u8; 32],
}

/// Opening of a single challenged position against a label commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleProof {
    pub index: u32,
    pub label: u8,
    pub branch: Vec<MerkleBranch>,
}
