//! Reproducible test vectors tying challenges, labels and the label commitment
//! together, serialized as JSON for cross-implementation checks.

use crate::challenge::{derive_challenges, generate_all_labels};
use crate::error::{Error, VerifyError};
use crate::merkle::{verify, MerkleTree};
use crate::types::SampleProof;
use serde::{Deserialize, Serialize};

const DESCRIPTION: &str = "Test vectors for challenge derivation and Merkle proofs";
const LEAF_FORMAT: &str = "sha256(0x00 || index[4 bytes BE] || label[1 byte])";
const INNER_FORMAT: &str = "sha256(0x01 || left || right)";
const CHALLENGE_FORMULA: &str = "sha256(seed || jobId || k) mod N";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorMetadata {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorParameters {
    #[serde(with = "hex")]
    pub seed: Vec<u8>,
    pub job_id: u32,
    #[serde(rename = "N")]
    pub n: u32,
    #[serde(rename = "K")]
    pub k: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorResults {
    pub challenge_indices: Vec<u32>,
    pub all_labels: Vec<u8>,
    #[serde(with = "hex")]
    pub merkle_root: [u8; 32],
    pub sample_proofs: Vec<SampleProof>,
}

/// Hash layouts the results were produced with, so the JSON describes itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorVerification {
    pub leaf_format: String,
    pub inner_format: String,
    pub challenge_formula: String,
}

impl Default for VectorVerification {
    fn default() -> Self {
        Self {
            leaf_format: LEAF_FORMAT.to_owned(),
            inner_format: INNER_FORMAT.to_owned(),
            challenge_formula: CHALLENGE_FORMULA.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVectors {
    pub metadata: VectorMetadata,
    pub parameters: VectorParameters,
    pub results: VectorResults,
    pub verification: VectorVerification,
}

impl TestVectors {
    pub fn generate(seed: &[u8], job_id: u32, n: u32, k: u32) -> Result<Self, Error> {
        let challenge_indices = derive_challenges(seed, job_id, k, n)?;
        let all_labels = generate_all_labels(seed, n);
        let tree = MerkleTree::from_labels(&all_labels)?;
        let sample_proofs = challenge_indices
            .iter()
            .map(|&index| -> Result<SampleProof, VerifyError> {
                Ok(SampleProof {
                    index,
                    label: all_labels[index as usize],
                    branch: tree.proof_for_index(index)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            metadata: VectorMetadata {
                description: DESCRIPTION.to_owned(),
            },
            parameters: VectorParameters {
                seed: seed.to_vec(),
                job_id,
                n,
                k,
            },
            results: VectorResults {
                challenge_indices,
                all_labels,
                merkle_root: tree.root(),
                sample_proofs,
            },
            verification: VectorVerification::default(),
        })
    }

    /// Recompute every result from the parameters and check each sample proof
    /// against the committed root.
    pub fn verify(&self) -> Result<(), VerifyError> {
        let params = &self.parameters;
        let results = &self.results;

        if self.verification != VectorVerification::default() {
            return Err(VerifyError::Mismatch("verification formats"));
        }
        let indices = derive_challenges(&params.seed, params.job_id, params.k, params.n)
            .map_err(|e| VerifyError::InvalidParams(e.to_string()))?;
        if indices != results.challenge_indices {
            return Err(VerifyError::Mismatch("challenge indices"));
        }
        let labels = generate_all_labels(&params.seed, params.n);
        if labels != results.all_labels {
            return Err(VerifyError::Mismatch("labels"));
        }
        let tree = MerkleTree::from_labels(&labels)?;
        if tree.root() != results.merkle_root {
            return Err(VerifyError::Mismatch("merkle root"));
        }
        if results.sample_proofs.len() != indices.len() {
            return Err(VerifyError::Mismatch("sample proof count"));
        }

        for (sample, &index) in results.sample_proofs.iter().zip(&indices) {
            if sample.index != index || sample.label != labels[index as usize] {
                return Err(VerifyError::Mismatch("sample proof"));
            }
            if tree.proof_for_index(index)? != sample.branch {
                return Err(VerifyError::Mismatch("sample proof branch"));
            }
            if !verify(&results.merkle_root, sample.index, sample.label, &sample.branch) {
                return Err(VerifyError::InvalidProof(sample.index));
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}
