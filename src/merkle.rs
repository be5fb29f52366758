//! Binary Merkle commitment over `(index, label)` leaves.
//!
//! Leaves hash as `SHA256(0x00 || BE(index, 4) || label)` and inner nodes as
//! `SHA256(0x01 || left || right)`. A trailing odd node is paired with itself.

use crate::error::VerifyError;
use crate::types::{Leaf, MerkleBranch};
use sha2::{Digest, Sha256};

const LEAF_TAG: u8 = 0x00;
const INNER_TAG: u8 = 0x01;

pub fn leaf_hash(index: u32, label: u8) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_TAG]);
    hasher.update(index.to_be_bytes());
    hasher.update([label]);
    hasher.finalize().into()
}

pub fn inner_hash(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update([INNER_TAG]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    leaves: Vec<Leaf>,
    // levels[0] holds the leaf hashes, the last level holds only the root.
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn build(leaves: Vec<Leaf>) -> Result<Self, VerifyError> {
        if leaves.is_empty() {
            return Err(VerifyError::EmptyTree);
        }
        let mut levels = vec![leaves
            .iter()
            .map(|leaf| leaf_hash(leaf.index, leaf.label))
            .collect::<Vec<_>>()];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next = current
                .chunks(2)
                .map(|pair| inner_hash(&pair[0], pair.get(1).unwrap_or(&pair[0])))
                .collect();
            levels.push(next);
        }
        tracing::trace!(leaves = leaves.len(), depth = levels.len() - 1, "built merkle tree");
        Ok(Self { leaves, levels })
    }

    /// Commit to `labels`, giving position `i` the index `i`.
    pub fn from_labels(labels: &[u8]) -> Result<Self, VerifyError> {
        let leaves = labels
            .iter()
            .zip(0u32..)
            .map(|(&label, index)| Leaf { index, label })
            .collect();
        Self::build(leaves)
    }

    pub fn root(&self) -> [u8; 32] {
        self.levels[self.levels.len() - 1][0]
    }

    pub fn root_hex(&self) -> String {
        hex::encode(self.root())
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Sibling path from the leaf carrying `index` up to the root.
    pub fn proof_for_index(&self, index: u32) -> Result<Vec<MerkleBranch>, VerifyError> {
        let mut pos = self
            .leaves
            .iter()
            .position(|leaf| leaf.index == index)
            .ok_or(VerifyError::UnknownIndex(index))?;
        let mut branch = Vec::with_capacity(self.depth());
        for level in &self.levels[..self.depth()] {
            let (dir, sibling) = if pos % 2 == 0 {
                (true, level.get(pos + 1).unwrap_or(&level[pos]))
            } else {
                (false, &level[pos - 1])
            };
            branch.push(MerkleBranch {
                dir,
                hash: *sibling,
            });
            pos /= 2;
        }
        Ok(branch)
    }
}

/// Check that `(index, label)` opens to `root` along `branch`.
pub fn verify(root: &[u8; 32], index: u32, label: u8, branch: &[MerkleBranch]) -> bool {
    let computed = branch
        .iter()
        .fold(leaf_hash(index, label), |acc, node| {
            if node.dir {
                inner_hash(&acc, &node.hash)
            } else {
                inner_hash(&node.hash, &acc)
            }
        });
    computed == *root
}
