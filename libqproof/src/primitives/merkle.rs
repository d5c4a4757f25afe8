//! Binary SHA-256 Merkle tree.
//!
//! Inner nodes hash the concatenation `left ‖ right` of their children. A level with an odd number of nodes pairs its
//! last node with itself. Leaves are used as given (they are already digests).

use crate::error::PrimitiveError;
use crate::helpers::{digests_from_hex, digests_to_hex};
use crate::primitives::hashing::sha256_concat;
use serde::{Deserialize, Serialize};

pub const DIGEST_SIZE: usize = 32;

pub type Digest = [u8; DIGEST_SIZE];

/// Authentication path: sibling digests ordered from the leaf level up to (not including) the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    #[serde(serialize_with = "digests_to_hex", deserialize_with = "digests_from_hex")]
    pub siblings: Vec<Digest>,
}

impl MerkleProof {
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }
}

#[derive(Clone, Debug)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    sha256_concat(&[left.as_slice(), right.as_slice()])
}

impl MerkleTree {
    /// Build the tree bottom-up from `leaves`.
    pub fn new(leaves: &[Digest]) -> Result<Self, PrimitiveError> {
        if leaves.is_empty() {
            return Err(PrimitiveError::EmptyInput("Merkle tree needs at least one leaf"));
        }
        let mut levels = vec![leaves.to_vec()];
        let mut current = leaves.to_vec();
        while current.len() > 1 {
            let next: Vec<Digest> = current
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    hash_pair(left, pair.get(1).unwrap_or(left))
                })
                .collect();
            levels.push(next.clone());
            current = next;
        }
        Ok(Self { levels })
    }

    pub fn root(&self) -> Digest {
        self.levels.last().and_then(|level| level.first().copied()).unwrap_or([0u8; DIGEST_SIZE])
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of levels, including the leaves and the root.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Generate the inclusion proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Result<MerkleProof, PrimitiveError> {
        let len = self.leaf_count();
        if index >= len {
            return Err(PrimitiveError::IndexOutOfRange { index, len });
        }
        let mut siblings = Vec::with_capacity(self.levels.len().saturating_sub(1));
        let mut position = index;
        for nodes in &self.levels[..self.levels.len() - 1] {
            let sibling = if position % 2 == 0 { position + 1 } else { position - 1 };
            // A missing right sibling means the node was paired with itself.
            siblings.push(nodes.get(sibling).copied().unwrap_or(nodes[position]));
            position /= 2;
        }
        Ok(MerkleProof { siblings })
    }
}

/// Fold `leaf` up through `proof` and compare with `root`.
///
/// The low bit of the running index decides whether the sibling sits on the right (even) or the left (odd).
pub fn verify_merkle_proof(leaf: &Digest, proof: &MerkleProof, root: &Digest, index: usize) -> bool {
    let mut position = index;
    let mut node = *leaf;
    for sibling in &proof.siblings {
        node = if position % 2 == 0 { hash_pair(&node, sibling) } else { hash_pair(sibling, &node) };
        position /= 2;
    }
    position == 0 && node == *root
}
