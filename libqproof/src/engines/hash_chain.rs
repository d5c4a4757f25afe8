//! Hash-chain proofs.
//!
//! The prover hashes a fresh seed together with the secret into a chain of SHA-256 links, commits to the first link
//! and publishes the chain with a Merkle root over it. The response binds a random witness to an HMAC of the
//! challenge keyed by the secret's digest.

use super::{check_envelope, ProofEngine, WITNESS_LEN};
use crate::config::HashParams;
use crate::error::{ProofError, VerifyFailure};
use crate::primitives::hashing::{create_hash_chain, first_broken_link, hmac, sha256, sha256_concat, HashVariant};
use crate::primitives::merkle::{verify_merkle_proof, MerkleTree};
use crate::primitives::random::{random_array, random_bytes};
use crate::primitives::validation::Validate;
use crate::proof::{Algorithm, HashProof, ProofEnvelope};
use log::*;
use zeroize::Zeroizing;

pub const SEED_LEN: usize = 16;
/// Witness prefix followed by the HMAC suffix.
pub const RESPONSE_LEN: usize = WITNESS_LEN + 32;

#[derive(Clone, Debug, Default)]
pub struct HashChainEngine {
    params: HashParams,
}

impl HashChainEngine {
    pub fn new(params: HashParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &HashParams {
        &self.params
    }
}

impl ProofEngine for HashChainEngine {
    type Proof = HashProof;
    const ALGORITHM: Algorithm = Algorithm::Hash;

    fn create_proof(&self, secret: &[u8]) -> Result<HashProof, ProofError> {
        self.params.validate()?;
        let length = self.params.chain_length;
        let mut seeded = Zeroizing::new(random_bytes(SEED_LEN)?);
        seeded.extend_from_slice(secret);
        let hash_chain = create_hash_chain(&seeded, length)?;
        let commitment = hash_chain[0];
        let tree = MerkleTree::new(&hash_chain)?;
        let merkle_proof = tree.proof(0)?;

        let witness = Zeroizing::new(random_array::<WITNESS_LEN>());
        let challenge = sha256_concat(&[commitment.as_slice(), witness.as_slice()]);
        let key = Zeroizing::new(sha256(secret));
        let mac = Zeroizing::new(hmac(&challenge, key.as_slice(), HashVariant::Sha256)?);
        let mut response = Vec::with_capacity(RESPONSE_LEN);
        response.extend_from_slice(witness.as_slice());
        response.extend_from_slice(&mac[..mac.len().min(RESPONSE_LEN - WITNESS_LEN)]);
        response.resize(RESPONSE_LEN, 0);

        debug!("Created hash-chain proof over {length} links");
        Ok(HashProof {
            envelope: ProofEnvelope::new(commitment.to_vec(), challenge.to_vec(), response),
            parameters: self.params.clone(),
            chain_length: length,
            hash_chain,
            merkle_root: tree.root(),
            merkle_proof,
        })
    }

    fn check_proof(proof: &HashProof) -> Result<(), VerifyFailure> {
        check_envelope(&proof.envelope, RESPONSE_LEN)?;
        let chain = &proof.hash_chain;
        let Some(first) = chain.first() else {
            return Err(VerifyFailure::Empty("hash_chain"));
        };
        if chain.len() != proof.chain_length {
            return Err(VerifyFailure::BadLength {
                field: "hash_chain",
                expected: proof.chain_length,
                actual: chain.len(),
            });
        }
        if !verify_merkle_proof(first, &proof.merkle_proof, &proof.merkle_root, 0) {
            return Err(VerifyFailure::MerkleMismatch);
        }
        if let Some(index) = first_broken_link(chain) {
            return Err(VerifyFailure::BrokenChain(index));
        }
        if proof.envelope.commitment.as_slice() != first.as_slice() {
            return Err(VerifyFailure::CommitmentMismatch);
        }
        Ok(())
    }
}
