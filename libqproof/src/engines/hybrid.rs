//! Hybrid proofs: one component proof per distinct base algorithm, bound together by combined digests.

use super::{check_envelope, check_len, check_proof, check_response_differs, contains_marker, ProofEngine, WITNESS_LEN};
use super::{HashChainEngine, LatticeEngine, MultivariateEngine};
use crate::config::{HashParams, HybridParams, LatticeParams, MultivariateParams, ProofConfig};
use crate::error::{ProofError, VerifyFailure};
use crate::primitives::hashing::{combine_hashes, hmac, sha256, sha256_concat, HashVariant};
use crate::primitives::random::random_array;
use crate::primitives::validation::Validate;
use crate::proof::{Algorithm, HybridProof, Proof, ProofEnvelope};
use log::*;
use std::collections::BTreeMap;
use zeroize::Zeroizing;

pub const RESPONSE_LEN: usize = 32;

/// Builds hybrid proofs using the base profiles it was configured with.
#[derive(Clone, Debug, Default)]
pub struct HybridEngine {
    params: HybridParams,
    lattice: LatticeParams,
    hash: HashParams,
    multivariate: MultivariateParams,
}

impl HybridEngine {
    pub fn new(
        params: HybridParams,
        lattice: LatticeParams,
        hash: HashParams,
        multivariate: MultivariateParams,
    ) -> Self {
        Self { params, lattice, hash, multivariate }
    }

    pub fn from_config(config: &ProofConfig) -> Self {
        Self::new(config.hybrid.clone(), config.lattice.clone(), config.hash.clone(), config.multivariate.clone())
    }

    pub fn params(&self) -> &HybridParams {
        &self.params
    }

    fn validate_components(&self, algorithms: &[Algorithm]) -> Result<(), ProofError> {
        for alg in algorithms {
            match alg {
                Algorithm::Lattice => self.lattice.validate()?,
                Algorithm::Hash => self.hash.validate()?,
                Algorithm::Multivariate => self.multivariate.validate()?,
                Algorithm::Hybrid => return Err(ProofError::invalid("hybrid proofs cannot be nested")),
            }
        }
        Ok(())
    }

    fn create_component(&self, algorithm: Algorithm, secret: &[u8]) -> Result<Proof, ProofError> {
        let proof = match algorithm {
            Algorithm::Lattice => LatticeEngine::new(self.lattice.clone()).create_proof(secret)?.into(),
            Algorithm::Hash => HashChainEngine::new(self.hash.clone()).create_proof(secret)?.into(),
            Algorithm::Multivariate => MultivariateEngine::new(self.multivariate.clone()).create_proof(secret)?.into(),
            Algorithm::Hybrid => return Err(ProofError::invalid("hybrid proofs cannot be nested")),
        };
        Ok(proof)
    }
}

fn component_digest(proof: &Proof, weight: f64) -> [u8; 32] {
    let envelope = proof.envelope();
    sha256_concat(&[envelope.commitment.as_slice(), envelope.response.as_slice(), weight.to_be_bytes().as_slice()])
}

impl ProofEngine for HybridEngine {
    type Proof = HybridProof;
    const ALGORITHM: Algorithm = Algorithm::Hybrid;

    fn create_proof(&self, secret: &[u8]) -> Result<HybridProof, ProofError> {
        self.params.validate()?;
        let algorithms = self.params.distinct_algorithms();
        self.validate_components(&algorithms)?;

        let components =
            algorithms.iter().map(|alg| self.create_component(*alg, secret)).collect::<Result<Vec<Proof>, _>>()?;
        let commitments: Vec<&[u8]> = components.iter().map(|p| p.envelope().commitment.as_slice()).collect();
        let responses: Vec<&[u8]> = components.iter().map(|p| p.envelope().response.as_slice()).collect();
        let combined_commitments = combine_hashes(&commitments)?;
        let combined_responses = combine_hashes(&responses)?;

        let secret_digest = Zeroizing::new(sha256(secret));
        let commitment = sha256_concat(&[combined_commitments.as_slice(), secret_digest.as_slice()]);
        let witness = Zeroizing::new(random_array::<WITNESS_LEN>());
        let challenge =
            sha256_concat(&[commitment.as_slice(), witness.as_slice(), combined_commitments.as_slice()]);
        let mac = Zeroizing::new(hmac(&challenge, secret_digest.as_slice(), HashVariant::Sha256)?);
        let response = sha256_concat(&[witness.as_slice(), mac.as_slice(), combined_responses.as_slice()]);

        let weights: BTreeMap<Algorithm, f64> =
            algorithms.iter().map(|alg| (*alg, self.params.weight_for(*alg))).collect();
        let digests: Vec<[u8; 32]> =
            components.iter().map(|p| component_digest(p, self.params.weight_for(p.algorithm()))).collect();
        let combined = combine_hashes(&digests)?.to_vec();

        debug!("Created hybrid proof from {} components", components.len());
        Ok(HybridProof {
            envelope: ProofEnvelope::new(commitment.to_vec(), challenge.to_vec(), response.to_vec()),
            parameters: self.params.clone(),
            components,
            combined,
            weights,
        })
    }

    fn check_proof(proof: &HybridProof) -> Result<(), VerifyFailure> {
        check_hybrid_proof(proof)
    }
}

/// Verify a hybrid proof and each of its components.
pub fn check_hybrid_proof(proof: &HybridProof) -> Result<(), VerifyFailure> {
    let envelope = &proof.envelope;
    check_envelope(envelope, RESPONSE_LEN)?;
    if proof.components.is_empty() {
        return Err(VerifyFailure::Empty("components"));
    }
    if let Some(nested) = proof.components.iter().find(|p| p.algorithm() == Algorithm::Hybrid) {
        return Err(VerifyFailure::NestedHybrid(nested.algorithm()));
    }
    for component in &proof.components {
        check_proof(component).map_err(|reason| VerifyFailure::ComponentRejected {
            algorithm: component.algorithm(),
            reason: Box::new(reason),
        })?;
    }
    check_len("commitment", &envelope.commitment, 32)?;
    check_response_differs(envelope)?;
    if proof.combined.is_empty() {
        return Err(VerifyFailure::Empty("combined"));
    }
    if contains_marker(&proof.combined) {
        return Err(VerifyFailure::Corrupted("combined"));
    }
    Ok(())
}
