//! Proof engines: one per [`Algorithm`].
//!
//! Every engine follows the same commit / challenge / respond shape. Construction validates the parameter profile
//! before doing any work. Verification is a pure function of the proof; the reason for a rejection is available via
//! [`ProofEngine::check_proof`] and collapses to `false` in [`ProofEngine::verify_proof`].

pub mod hash_chain;
pub mod hybrid;
pub mod lattice;
pub mod multivariate;

use crate::error::{ProofError, VerifyFailure};
use crate::primitives::hashing::sha256;
use crate::proof::{Algorithm, Proof, ProofEnvelope, CORRUPTION_MARKER};
use log::*;

pub use hash_chain::HashChainEngine;
pub use hybrid::HybridEngine;
pub use lattice::LatticeEngine;
pub use multivariate::MultivariateEngine;

/// Length of every Fiat–Shamir challenge.
pub const CHALLENGE_LEN: usize = 32;
/// Length of the witness sampled for each proof.
pub const WITNESS_LEN: usize = 32;

pub trait ProofEngine {
    type Proof;
    const ALGORITHM: Algorithm;

    fn create_proof(&self, secret: &[u8]) -> Result<Self::Proof, ProofError>;

    /// Run every verification check, stopping at the first failure.
    fn check_proof(proof: &Self::Proof) -> Result<(), VerifyFailure>;

    fn verify_proof(proof: &Self::Proof) -> bool {
        match Self::check_proof(proof) {
            Ok(()) => {
                debug!("{} proof verified", Self::ALGORITHM);
                true
            }
            Err(reason) => {
                warn!("{} proof rejected: {reason}", Self::ALGORITHM);
                false
            }
        }
    }
}

/// Check any proof with the engine for its algorithm.
pub fn check_proof(proof: &Proof) -> Result<(), VerifyFailure> {
    match proof {
        Proof::Lattice(p) => LatticeEngine::check_proof(p),
        Proof::Hash(p) => HashChainEngine::check_proof(p),
        Proof::Multivariate(p) => MultivariateEngine::check_proof(p),
        Proof::Hybrid(p) => HybridEngine::check_proof(p),
    }
}

pub fn verify_proof(proof: &Proof) -> bool {
    match proof {
        Proof::Lattice(p) => LatticeEngine::verify_proof(p),
        Proof::Hash(p) => HashChainEngine::verify_proof(p),
        Proof::Multivariate(p) => MultivariateEngine::verify_proof(p),
        Proof::Hybrid(p) => HybridEngine::verify_proof(p),
    }
}

pub(crate) fn contains_marker(bytes: &[u8]) -> bool {
    bytes.windows(CORRUPTION_MARKER.len()).any(|w| w == CORRUPTION_MARKER)
}

pub(crate) fn check_len(field: &'static str, bytes: &[u8], expected: usize) -> Result<(), VerifyFailure> {
    if bytes.len() != expected {
        return Err(VerifyFailure::BadLength { field, expected, actual: bytes.len() });
    }
    Ok(())
}

/// Reject envelopes whose commitment, challenge or response carries the corruption marker.
pub(crate) fn check_markers(envelope: &ProofEnvelope) -> Result<(), VerifyFailure> {
    let fields =
        [("commitment", &envelope.commitment), ("challenge", &envelope.challenge), ("response", &envelope.response)];
    match fields.into_iter().find(|(_, bytes)| contains_marker(bytes)) {
        Some((field, _)) => Err(VerifyFailure::Corrupted(field)),
        None => Ok(()),
    }
}

/// The checks every engine runs first: response length, corruption markers, then challenge length.
pub(crate) fn check_envelope(envelope: &ProofEnvelope, response_len: usize) -> Result<(), VerifyFailure> {
    check_len("response", &envelope.response, response_len)?;
    check_markers(envelope)?;
    check_len("challenge", &envelope.challenge, CHALLENGE_LEN)
}

/// The response must not hash to the same digest as the challenge.
pub(crate) fn check_response_differs(envelope: &ProofEnvelope) -> Result<(), VerifyFailure> {
    if sha256(&envelope.response) == sha256(&envelope.challenge) {
        return Err(VerifyFailure::ResponseMatchesChallenge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_detection() {
        assert!(contains_marker(b"corrupted"));
        assert!(contains_marker(b"xx corrupted proof"));
        assert!(!contains_marker(b"corrupte"));
        assert!(!contains_marker(b""));
    }

    #[test]
    fn envelope_checks_run_in_order() {
        let env = ProofEnvelope::new(b"corrupted".to_vec(), vec![0; 31], vec![0; 64]);
        assert_eq!(
            check_envelope(&env, 32),
            Err(VerifyFailure::BadLength { field: "response", expected: 32, actual: 64 })
        );
        assert_eq!(check_envelope(&env, 64), Err(VerifyFailure::Corrupted("commitment")));
        let env = ProofEnvelope::new(vec![1; 32], vec![0; 31], vec![0; 64]);
        assert_eq!(
            check_envelope(&env, 64),
            Err(VerifyFailure::BadLength { field: "challenge", expected: 32, actual: 31 })
        );
    }

    #[test]
    fn response_equal_to_challenge_is_rejected() {
        let env = ProofEnvelope::new(vec![1; 32], vec![9; 32], vec![9; 32]);
        assert_eq!(check_response_differs(&env), Err(VerifyFailure::ResponseMatchesChallenge));
        let env = ProofEnvelope::new(vec![1; 32], vec![9; 32], vec![8; 32]);
        assert!(check_response_differs(&env).is_ok());
    }
}
