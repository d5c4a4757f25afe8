//! Multivariate-polynomial proofs.
//!
//! A fresh random system is published with the proof. Inputs are derived from the secret, and the proof reveals
//! the system evaluated at those inputs. All arithmetic is modulo 2^64.

use super::{check_envelope, check_len, check_response_differs, ProofEngine, WITNESS_LEN};
use crate::config::MultivariateParams;
use crate::error::{PrimitiveError, ProofError, VerifyFailure};
use crate::primitives::arith::buffer_to_bigints;
use crate::primitives::hashing::{hash, sha256, sha256_concat, HashVariant};
use crate::primitives::multivariate::{
    generate_multivariate_system, words_from_bytes, words_to_bytes, PolynomialSystem,
};
use crate::primitives::random::random_array;
use crate::primitives::validation::Validate;
use crate::proof::{Algorithm, MultivariateProof, ProofEnvelope};
use log::*;
use zeroize::{Zeroize, Zeroizing};

pub const WORD_LEN: usize = 8;

/// Derive `count` words from `sha512(data)`, keeping the low 64 bits of each slice.
fn derive_words(data: &[u8], count: usize) -> Result<Vec<u64>, PrimitiveError> {
    let digest = Zeroizing::new(hash(data, HashVariant::Sha512));
    let words = buffer_to_bigints(&digest, count)?
        .iter()
        .map(|v| v.iter_u64_digits().next().unwrap_or(0))
        .collect();
    Ok(words)
}

#[derive(Clone, Debug, Default)]
pub struct MultivariateEngine {
    params: MultivariateParams,
}

impl MultivariateEngine {
    pub fn new(params: MultivariateParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MultivariateParams {
        &self.params
    }
}

impl ProofEngine for MultivariateEngine {
    type Proof = MultivariateProof;
    const ALGORITHM: Algorithm = Algorithm::Multivariate;

    fn create_proof(&self, secret: &[u8]) -> Result<MultivariateProof, ProofError> {
        self.params.validate()?;
        let MultivariateParams { variables, equations, degree } = self.params;
        let system = generate_multivariate_system(variables, equations, degree)?;
        let system_bytes = system.to_bytes()?;

        let secret_digest = Zeroizing::new(sha256(secret));
        let commitment = sha256_concat(&[secret_digest.as_slice(), sha256(&system_bytes).as_slice()]);
        let witness = Zeroizing::new(random_array::<WITNESS_LEN>());
        let challenge = sha256_concat(&[commitment.as_slice(), witness.as_slice(), system_bytes.as_slice()]);

        let mut s = derive_words(secret, variables)?;
        let mut w = derive_words(witness.as_slice(), variables)?;
        let mut weight = [0u8; WORD_LEN];
        weight.copy_from_slice(&challenge[..WORD_LEN]);
        let c = u64::from_be_bytes(weight);
        let z: Vec<u64> = s.iter().zip(&w).map(|(s_i, w_i)| s_i.wrapping_mul(c).wrapping_add(*w_i)).collect();
        let solution = system.evaluate_all(&s)?;
        s.zeroize();
        w.zeroize();

        debug!("Created multivariate proof with {variables} variables and {equations} equations of degree {degree}");
        Ok(MultivariateProof {
            envelope: ProofEnvelope::new(commitment.to_vec(), challenge.to_vec(), words_to_bytes(&z)),
            parameters: self.params.clone(),
            variables,
            equations,
            polynomial_system: system_bytes,
            solution: words_to_bytes(&solution),
        })
    }

    fn check_proof(proof: &MultivariateProof) -> Result<(), VerifyFailure> {
        let envelope = &proof.envelope;
        check_envelope(envelope, proof.variables.saturating_mul(WORD_LEN))?;
        check_len("commitment", &envelope.commitment, 32)?;
        let system = PolynomialSystem::from_bytes(&proof.polynomial_system)?;
        if system.equations() != proof.equations || system.variables() != proof.variables {
            return Err(VerifyFailure::Malformed(format!(
                "system has shape {}x{}, proof claims {}x{}",
                system.equations(),
                system.variables(),
                proof.equations,
                proof.variables
            )));
        }
        let solution = words_from_bytes(&proof.solution)?;
        if solution.len() != proof.equations {
            return Err(VerifyFailure::BadLength {
                field: "solution",
                expected: proof.equations,
                actual: solution.len(),
            });
        }
        check_response_differs(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_verify() {
        env_logger::try_init().ok();
        let proof = MultivariateEngine::default().create_proof(b"multivariate secret").unwrap();
        assert_eq!(proof.envelope.response.len(), 8 * WORD_LEN);
        assert_eq!(proof.solution.len(), 12 * WORD_LEN);
        assert!(MultivariateEngine::verify_proof(&proof));
    }

    #[test]
    fn solution_is_the_system_at_the_secret_inputs() {
        let secret = b"evaluate me";
        let proof = MultivariateEngine::default().create_proof(secret).unwrap();
        let system = PolynomialSystem::from_bytes(&proof.polynomial_system).unwrap();
        let inputs = derive_words(secret, 8).unwrap();
        assert_eq!(words_from_bytes(&proof.solution).unwrap(), system.evaluate_all(&inputs).unwrap());
    }

    #[test]
    fn derived_words_are_deterministic() {
        let a = derive_words(b"abc", 8).unwrap();
        assert_eq!(a.len(), 8);
        assert_eq!(a, derive_words(b"abc", 8).unwrap());
        assert_ne!(a, derive_words(b"abd", 8).unwrap());
    }

    #[test]
    fn invalid_profiles_are_rejected() {
        let engine = MultivariateEngine::new(MultivariateParams { variables: 8, equations: 6, degree: 2 });
        assert!(matches!(engine.create_proof(b"x"), Err(ProofError::InvalidParameters(_))));
    }

    #[test]
    fn rejection_reasons() {
        env_logger::try_init().ok();
        let proof = MultivariateEngine::default().create_proof(b"reasons").unwrap();

        let mut bad = proof.clone();
        bad.equations = 13;
        assert!(matches!(MultivariateEngine::check_proof(&bad), Err(VerifyFailure::Malformed(_))));

        let mut bad = proof.clone();
        bad.polynomial_system.truncate(40);
        assert!(matches!(MultivariateEngine::check_proof(&bad), Err(VerifyFailure::Malformed(_))));

        let mut bad = proof.clone();
        bad.solution.truncate(11 * WORD_LEN);
        assert!(matches!(
            MultivariateEngine::check_proof(&bad),
            Err(VerifyFailure::BadLength { field: "solution", .. })
        ));

        let mut bad = proof.clone();
        bad.envelope.commitment = vec![1; 31];
        assert!(matches!(
            MultivariateEngine::check_proof(&bad),
            Err(VerifyFailure::BadLength { field: "commitment", .. })
        ));

        let mut bad = proof;
        bad.envelope.response = bad.envelope.response[..8].to_vec();
        assert!(!MultivariateEngine::verify_proof(&bad));
    }
}
