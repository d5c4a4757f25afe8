use crate::config::ProofConfig;
use crate::engines::{self, HashChainEngine, HybridEngine, LatticeEngine, MultivariateEngine, ProofEngine};
use crate::error::{ProofError, VerifyFailure};
use crate::proof::{Algorithm, Proof};
use log::*;

/// Creates and verifies proofs for any [`Algorithm`] using one fixed [`ProofConfig`].
#[derive(Clone, Debug, Default)]
pub struct Prover {
    config: ProofConfig,
}

impl Prover {
    pub fn new(config: ProofConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    pub fn create_proof<S: AsRef<[u8]>>(&self, algorithm: Algorithm, secret: S) -> Result<Proof, ProofError> {
        let secret = secret.as_ref();
        trace!("Creating {algorithm} proof for a {}-byte secret", secret.len());
        let proof = match algorithm {
            Algorithm::Lattice => LatticeEngine::new(self.config.lattice.clone()).create_proof(secret)?.into(),
            Algorithm::Hash => HashChainEngine::new(self.config.hash.clone()).create_proof(secret)?.into(),
            Algorithm::Multivariate => {
                MultivariateEngine::new(self.config.multivariate.clone()).create_proof(secret)?.into()
            }
            Algorithm::Hybrid => HybridEngine::from_config(&self.config).create_proof(secret)?.into(),
        };
        Ok(proof)
    }

    pub fn verify_proof(&self, proof: &Proof) -> bool {
        proof.verify()
    }
}

impl Proof {
    /// Run every check for this proof, returning the first reason it is rejected.
    pub fn check(&self) -> Result<(), VerifyFailure> {
        engines::check_proof(self)
    }

    pub fn verify(&self) -> bool {
        engines::verify_proof(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HashParams, LatticeParams};
    use crate::primitives::arith::generate_large_prime;

    fn quick_prover() -> Prover {
        let mut config = ProofConfig::default();
        config.lattice =
            LatticeParams { dimension: 128, modulus: generate_large_prime(128).unwrap(), error_sigma: 3.2 };
        config.hash = HashParams { chain_length: 200 };
        Prover::new(config)
    }

    #[test]
    fn every_algorithm_round_trips() {
        env_logger::try_init().ok();
        let prover = quick_prover();
        for alg in [Algorithm::Lattice, Algorithm::Hash, Algorithm::Multivariate, Algorithm::Hybrid] {
            let proof = prover.create_proof(alg, "a text secret").unwrap();
            assert_eq!(proof.algorithm(), alg);
            assert!(proof.envelope().quantum_safe);
            assert!(prover.verify_proof(&proof), "{alg} proof failed to verify");
            assert_eq!(proof.check(), Ok(()));
        }
    }

    #[test]
    fn byte_and_text_secrets_are_equivalent_inputs() {
        let prover = quick_prover();
        let text = prover.create_proof(Algorithm::Hash, "secret").unwrap();
        let bytes = prover.create_proof(Algorithm::Hash, b"secret".to_vec()).unwrap();
        assert!(text.verify() && bytes.verify());
    }

    #[test]
    fn invalid_configuration_surfaces_as_error() {
        let mut config = ProofConfig::default();
        config.hash.chain_length = 10;
        let err = Prover::new(config).create_proof(Algorithm::Hash, "x").unwrap_err();
        assert!(err.to_string().contains("chain length"));
    }
}
