mod rejection_reasons;

use crate::config::{HashParams, LatticeParams, ProofConfig};
use crate::primitives::arith::generate_large_prime;
use crate::prover::Prover;

/// A prover whose lattice and hash profiles sit at their minimum sizes.
fn quick_prover() -> Prover {
    let config = ProofConfig {
        lattice: LatticeParams { dimension: 128, modulus: generate_large_prime(128).unwrap(), error_sigma: 3.2 },
        hash: HashParams { chain_length: 100 },
        ..Default::default()
    };
    Prover::new(config)
}
