//! Commitment-challenge-response proofs built on post-quantum style primitives.
//!
//! Four protocols are provided: a SHA-256 hash chain, a lattice (LWE) construction, a multivariate polynomial
//! system and a hybrid that binds several of the others together. Use [`Prover`] to create and verify any of them
//! from a single [`ProofConfig`], or drive an individual engine from [`engines`] directly.
//!
//! ```no_run
//! use libqproof::{Algorithm, ProofConfig, Prover};
//!
//! let prover = Prover::new(ProofConfig::default());
//! let proof = prover.create_proof(Algorithm::Hash, "my secret")?;
//! assert!(prover.verify_proof(&proof));
//! # Ok::<(), libqproof::ProofError>(())
//! ```
//!
//! The protocols are illustrative. They reproduce the structure and accept/reject behaviour of the constructions,
//! not their formal security properties.

pub mod config;
pub mod engines;
pub mod error;
pub mod helpers;
pub mod primitives;
pub mod proof;
pub mod prover;

pub use config::{HashParams, HybridParams, LatticeParams, MultivariateParams, ProofConfig};
pub use error::{PrimitiveError, ProofError, VerifyFailure};
pub use proof::{Algorithm, HashProof, HybridProof, LatticeProof, MultivariateProof, Proof, ProofEnvelope};
pub use prover::Prover;

#[cfg(test)]
mod tests;
