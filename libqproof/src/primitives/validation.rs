//! Numeric gates applied to every parameter profile before any cryptographic work starts.

use crate::config::{HashParams, HybridParams, LatticeParams, MultivariateParams};
use crate::error::ProofError;
use crate::proof::Algorithm;
use num_traits::Zero;

pub const MIN_LATTICE_DIMENSION: usize = 128;
pub const MIN_CHAIN_LENGTH: usize = 100;
pub const MIN_VARIABLES: usize = 8;
pub const MAX_MULTIVARIATE_DEGREE: usize = 2;
pub const MIN_HYBRID_ALGORITHMS: usize = 2;

pub trait Validate {
    fn validate(&self) -> Result<(), ProofError>;
}

impl Validate for LatticeParams {
    fn validate(&self) -> Result<(), ProofError> {
        if self.dimension < MIN_LATTICE_DIMENSION {
            return Err(ProofError::invalid(format!(
                "lattice dimension {} is below the minimum of {MIN_LATTICE_DIMENSION}",
                self.dimension
            )));
        }
        if self.modulus.is_zero() {
            return Err(ProofError::invalid("lattice modulus must be positive"));
        }
        if !(self.error_sigma > 0.0 && self.error_sigma.is_finite()) {
            return Err(ProofError::invalid(format!("error sigma {} must be positive", self.error_sigma)));
        }
        Ok(())
    }
}

impl Validate for HashParams {
    fn validate(&self) -> Result<(), ProofError> {
        if self.chain_length < MIN_CHAIN_LENGTH {
            return Err(ProofError::invalid(format!(
                "hash chain length {} is below the minimum of {MIN_CHAIN_LENGTH}",
                self.chain_length
            )));
        }
        Ok(())
    }
}

impl Validate for MultivariateParams {
    fn validate(&self) -> Result<(), ProofError> {
        if self.variables < MIN_VARIABLES {
            return Err(ProofError::invalid(format!(
                "{} variables is below the minimum of {MIN_VARIABLES}",
                self.variables
            )));
        }
        if self.equations < self.variables {
            return Err(ProofError::invalid(format!(
                "{} equations cannot constrain {} variables",
                self.equations, self.variables
            )));
        }
        if self.degree == 0 || self.degree > MAX_MULTIVARIATE_DEGREE {
            return Err(ProofError::invalid(format!(
                "degree {} is outside 1..={MAX_MULTIVARIATE_DEGREE}",
                self.degree
            )));
        }
        Ok(())
    }
}

impl Validate for HybridParams {
    fn validate(&self) -> Result<(), ProofError> {
        if self.algorithms.contains(&Algorithm::Hybrid) {
            return Err(ProofError::invalid("a hybrid proof cannot contain another hybrid proof"));
        }
        let count = self.algorithms.len();
        if count < MIN_HYBRID_ALGORITHMS {
            return Err(ProofError::invalid(format!(
                "hybrid proofs need at least {MIN_HYBRID_ALGORITHMS} algorithms, got {count}"
            )));
        }
        Ok(())
    }
}

/// A borrowed parameter profile for any algorithm.
#[derive(Clone, Copy, Debug)]
pub enum ParameterSet<'a> {
    Lattice(&'a LatticeParams),
    Hash(&'a HashParams),
    Multivariate(&'a MultivariateParams),
    Hybrid(&'a HybridParams),
}

impl ParameterSet<'_> {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            ParameterSet::Lattice(_) => Algorithm::Lattice,
            ParameterSet::Hash(_) => Algorithm::Hash,
            ParameterSet::Multivariate(_) => Algorithm::Multivariate,
            ParameterSet::Hybrid(_) => Algorithm::Hybrid,
        }
    }
}

impl Validate for ParameterSet<'_> {
    fn validate(&self) -> Result<(), ProofError> {
        match self {
            ParameterSet::Lattice(p) => p.validate(),
            ParameterSet::Hash(p) => p.validate(),
            ParameterSet::Multivariate(p) => p.validate(),
            ParameterSet::Hybrid(p) => p.validate(),
        }
    }
}

/// Returns whether `params` passes the numeric gate for its algorithm.
pub fn validate_parameters(params: &ParameterSet) -> bool {
    params.validate().is_ok()
}
