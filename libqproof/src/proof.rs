use crate::config::{HashParams, HybridParams, LatticeParams, MultivariateParams};
use crate::helpers::{array_from_hex, array_to_hex, biguint_from_hex, biguint_to_hex, digests_from_hex, digests_to_hex};
use crate::helpers::{from_hex, to_hex};
use crate::primitives::merkle::MerkleProof;
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Serialization format version stamped on every proof.
pub const PROOF_FORMAT_VERSION: &str = "1.0.0";

/// The ASCII marker whose presence in any proof field causes rejection.
pub const CORRUPTION_MARKER: &[u8] = b"corrupted";

/// The closed set of proof protocols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Lattice,
    Hash,
    Multivariate,
    Hybrid,
}

impl Algorithm {
    pub const BASE: [Algorithm; 3] = [Algorithm::Lattice, Algorithm::Hash, Algorithm::Multivariate];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Lattice => "lattice",
            Algorithm::Hash => "hash",
            Algorithm::Multivariate => "multivariate",
            Algorithm::Hybrid => "hybrid",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown proof algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lattice" => Ok(Algorithm::Lattice),
            "hash" => Ok(Algorithm::Hash),
            "multivariate" => Ok(Algorithm::Multivariate),
            "hybrid" => Ok(Algorithm::Hybrid),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Algorithm {
    type Error = UnknownAlgorithm;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Fields shared by every proof variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofEnvelope {
    #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
    pub commitment: Vec<u8>,
    #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
    pub challenge: Vec<u8>,
    #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
    pub response: Vec<u8>,
    pub quantum_safe: bool,
    pub created_at: DateTime<Utc>,
    pub version: String,
}

impl ProofEnvelope {
    pub fn new(commitment: Vec<u8>, challenge: Vec<u8>, response: Vec<u8>) -> Self {
        Self {
            commitment,
            challenge,
            response,
            quantum_safe: true,
            created_at: Utc::now(),
            version: PROOF_FORMAT_VERSION.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HashProof {
    pub envelope: ProofEnvelope,
    pub parameters: HashParams,
    pub chain_length: usize,
    #[serde(serialize_with = "digests_to_hex", deserialize_with = "digests_from_hex")]
    pub hash_chain: Vec<[u8; 32]>,
    #[serde(serialize_with = "array_to_hex", deserialize_with = "array_from_hex")]
    pub merkle_root: [u8; 32],
    /// Inclusion proof for the first chain link (the commitment).
    pub merkle_proof: MerkleProof,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeProof {
    pub envelope: ProofEnvelope,
    pub parameters: LatticeParams,
    pub dimension: usize,
    #[serde(serialize_with = "biguint_to_hex", deserialize_with = "biguint_from_hex")]
    pub modulus: BigUint,
    #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
    pub polynomial_commitment: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultivariateProof {
    pub envelope: ProofEnvelope,
    pub parameters: MultivariateParams,
    pub variables: usize,
    pub equations: usize,
    #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
    pub polynomial_system: Vec<u8>,
    /// One big-endian `u64` per equation.
    #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
    pub solution: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HybridProof {
    pub envelope: ProofEnvelope,
    pub parameters: HybridParams,
    pub components: Vec<Proof>,
    #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
    pub combined: Vec<u8>,
    pub weights: BTreeMap<Algorithm, f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum Proof {
    Lattice(LatticeProof),
    Hash(HashProof),
    Multivariate(MultivariateProof),
    Hybrid(HybridProof),
}

impl Proof {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Proof::Lattice(_) => Algorithm::Lattice,
            Proof::Hash(_) => Algorithm::Hash,
            Proof::Multivariate(_) => Algorithm::Multivariate,
            Proof::Hybrid(_) => Algorithm::Hybrid,
        }
    }

    pub fn envelope(&self) -> &ProofEnvelope {
        match self {
            Proof::Lattice(p) => &p.envelope,
            Proof::Hash(p) => &p.envelope,
            Proof::Multivariate(p) => &p.envelope,
            Proof::Hybrid(p) => &p.envelope,
        }
    }

    pub fn envelope_mut(&mut self) -> &mut ProofEnvelope {
        match self {
            Proof::Lattice(p) => &mut p.envelope,
            Proof::Hash(p) => &mut p.envelope,
            Proof::Multivariate(p) => &mut p.envelope,
            Proof::Hybrid(p) => &mut p.envelope,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<HashProof> for Proof {
    fn from(p: HashProof) -> Self {
        Proof::Hash(p)
    }
}

impl From<LatticeProof> for Proof {
    fn from(p: LatticeProof) -> Self {
        Proof::Lattice(p)
    }
}

impl From<MultivariateProof> for Proof {
    fn from(p: MultivariateProof) -> Self {
        Proof::Multivariate(p)
    }
}

impl From<HybridProof> for Proof {
    fn from(p: HybridProof) -> Self {
        Proof::Hybrid(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names() {
        for alg in [Algorithm::Lattice, Algorithm::Hash, Algorithm::Multivariate, Algorithm::Hybrid] {
            assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), alg);
        }
        assert_eq!(Algorithm::try_from("LATTICE").unwrap(), Algorithm::Lattice);
        assert_eq!("rsa".parse::<Algorithm>(), Err(UnknownAlgorithm("rsa".into())));
        assert_eq!(serde_json::to_string(&Algorithm::Multivariate).unwrap(), "\"multivariate\"");
    }

    #[test]
    fn envelope_defaults() {
        let env = ProofEnvelope::new(vec![1], vec![2; 32], vec![3]);
        assert!(env.quantum_safe);
        assert_eq!(env.version, PROOF_FORMAT_VERSION);
        let json = serde_json::to_string(&env).unwrap();
        assert!(json.contains("\"commitment\":\"01\""));
        let back: ProofEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }
}
