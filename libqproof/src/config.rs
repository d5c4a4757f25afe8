//! Parameter profiles for every proof algorithm.
//!
//! A [`ProofConfig`] is built once (from defaults or a file) and handed to the [`Prover`](crate::prover::Prover);
//! engines never read global state. Files may be RON (`.ron`), YAML (`.yml`, `.yaml`) or JSON (`.json`).

use crate::error::PrimitiveError;
use crate::helpers::{biguint_from_hex, biguint_to_hex};
use crate::primitives::arith::{default_modulus, generate_large_prime};
use crate::proof::Algorithm;
use anyhow::anyhow;
use log::*;
use num_bigint::BigUint;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_LATTICE_DIMENSION: usize = 256;
pub const DEFAULT_ERROR_SIGMA: f64 = 3.2;
pub const DEFAULT_CHAIN_LENGTH: usize = 1000;
pub const DEFAULT_VARIABLES: usize = 8;
pub const DEFAULT_EQUATIONS: usize = 12;
pub const DEFAULT_DEGREE: usize = 2;
/// Weight assumed for a hybrid component with no configured weight.
pub const FALLBACK_WEIGHT: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeParams {
    pub dimension: usize,
    #[serde(serialize_with = "biguint_to_hex", deserialize_with = "biguint_from_hex")]
    pub modulus: BigUint,
    pub error_sigma: f64,
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self { dimension: DEFAULT_LATTICE_DIMENSION, modulus: default_modulus(), error_sigma: DEFAULT_ERROR_SIGMA }
    }
}

impl LatticeParams {
    /// Replace the modulus with a freshly generated probable prime of `bits` bits.
    pub fn with_fresh_modulus(self, bits: u64) -> Result<Self, PrimitiveError> {
        let modulus = generate_large_prime(bits)?;
        debug!("Generated a fresh {bits}-bit lattice modulus");
        Ok(Self { modulus, ..self })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashParams {
    pub chain_length: usize,
}

impl Default for HashParams {
    fn default() -> Self {
        Self { chain_length: DEFAULT_CHAIN_LENGTH }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultivariateParams {
    pub variables: usize,
    pub equations: usize,
    pub degree: usize,
}

impl Default for MultivariateParams {
    fn default() -> Self {
        Self { variables: DEFAULT_VARIABLES, equations: DEFAULT_EQUATIONS, degree: DEFAULT_DEGREE }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridParams {
    pub algorithms: Vec<Algorithm>,
    /// Per-component weights. They are informational and need not sum to one.
    pub weights: BTreeMap<Algorithm, f64>,
}

impl Default for HybridParams {
    fn default() -> Self {
        let weights = [(Algorithm::Lattice, 0.4), (Algorithm::Hash, 0.3), (Algorithm::Multivariate, 0.3)];
        Self { algorithms: Algorithm::BASE.to_vec(), weights: weights.into_iter().collect() }
    }
}

impl HybridParams {
    pub fn new(algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        Self { algorithms: algorithms.into_iter().collect(), ..Default::default() }
    }

    /// The requested algorithms with duplicates removed, in first-seen order.
    pub fn distinct_algorithms(&self) -> Vec<Algorithm> {
        let mut seen = Vec::with_capacity(self.algorithms.len());
        for alg in &self.algorithms {
            if !seen.contains(alg) {
                seen.push(*alg);
            }
        }
        seen
    }

    pub fn weight_for(&self, algorithm: Algorithm) -> f64 {
        self.weights.get(&algorithm).copied().unwrap_or(FALLBACK_WEIGHT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConfigFormat {
    Ron,
    Yaml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, anyhow::Error> {
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("ron") => Ok(ConfigFormat::Ron),
            Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(anyhow!("Unsupported configuration file extension: {}", path.display())),
        }
    }
}

/// The parameter profile for each algorithm.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofConfig {
    pub lattice: LatticeParams,
    pub hash: HashParams,
    pub multivariate: MultivariateParams,
    pub hybrid: HybridParams,
}

impl ProofConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let config = match format {
            ConfigFormat::Ron => ron::de::from_str(&text)?,
            ConfigFormat::Yaml => serde_yml::from_str(&text)?,
            ConfigFormat::Json => serde_json::from_str(&text)?,
        };
        info!("Loaded proof configuration from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), anyhow::Error> {
        let path = path.as_ref();
        let text = match ConfigFormat::from_path(path)? {
            ConfigFormat::Ron => self.to_ron()?,
            ConfigFormat::Yaml => self.to_yml()?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        };
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn to_ron(&self) -> Result<String, anyhow::Error> {
        let config = PrettyConfig::new().compact_arrays(true).compact_maps(true);
        let val = ron::ser::to_string_pretty(self, config)?;
        Ok(val)
    }

    pub fn to_yml(&self) -> Result<String, anyhow::Error> {
        let s = serde_yml::to_string(self)?;
        Ok(s)
    }
}
