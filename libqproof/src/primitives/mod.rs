pub mod arith;
pub mod hashing;
pub mod lattice;
pub mod merkle;
pub mod multivariate;
pub mod random;
pub mod validation;

pub use arith::{
    bigints_to_buffer, buffer_to_bigints, default_modulus, generate_large_prime, is_probable_prime, mod_pow,
    DEFAULT_MILLER_RABIN_ROUNDS,
};
pub use hashing::{combine_hashes, create_hash_chain, hash, hmac, sha256, verify_hash_chain, HashVariant};
pub use lattice::{
    generate_discrete_gaussian_error, generate_lwe_sample, generate_rlwe_polynomial, polynomial_multiply, LweSample,
};
pub use merkle::{verify_merkle_proof, MerkleProof, MerkleTree};
pub use multivariate::{evaluate_multivariate_polynomial, generate_multivariate_system, PolynomialSystem};
pub use random::{generate_random_bigint, random_bytes};
pub use validation::{validate_parameters, ParameterSet, Validate};
