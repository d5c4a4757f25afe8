//! Lattice (LWE) proofs.
//!
//! The secret is sliced into a vector `s` over `Z_q` and committed to through an LWE sample `b = <a, s> + e`. The
//! response is `s * c + w (mod q)` per component, where `w` is a uniformly random witness vector and `c` is the
//! challenge read as an integer. Every residue is framed at the modulus byte width, so the response length depends
//! only on the parameters.

use super::{check_envelope, check_len, check_response_differs, ProofEngine};
use crate::config::LatticeParams;
use crate::error::{ProofError, VerifyFailure};
use crate::primitives::arith::{
    bigints_to_buffer, buffer_to_bigints, modulus_width, pack_fixed_width, unpack_fixed_width,
};
use crate::primitives::hashing::{sha256, sha256_concat};
use crate::primitives::lattice::{generate_rlwe_polynomial, lwe_sample_for_secret};
use crate::primitives::random::random_below;
use crate::primitives::validation::Validate;
use crate::proof::{Algorithm, LatticeProof, ProofEnvelope};
use log::*;
use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

/// Degree of the ring element behind the polynomial commitment.
pub const RLWE_DEGREE: usize = 256;

#[derive(Clone, Debug, Default)]
pub struct LatticeEngine {
    params: LatticeParams,
}

impl LatticeEngine {
    pub fn new(params: LatticeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LatticeParams {
        &self.params
    }
}

impl ProofEngine for LatticeEngine {
    type Proof = LatticeProof;
    const ALGORITHM: Algorithm = Algorithm::Lattice;

    fn create_proof(&self, secret: &[u8]) -> Result<LatticeProof, ProofError> {
        self.params.validate()?;
        let LatticeParams { dimension, modulus: q, error_sigma } = &self.params;
        let width = modulus_width(q);

        let s: Vec<BigUint> = buffer_to_bigints(secret, *dimension)?.into_iter().map(|v| v % q).collect();
        let sample = lwe_sample_for_secret(&s, q, *error_sigma)?;
        let commitment = pack_fixed_width(std::slice::from_ref(&sample.b), width)?;

        let w: Vec<BigUint> = (0..*dimension).map(|_| random_below(q)).collect();
        let w_bytes = Zeroizing::new(bigints_to_buffer(&w));
        let a_bytes = bigints_to_buffer(&sample.a);
        let challenge = sha256_concat(&[commitment.as_slice(), w_bytes.as_slice(), a_bytes.as_slice()]);
        let c = BigUint::from_bytes_be(&challenge);
        let z: Vec<BigUint> = s.iter().zip(&w).map(|(s_i, w_i)| (s_i * &c + w_i) % q).collect();
        let response = pack_fixed_width(&z, width)?;

        let poly = generate_rlwe_polynomial(RLWE_DEGREE, q, *error_sigma)?;
        let polynomial_commitment = sha256(&pack_fixed_width(&poly, width)?).to_vec();

        debug!("Created lattice proof with dimension {dimension} over a {}-bit modulus", q.bits());
        Ok(LatticeProof {
            envelope: ProofEnvelope::new(commitment, challenge.to_vec(), response),
            parameters: self.params.clone(),
            dimension: *dimension,
            modulus: q.clone(),
            polynomial_commitment,
        })
    }

    fn check_proof(proof: &LatticeProof) -> Result<(), VerifyFailure> {
        let q = &proof.modulus;
        if q.is_zero() {
            return Err(VerifyFailure::OutOfRange("modulus"));
        }
        let width = modulus_width(q);
        let envelope = &proof.envelope;
        check_envelope(envelope, proof.dimension.saturating_mul(width))?;
        if proof.dimension != proof.parameters.dimension || *q != proof.parameters.modulus {
            return Err(VerifyFailure::Malformed("lattice shape disagrees with its parameters".into()));
        }

        let z = unpack_fixed_width(&envelope.response, width)?;
        if z.iter().any(|z_i| z_i >= q) {
            return Err(VerifyFailure::OutOfRange("response"));
        }
        check_len("commitment", &envelope.commitment, width)?;
        if BigUint::from_bytes_be(&envelope.commitment) >= *q {
            return Err(VerifyFailure::OutOfRange("commitment"));
        }
        if z.windows(2).all(|pair| pair[0] == pair[1]) {
            return Err(VerifyFailure::DegenerateResponse);
        }
        check_len("polynomial_commitment", &proof.polynomial_commitment, 32)?;
        check_response_differs(envelope)
    }
}
