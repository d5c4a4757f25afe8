//! LWE / RLWE sampling and ring arithmetic.

use crate::error::PrimitiveError;
use crate::primitives::random::random_below;
use num_bigint::BigUint;
use num_traits::Zero;
use rand::Rng;
use std::f64::consts::PI;

/// A single Learning-With-Errors pair `(a, b = <a, s> + e mod q)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LweSample {
    pub a: Vec<BigUint>,
    pub b: BigUint,
}

impl LweSample {
    pub fn dimension(&self) -> usize {
        self.a.len()
    }
}

/// Sample a rounded Gaussian error with standard deviation `sigma` using the Box–Muller transform.
///
/// The result is clamped to `[-3σ, 3σ]`. A non-positive or non-finite `sigma` yields zero.
pub fn generate_discrete_gaussian_error(sigma: f64) -> i64 {
    if !(sigma > 0.0 && sigma.is_finite()) {
        return 0;
    }
    let mut rng = rand::rng();
    // u1 in (0, 1] so that ln(u1) is finite
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    let bound = (3.0 * sigma).floor();
    (z * sigma).round().clamp(-bound, bound) as i64
}

/// `(value + error) mod modulus` for a signed error term.
fn add_signed_mod(value: BigUint, error: i64, modulus: &BigUint) -> BigUint {
    let magnitude = BigUint::from(error.unsigned_abs()) % modulus;
    if error >= 0 {
        (value + magnitude) % modulus
    } else {
        (value + modulus - magnitude) % modulus
    }
}

/// Build an LWE sample for a caller-provided secret vector.
pub fn lwe_sample_for_secret(secret: &[BigUint], modulus: &BigUint, sigma: f64) -> Result<LweSample, PrimitiveError> {
    if modulus.is_zero() {
        return Err(PrimitiveError::ZeroModulus);
    }
    if secret.is_empty() {
        return Err(PrimitiveError::EmptyInput("LWE secret vector"));
    }
    let a: Vec<BigUint> = (0..secret.len()).map(|_| random_below(modulus)).collect();
    let inner = a.iter().zip(secret).fold(BigUint::zero(), |acc, (a_i, s_i)| (acc + a_i * s_i) % modulus);
    let b = add_signed_mod(inner, generate_discrete_gaussian_error(sigma), modulus);
    Ok(LweSample { a, b })
}

/// Sample a uniformly random secret of length `dimension` and an LWE pair for it.
pub fn generate_lwe_sample(
    dimension: usize,
    modulus: &BigUint,
    sigma: f64,
) -> Result<(LweSample, Vec<BigUint>), PrimitiveError> {
    if dimension == 0 {
        return Err(PrimitiveError::InvalidLength);
    }
    if modulus.is_zero() {
        return Err(PrimitiveError::ZeroModulus);
    }
    let secret: Vec<BigUint> = (0..dimension).map(|_| random_below(modulus)).collect();
    let sample = lwe_sample_for_secret(&secret, modulus, sigma)?;
    Ok((sample, secret))
}

/// Sample the coefficients of a noisy ring element in `Z_q[x] / (x^degree - 1)`.
pub fn generate_rlwe_polynomial(degree: usize, modulus: &BigUint, sigma: f64) -> Result<Vec<BigUint>, PrimitiveError> {
    if !degree.is_power_of_two() {
        return Err(PrimitiveError::InvalidDegree(degree));
    }
    if modulus.is_zero() {
        return Err(PrimitiveError::ZeroModulus);
    }
    let coefficients = (0..degree)
        .map(|_| add_signed_mod(random_below(modulus), generate_discrete_gaussian_error(sigma), modulus))
        .collect();
    Ok(coefficients)
}

/// Cyclic convolution of `a` and `b` modulo `x^n - 1` and `modulus`.
pub fn polynomial_multiply(a: &[BigUint], b: &[BigUint], modulus: &BigUint) -> Result<Vec<BigUint>, PrimitiveError> {
    if modulus.is_zero() {
        return Err(PrimitiveError::ZeroModulus);
    }
    if a.is_empty() || b.is_empty() {
        return Err(PrimitiveError::EmptyInput("polynomial operand"));
    }
    if a.len() != b.len() {
        return Err(PrimitiveError::LengthMismatch { left: a.len(), right: b.len() });
    }
    let n = a.len();
    let mut product = vec![BigUint::zero(); n];
    for (i, a_i) in a.iter().enumerate() {
        if a_i.is_zero() {
            continue;
        }
        for (j, b_j) in b.iter().enumerate() {
            let k = (i + j) % n;
            product[k] = (&product[k] + a_i * b_j) % modulus;
        }
    }
    Ok(product)
}
