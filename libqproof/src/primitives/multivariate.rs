//! Multivariate polynomial systems over `Z / 2^64`.
//!
//! Each equation is a sum of independent univariate polynomials, one per variable:
//! `f_e(x) = Σ_v Σ_d c[e][v][d] · x_v^d (mod 2^64)`.
//!
//! Coefficients live in one flat arena addressed by `(equation, variable, degree)`; the serialized form is a header of
//! three big-endian `u32`s (equations, variables, degree) followed by every coefficient as a big-endian `u64`, in
//! arena order.

use crate::error::PrimitiveError;
use rand::RngCore;

const HEADER_LEN: usize = 12;
const COEFFICIENT_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolynomialSystem {
    equations: usize,
    variables: usize,
    degree: usize,
    coefficients: Vec<u64>,
}

impl PolynomialSystem {
    /// A system with every coefficient set to zero.
    pub fn zeroed(equations: usize, variables: usize, degree: usize) -> Result<Self, PrimitiveError> {
        let len = Self::arena_len(equations, variables, degree)?;
        Ok(Self { equations, variables, degree, coefficients: vec![0; len] })
    }

    fn arena_len(equations: usize, variables: usize, degree: usize) -> Result<usize, PrimitiveError> {
        if equations == 0 || variables == 0 || degree == 0 {
            return Err(PrimitiveError::InvalidLength);
        }
        equations
            .checked_mul(variables)
            .and_then(|n| n.checked_mul(degree + 1))
            .ok_or_else(|| PrimitiveError::MalformedSystem("system dimensions overflow".into()))
    }

    pub fn equations(&self) -> usize {
        self.equations
    }

    pub fn variables(&self) -> usize {
        self.variables
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    fn index(&self, equation: usize, variable: usize, degree: usize) -> usize {
        (equation * self.variables + variable) * (self.degree + 1) + degree
    }

    pub fn coefficient(&self, equation: usize, variable: usize, degree: usize) -> Option<u64> {
        if equation >= self.equations || variable >= self.variables || degree > self.degree {
            return None;
        }
        Some(self.coefficients[self.index(equation, variable, degree)])
    }

    pub fn set_coefficient(
        &mut self,
        equation: usize,
        variable: usize,
        degree: usize,
        value: u64,
    ) -> Result<(), PrimitiveError> {
        if equation >= self.equations || variable >= self.variables || degree > self.degree {
            let at = format!("({equation}, {variable}, {degree})");
            return Err(PrimitiveError::MalformedSystem(format!("no coefficient at {at}")));
        }
        let i = self.index(equation, variable, degree);
        self.coefficients[i] = value;
        Ok(())
    }

    /// Evaluate equation `equation` at `values` (one per variable), modulo 2^64.
    pub fn evaluate(&self, equation: usize, values: &[u64]) -> Result<u64, PrimitiveError> {
        if equation >= self.equations {
            return Err(PrimitiveError::IndexOutOfRange { index: equation, len: self.equations });
        }
        if values.len() != self.variables {
            return Err(PrimitiveError::LengthMismatch { left: values.len(), right: self.variables });
        }
        let stride = self.degree + 1;
        let start = equation * self.variables * stride;
        let terms = &self.coefficients[start..start + self.variables * stride];
        let value = terms.chunks(stride).zip(values).fold(0u64, |acc, (coeffs, x)| {
            // Horner, highest degree first
            let term = coeffs.iter().rev().fold(0u64, |t, c| t.wrapping_mul(*x).wrapping_add(*c));
            acc.wrapping_add(term)
        });
        Ok(value)
    }

    pub fn evaluate_all(&self, values: &[u64]) -> Result<Vec<u64>, PrimitiveError> {
        (0..self.equations).map(|e| self.evaluate(e, values)).collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PrimitiveError> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.coefficients.len() * COEFFICIENT_LEN);
        for dim in [self.equations, self.variables, self.degree] {
            let dim = u32::try_from(dim)
                .map_err(|_| PrimitiveError::MalformedSystem(format!("dimension {dim} does not fit the header")))?;
            out.extend_from_slice(&dim.to_be_bytes());
        }
        for c in &self.coefficients {
            out.extend_from_slice(&c.to_be_bytes());
        }
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitiveError> {
        if bytes.len() < HEADER_LEN {
            return Err(PrimitiveError::MalformedSystem(format!("{} bytes is too short for a header", bytes.len())));
        }
        let (header, body) = bytes.split_at(HEADER_LEN);
        let mut dims = header.chunks(4).map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]) as usize);
        let (equations, variables, degree) = match (dims.next(), dims.next(), dims.next()) {
            (Some(e), Some(v), Some(d)) => (e, v, d),
            _ => return Err(PrimitiveError::MalformedSystem("truncated header".into())),
        };
        let expected = Self::arena_len(equations, variables, degree)
            .map_err(|e| PrimitiveError::MalformedSystem(format!("bad dimensions: {e}")))?
            .checked_mul(COEFFICIENT_LEN)
            .ok_or_else(|| PrimitiveError::MalformedSystem("coefficient section overflows".into()))?;
        if body.len() != expected {
            return Err(PrimitiveError::MalformedSystem(format!(
                "expected {expected} coefficient bytes, found {}",
                body.len()
            )));
        }
        let coefficients = body
            .chunks(COEFFICIENT_LEN)
            .map(|c| u64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect();
        Ok(Self { equations, variables, degree, coefficients })
    }
}

/// Generate a system with uniformly random coefficients in `[0, 2^64)`.
pub fn generate_multivariate_system(
    variables: usize,
    equations: usize,
    degree: usize,
) -> Result<PolynomialSystem, PrimitiveError> {
    let mut system = PolynomialSystem::zeroed(equations, variables, degree)?;
    let mut rng = rand::rng();
    system.coefficients.iter_mut().for_each(|c| *c = rng.next_u64());
    Ok(system)
}

pub fn evaluate_multivariate_polynomial(
    system: &PolynomialSystem,
    equation: usize,
    values: &[u64],
) -> Result<u64, PrimitiveError> {
    system.evaluate(equation, values)
}

/// Encode words as consecutive big-endian `u64`s.
pub fn words_to_bytes(words: &[u64]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<u64>, PrimitiveError> {
    if bytes.len() % COEFFICIENT_LEN != 0 {
        return Err(PrimitiveError::LengthMismatch { left: bytes.len(), right: COEFFICIENT_LEN });
    }
    let words = bytes
        .chunks(COEFFICIENT_LEN)
        .map(|c| u64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
        .collect();
    Ok(words)
}
