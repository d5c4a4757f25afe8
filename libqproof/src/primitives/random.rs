use crate::error::PrimitiveError;
use num_bigint::BigUint;
use num_traits::Zero;
use rand::RngCore;

/// Fill a fresh buffer of `n` bytes from the thread-local CSPRNG.
pub fn random_bytes(n: usize) -> Result<Vec<u8>, PrimitiveError> {
    if n == 0 {
        return Err(PrimitiveError::InvalidLength);
    }
    let mut buf = vec![0u8; n];
    rand::rng().fill_bytes(&mut buf);
    Ok(buf)
}

pub fn random_array<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    rand::rng().fill_bytes(&mut out);
    out
}

/// Sample a value in `[0, bound)`. Returns zero for a zero bound.
///
/// Random bytes sized to the bound's bit length are reduced modulo the bound, so the distribution carries a small
/// modulo bias. This is acceptable for the illustrative protocols in this crate.
pub fn random_below(bound: &BigUint) -> BigUint {
    if bound.is_zero() {
        return BigUint::zero();
    }
    let len = bound.bits().div_ceil(8) as usize;
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    BigUint::from_bytes_be(&buf) % bound
}

/// Sample a value in `[min, max)`.
pub fn generate_random_bigint(min: &BigUint, max: &BigUint) -> Result<BigUint, PrimitiveError> {
    if min >= max {
        return Err(PrimitiveError::EmptyRange);
    }
    let width = max - min;
    Ok(min + random_below(&width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_rejects_zero_length() {
        assert_eq!(random_bytes(0), Err(PrimitiveError::InvalidLength));
        let bytes = random_bytes(48).unwrap();
        assert_eq!(bytes.len(), 48);
        assert_ne!(random_bytes(32).unwrap(), random_bytes(32).unwrap());
    }

    #[test]
    fn random_bigint_stays_in_range() {
        let min = BigUint::from(1_000u32);
        let max = BigUint::from(1_017u32);
        for _ in 0..200 {
            let v = generate_random_bigint(&min, &max).unwrap();
            assert!(v >= min && v < max);
        }
        assert_eq!(generate_random_bigint(&max, &min), Err(PrimitiveError::EmptyRange));
        assert_eq!(generate_random_bigint(&min, &min), Err(PrimitiveError::EmptyRange));
    }

    #[test]
    fn random_below_zero_is_zero() {
        assert!(random_below(&BigUint::zero()).is_zero());
        assert!(random_below(&BigUint::from(1u32)).is_zero());
    }
}
