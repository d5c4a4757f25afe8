//! Big-integer arithmetic: modular exponentiation, primality and byte packing.

use crate::error::PrimitiveError;
use crate::primitives::random::generate_random_bigint;
use num_bigint::BigUint;
use num_traits::{One, Zero};

pub const DEFAULT_MILLER_RABIN_ROUNDS: u32 = 40;
pub const MIN_PRIME_BITS: u64 = 64;

/// The 1024-bit MODP prime from RFC 2409 (Oakley group 2).
const OAKLEY_GROUP2_PRIME_HEX: &str = "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74\
020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245E485B576625E7EC6F44C42E9A6\
37ED6B0BFF5CB6F406B7EDEE386BFB5A899FA5AE9F24117C4B1FE649286651ECE65381FFFFFFFFFFFFFFFF";

const SMALL_PRIMES: [u32; 24] =
    [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97];

/// The default lattice modulus: a fixed, well-known 1024-bit prime.
pub fn default_modulus() -> BigUint {
    BigUint::parse_bytes(OAKLEY_GROUP2_PRIME_HEX.as_bytes(), 16).unwrap_or_default()
}

/// `base^exponent mod modulus` by binary square-and-multiply.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint, PrimitiveError> {
    if modulus.is_zero() {
        return Err(PrimitiveError::ZeroModulus);
    }
    if modulus.is_one() {
        return Ok(BigUint::zero());
    }
    let mut result = BigUint::one();
    let mut square = base % modulus;
    let bits = exponent.bits();
    for i in 0..bits {
        if exponent.bit(i) {
            result = (&result * &square) % modulus;
        }
        if i + 1 < bits {
            square = (&square * &square) % modulus;
        }
    }
    Ok(result)
}

/// Miller–Rabin probabilistic primality test with `rounds` random bases.
pub fn is_probable_prime(n: &BigUint, rounds: u32) -> bool {
    let two = BigUint::from(2u32);
    if *n <= BigUint::one() {
        return false;
    }
    if *n == two || *n == BigUint::from(3u32) {
        return true;
    }
    if !n.bit(0) {
        return false;
    }
    let n_minus_one = n - 1u32;
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;

    'witness: for _ in 0..rounds {
        let Ok(a) = generate_random_bigint(&two, &n_minus_one) else {
            return false;
        };
        let Ok(mut x) = mod_pow(&a, &d, n) else {
            return false;
        };
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..r {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn has_small_factor(candidate: &BigUint) -> bool {
    SMALL_PRIMES.iter().any(|p| (candidate % *p).is_zero())
}

/// Generate a probable prime of exactly `bits` bits.
///
/// An odd starting point is sampled in `[2^(bits-1), 2^bits - 1]` and stepped by 2 until the Miller–Rabin test
/// accepts. Stepping past the top of the range wraps back to the first odd value above the floor.
pub fn generate_large_prime(bits: u64) -> Result<BigUint, PrimitiveError> {
    if bits < MIN_PRIME_BITS {
        return Err(PrimitiveError::ParameterTooSmall { got: bits, min: MIN_PRIME_BITS });
    }
    let floor = BigUint::one() << (bits - 1);
    let ceiling = (BigUint::one() << bits) - 1u32;
    let mut candidate = generate_random_bigint(&floor, &(&ceiling + 1u32))?;
    candidate.set_bit(0, true);
    loop {
        if candidate > ceiling {
            candidate = &floor + 1u32;
        }
        if !has_small_factor(&candidate) && is_probable_prime(&candidate, DEFAULT_MILLER_RABIN_ROUNDS) {
            return Ok(candidate);
        }
        candidate += 2u32;
    }
}

/// Split `bytes` into `count` big-endian integers.
///
/// Slices have the ceiling size `len / count`; trailing slices that run past the end of the buffer are empty and
/// read as zero.
pub fn buffer_to_bigints(bytes: &[u8], count: usize) -> Result<Vec<BigUint>, PrimitiveError> {
    if count == 0 {
        return Err(PrimitiveError::InvalidLength);
    }
    let len = bytes.len();
    let size = len.div_ceil(count);
    let ints = (0..count)
        .map(|i| {
            let start = (i * size).min(len);
            let end = ((i + 1) * size).min(len);
            BigUint::from_bytes_be(&bytes[start..end])
        })
        .collect();
    Ok(ints)
}

/// Concatenate the minimal big-endian encodings of `ints`.
///
/// This matches packing each value as an even-length hex string; zero encodes as a single `0x00` byte.
pub fn bigints_to_buffer(ints: &[BigUint]) -> Vec<u8> {
    ints.iter().flat_map(|v| v.to_bytes_be()).collect()
}

/// Number of bytes needed to hold any residue of `modulus`.
pub fn modulus_width(modulus: &BigUint) -> usize {
    modulus.bits().div_ceil(8) as usize
}

/// Encode each value as exactly `width` big-endian bytes.
pub fn pack_fixed_width(ints: &[BigUint], width: usize) -> Result<Vec<u8>, PrimitiveError> {
    let mut out = Vec::with_capacity(ints.len() * width);
    for v in ints {
        let bytes = v.to_bytes_be();
        if bytes.len() > width {
            return Err(PrimitiveError::LengthMismatch { left: bytes.len(), right: width });
        }
        out.resize(out.len() + width - bytes.len(), 0);
        out.extend_from_slice(&bytes);
    }
    Ok(out)
}

pub fn unpack_fixed_width(bytes: &[u8], width: usize) -> Result<Vec<BigUint>, PrimitiveError> {
    if width == 0 {
        return Err(PrimitiveError::InvalidLength);
    }
    if bytes.len() % width != 0 {
        return Err(PrimitiveError::LengthMismatch { left: bytes.len(), right: width });
    }
    Ok(bytes.chunks(width).map(BigUint::from_bytes_be).collect())
}
