//! SHA-2 digests, HMAC, hash chains and hash folding.

use crate::error::PrimitiveError;
use digest::Digest;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};

/// The SHA-2 family members supported by [`hash`] and [`hmac`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashVariant {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashVariant {
    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            HashVariant::Sha256 => 32,
            HashVariant::Sha384 => 48,
            HashVariant::Sha512 => 64,
        }
    }
}

fn digest_with<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

pub fn hash(data: &[u8], variant: HashVariant) -> Vec<u8> {
    match variant {
        HashVariant::Sha256 => digest_with::<Sha256>(data),
        HashVariant::Sha384 => digest_with::<Sha384>(data),
        HashVariant::Sha512 => digest_with::<Sha512>(data),
    }
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    sha256_concat(&[data])
}

/// SHA-256 over the concatenation of `parts`, without allocating the concatenation.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

fn mac_with<M: Mac + KeyInit>(data: &[u8], key: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
    let mut mac = <M as KeyInit>::new_from_slice(key).map_err(|_| PrimitiveError::InvalidKey)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Keyed digest of `data` under `key`.
pub fn hmac(data: &[u8], key: &[u8], variant: HashVariant) -> Result<Vec<u8>, PrimitiveError> {
    match variant {
        HashVariant::Sha256 => mac_with::<Hmac<Sha256>>(data, key),
        HashVariant::Sha384 => mac_with::<Hmac<Sha384>>(data, key),
        HashVariant::Sha512 => mac_with::<Hmac<Sha512>>(data, key),
    }
}

/// Build a hash chain of `length` links: `chain[0] = sha256(seed)` and `chain[i] = sha256(chain[i-1])`.
pub fn create_hash_chain(seed: &[u8], length: usize) -> Result<Vec<[u8; 32]>, PrimitiveError> {
    if length == 0 {
        return Err(PrimitiveError::InvalidLength);
    }
    let mut chain = Vec::with_capacity(length);
    let mut link = sha256(seed);
    chain.push(link);
    for _ in 1..length {
        link = sha256(&link);
        chain.push(link);
    }
    Ok(chain)
}

/// Returns the index of the first link that is not the digest of its predecessor.
pub fn first_broken_link(chain: &[[u8; 32]]) -> Option<usize> {
    chain.windows(2).position(|pair| sha256(&pair[0]) != pair[1]).map(|i| i + 1)
}

pub fn verify_hash_chain(chain: &[[u8; 32]]) -> bool {
    !chain.is_empty() && first_broken_link(chain).is_none()
}

/// Order-independent combination of digests.
///
/// The digests are XORed together (shorter inputs are zero-extended) and the accumulator is hashed once with
/// SHA-256, so any permutation of the same inputs yields the same result.
pub fn combine_hashes<H: AsRef<[u8]>>(hashes: &[H]) -> Result<[u8; 32], PrimitiveError> {
    if hashes.is_empty() {
        return Err(PrimitiveError::EmptyInput("no hashes to combine"));
    }
    let width = hashes.iter().map(|h| h.as_ref().len()).max().unwrap_or(0);
    let mut acc = vec![0u8; width];
    for h in hashes {
        acc.iter_mut().zip(h.as_ref()).for_each(|(a, b)| *a ^= b);
    }
    Ok(sha256(&acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_lengths() {
        assert_eq!(hash(b"abc", HashVariant::Sha256).len(), 32);
        assert_eq!(hash(b"abc", HashVariant::Sha384).len(), 48);
        assert_eq!(hash(b"abc", HashVariant::Sha512).len(), 64);
        assert_eq!(hash(b"abc", HashVariant::Sha512), hash(b"abc", HashVariant::Sha512));
    }

    #[test]
    fn sha256_known_answer() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(sha256_concat(&[b"a".as_slice(), b"bc".as_slice()]), sha256(b"abc"));
    }

    #[test]
    fn hmac_sha256_known_answer() {
        // RFC 4231 test case 2
        let mac = hmac(b"what do ya want for nothing?", b"Jefe", HashVariant::Sha256).unwrap();
        assert_eq!(hex::encode(mac), "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843");
        assert_eq!(hmac(b"data", b"key", HashVariant::Sha384).unwrap().len(), 48);
        assert_ne!(
            hmac(b"data", b"key", HashVariant::Sha256).unwrap(),
            hmac(b"data", b"yek", HashVariant::Sha256).unwrap()
        );
    }

    #[test]
    fn hash_chain_links() {
        let chain = create_hash_chain(b"seed", 10).unwrap();
        assert_eq!(chain.len(), 10);
        assert_eq!(chain[0], sha256(b"seed"));
        assert!(verify_hash_chain(&chain));
        assert_eq!(create_hash_chain(b"seed", 0), Err(PrimitiveError::InvalidLength));
    }

    #[test]
    fn altered_link_is_detected() {
        let mut chain = create_hash_chain(b"seed", 8).unwrap();
        chain[4][0] ^= 1;
        assert!(!verify_hash_chain(&chain));
        assert_eq!(first_broken_link(&chain), Some(4));
        assert!(!verify_hash_chain(&[]));
        assert!(verify_hash_chain(&chain[..1]));
    }

    #[test]
    fn combine_is_order_independent() {
        let a = sha256(b"a");
        let b = sha256(b"b");
        let c = sha256(b"c");
        let forward = combine_hashes(&[a, b, c]).unwrap();
        let backward = combine_hashes(&[c, b, a]).unwrap();
        assert_eq!(forward, backward);
        assert_ne!(forward, combine_hashes(&[a, b]).unwrap());
        let empty: [[u8; 32]; 0] = [];
        assert!(matches!(combine_hashes(&empty), Err(PrimitiveError::EmptyInput(_))));
    }
}
