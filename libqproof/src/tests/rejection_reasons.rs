//! Each rejection reason, provoked on an otherwise valid proof.

use super::quick_prover;
use crate::error::VerifyFailure;
use crate::proof::{Algorithm, Proof};

fn proof_for(alg: Algorithm) -> Proof {
    quick_prover().create_proof(alg, "rejection reasons").unwrap()
}

#[test]
fn corruption_marker() {
    env_logger::try_init().ok();
    let proof = proof_for(Algorithm::Hash);

    let mut bad = proof.clone();
    bad.envelope_mut().challenge = b"corrupted".to_vec();
    assert_eq!(bad.check(), Err(VerifyFailure::Corrupted("challenge")));

    let mut bad = proof.clone();
    bad.envelope_mut().response[10..19].copy_from_slice(b"corrupted");
    assert_eq!(bad.check(), Err(VerifyFailure::Corrupted("response")));

    let mut bad = proof;
    bad.envelope_mut().commitment = b"corrupted".to_vec();
    assert_eq!(bad.check(), Err(VerifyFailure::Corrupted("commitment")));
    assert!(!bad.verify());
}

#[test]
fn response_length_is_checked_first() {
    let mut bad = proof_for(Algorithm::Multivariate);
    bad.envelope_mut().response.push(0);
    bad.envelope_mut().challenge = b"corrupted".to_vec();
    assert_eq!(bad.check(), Err(VerifyFailure::BadLength { field: "response", expected: 64, actual: 65 }));
}

#[test]
fn challenge_length() {
    let mut bad = proof_for(Algorithm::Lattice);
    bad.envelope_mut().challenge.truncate(16);
    assert_eq!(bad.check(), Err(VerifyFailure::BadLength { field: "challenge", expected: 32, actual: 16 }));
}

#[test]
fn empty_hash_chain() {
    let Proof::Hash(mut hash) = proof_for(Algorithm::Hash) else { panic!("expected a hash proof") };
    hash.hash_chain.clear();
    assert_eq!(Proof::Hash(hash).check(), Err(VerifyFailure::Empty("hash_chain")));
}

#[test]
fn out_of_range_response() {
    let Proof::Lattice(mut lattice) = proof_for(Algorithm::Lattice) else { panic!("expected a lattice proof") };
    let len = lattice.envelope.response.len();
    lattice.envelope.response[len - 16..].fill(0xff);
    assert_eq!(Proof::Lattice(lattice).check(), Err(VerifyFailure::OutOfRange("response")));
}

#[test]
fn degenerate_response() {
    let Proof::Lattice(mut lattice) = proof_for(Algorithm::Lattice) else { panic!("expected a lattice proof") };
    let width = lattice.envelope.response.len() / lattice.dimension;
    let first = lattice.envelope.response[..width].to_vec();
    lattice.envelope.response = first.repeat(lattice.dimension);
    assert_eq!(Proof::Lattice(lattice).check(), Err(VerifyFailure::DegenerateResponse));
}

#[test]
fn response_equal_to_challenge() {
    let mut bad = proof_for(Algorithm::Hybrid);
    let challenge = bad.envelope().challenge.clone();
    bad.envelope_mut().response = challenge;
    assert_eq!(bad.check(), Err(VerifyFailure::ResponseMatchesChallenge));
}

#[test]
fn merkle_mismatch() {
    let Proof::Hash(mut hash) = proof_for(Algorithm::Hash) else { panic!("expected a hash proof") };
    hash.merkle_proof.siblings[0][31] ^= 0x80;
    assert_eq!(Proof::Hash(hash).check(), Err(VerifyFailure::MerkleMismatch));
}

#[test]
fn broken_chain() {
    let Proof::Hash(mut hash) = proof_for(Algorithm::Hash) else { panic!("expected a hash proof") };
    let last = hash.hash_chain.len() - 1;
    hash.hash_chain[last] = [0u8; 32];
    assert_eq!(Proof::Hash(hash).check(), Err(VerifyFailure::BrokenChain(last)));
}

#[test]
fn commitment_mismatch() {
    let mut bad = proof_for(Algorithm::Hash);
    bad.envelope_mut().commitment[0] ^= 0x01;
    assert_eq!(bad.check(), Err(VerifyFailure::CommitmentMismatch));
}

#[test]
fn malformed_system() {
    let Proof::Multivariate(mut mv) = proof_for(Algorithm::Multivariate) else {
        panic!("expected a multivariate proof")
    };
    mv.polynomial_system = b"not a polynomial system".to_vec();
    assert!(matches!(Proof::Multivariate(mv).check(), Err(VerifyFailure::Malformed(_))));
}

#[test]
fn oversized_system_header() {
    let Proof::Multivariate(mut mv) = proof_for(Algorithm::Multivariate) else {
        panic!("expected a multivariate proof")
    };
    mv.polynomial_system = [1u32 << 31, 1 << 30, 1].iter().flat_map(|d| d.to_be_bytes()).collect();
    let proof = Proof::Multivariate(mv);
    assert!(matches!(proof.check(), Err(VerifyFailure::Malformed(_))));
    assert!(!proof.verify());
}

#[test]
fn nested_hybrid() {
    let Proof::Hybrid(mut hybrid) = proof_for(Algorithm::Hybrid) else { panic!("expected a hybrid proof") };
    let inner = hybrid.clone();
    hybrid.components.push(Proof::Hybrid(inner));
    assert_eq!(Proof::Hybrid(hybrid).check(), Err(VerifyFailure::NestedHybrid(Algorithm::Hybrid)));
}

#[test]
fn rejected_component() {
    let Proof::Hybrid(mut hybrid) = proof_for(Algorithm::Hybrid) else { panic!("expected a hybrid proof") };
    let index = hybrid.components.iter().position(|c| c.algorithm() == Algorithm::Multivariate).unwrap();
    hybrid.components[index].envelope_mut().challenge.pop();
    let err = Proof::Hybrid(hybrid).check().unwrap_err();
    let VerifyFailure::ComponentRejected { algorithm, reason } = err else { panic!("expected a component rejection") };
    assert_eq!(algorithm, Algorithm::Multivariate);
    assert_eq!(*reason, VerifyFailure::BadLength { field: "challenge", expected: 32, actual: 31 });
}
