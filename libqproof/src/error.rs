use crate::proof::Algorithm;
use thiserror::Error;

/// Failures raised by the primitive layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("Requested length must be positive.")]
    InvalidLength,
    #[error("Parameter too small: got {got}, need at least {min}.")]
    ParameterTooSmall { got: u64, min: u64 },
    #[error("Polynomial degree {0} is not a power of two.")]
    InvalidDegree(usize),
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),
    #[error("The modulus cannot be zero.")]
    ZeroModulus,
    #[error("The sampling range is empty.")]
    EmptyRange,
    #[error("Operand lengths differ: {left} vs {right}.")]
    LengthMismatch { left: usize, right: usize },
    #[error("Index {index} is out of range for length {len}.")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("The HMAC key was rejected.")]
    InvalidKey,
    #[error("Malformed polynomial system: {0}")]
    MalformedSystem(String),
}

/// Errors returned while constructing a proof.
#[derive(Debug, Error)]
pub enum ProofError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
}

impl ProofError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ProofError::InvalidParameters(msg.into())
    }
}

/// The reason a proof was rejected. Public verification collapses all of these to `false`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VerifyFailure {
    #[error("The {0} field carries the corruption marker.")]
    Corrupted(&'static str),
    #[error("The {field} field has length {actual}, expected {expected}.")]
    BadLength { field: &'static str, expected: usize, actual: usize },
    #[error("The {0} field is empty.")]
    Empty(&'static str),
    #[error("The {0} field is out of range.")]
    OutOfRange(&'static str),
    #[error("The response is degenerate (all components identical).")]
    DegenerateResponse,
    #[error("The response digest equals the challenge digest.")]
    ResponseMatchesChallenge,
    #[error("The Merkle inclusion proof does not match the stored root.")]
    MerkleMismatch,
    #[error("The hash chain breaks at index {0}.")]
    BrokenChain(usize),
    #[error("The commitment does not match the committed data.")]
    CommitmentMismatch,
    #[error("The proof data is malformed: {0}")]
    Malformed(String),
    #[error("A {0} proof cannot be nested inside a hybrid proof.")]
    NestedHybrid(Algorithm),
    #[error("Component {algorithm} proof rejected: {reason}")]
    ComponentRejected { algorithm: Algorithm, reason: Box<VerifyFailure> },
}

impl From<PrimitiveError> for VerifyFailure {
    fn from(err: PrimitiveError) -> Self {
        VerifyFailure::Malformed(err.to_string())
    }
}
