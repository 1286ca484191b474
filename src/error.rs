use thiserror::Error;

/// Crate-wide result alias; every fallible engine call returns this.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in [`crate::FragmentCodec`] or
/// [`crate::ThresholdSecretSplitter`].
///
/// All variants are fail-fast: the engine never returns a partial fragment
/// set or a partially reconstructed secret.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("invalid codec parameters: k={k}, m={m} (need k>=1, m>=1, k+m<=256)")]
    InvalidCodecParameters { k: usize, m: usize },

    #[error("invalid splitter parameters: t={t}, n={n} (need 2<=t<=n)")]
    InvalidSplitterParameters { t: usize, n: usize },

    #[error("decode needs at least {needed} fragments, got {present}")]
    InsufficientFragments { needed: usize, present: usize },

    #[error("present fragments have mismatched lengths: expected {expected}, got {actual} at slot {slot}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        slot: usize,
    },

    #[error("decoded length header {length} is out of range [0, {max}]")]
    CorruptLength { length: u32, max: usize },

    #[error("gaussian elimination found no pivot for column {column}; the encode matrix invariant was violated")]
    MatrixSingular { column: usize },

    #[error("secret of {bits} bits does not fit in the {prime_bits}-bit prime field")]
    SecretTooLarge { bits: u64, prime_bits: u64 },

    #[error("reconstruct needs at least {needed} shares, got {present}")]
    InsufficientShares { needed: usize, present: usize },

    #[error("duplicate share x-coordinate: {x}")]
    DuplicateX { x: u64 },

    #[error("division by zero in GF(2^8)")]
    DivisionByZero,

    #[error("inverse of zero requested in GF(2^8)")]
    InverseOfZero,

    #[error("recovered secret needs {actual} bytes, which does not fit in the requested {expected}")]
    SecretDoesNotFit { expected: usize, actual: usize },
}
