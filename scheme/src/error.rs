use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates a binary operation on ciphertexts at different levels.
    #[error("Level mismatch: {lhs} != {rhs}")]
    LevelMismatch { lhs: usize, rhs: usize },

    /// Indicates a binary operation on ciphertexts encoded at different scales.
    #[error("Scale mismatch: 2^{lhs} != 2^{rhs}")]
    ScaleMismatch { lhs: usize, rhs: usize },

    /// Indicates that a level transition would go past the last level.
    #[error("Level exhausted: {level} exceeds the maximum level {max}")]
    LevelExhausted { level: usize, max: usize },

    /// Indicates a level transition towards a smaller level.
    #[error("Invalid level transition: from {from} to {to}")]
    InvalidLevelTransition { from: usize, to: usize },

    /// Indicates a level outside of [1, max].
    #[error("Invalid level: {level} is not in [1, {max}]")]
    InvalidLevel { level: usize, max: usize },

    /// Indicates that the number of slots is not a power of two dividing the ring degree.
    #[error("Invalid slot count: {slots} is not a power of two dividing {n}")]
    InvalidSlotCount { slots: usize, n: usize },

    /// Indicates that the modulus of a level would have no bit left.
    #[error("Modulus underflow: level {level} would have log_q={log_q}")]
    ModulusUnderflow { level: usize, log_q: i64 },

    /// Indicates that a right shift would drop more bits than the scale holds.
    #[error("Scale underflow: cannot drop {bits} bits from a scale of 2^{log_scale}")]
    ScaleUnderflow { log_scale: usize, bits: usize },

    /// Indicates a right shift dropping more bits than the ciphertext holds
    /// above the modulus of its level.
    #[error("High bits exhausted: cannot drop {bits} bits, only {high_bits} held above qi")]
    HighBitsExhausted { bits: usize, high_bits: usize },

    /// Indicates a plaintext whose coefficients leave no room below `q/2`.
    #[error("Plaintext overflow: coefficients of {log_bound} bits do not fit below 2^{log_q}/2")]
    PlaintextOverflow { log_bound: usize, log_q: usize },

    /// Indicates a parameter error.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}
