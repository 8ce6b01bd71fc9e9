//! Leveled approximate homomorphic encryption over `Z[i][X]/(X^n+1)`.
//!
//! Complex vectors are encoded through the twisted Fourier embedding into
//! ring elements scaled by `2^log_scale`, encrypted under an RLWE public key
//! and evaluated on without the secret key. Moduli are powers of two: level
//! `l` in `[1, L]` uses `qi = 2^(log_q - log_p*(l-1))`, and every
//! [Scheme::mod_switch] divides the modulus, the ciphertext and the scale by
//! `2^log_p`.
//!
//! # Module overview
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`parameters`] | Validated parameter set and noise constants |
//! | [`level`] | Modulus chain and the [Width] policy |
//! | [`encoder`] | Slot encoding and decoding |
//! | [`keys`] | Secret, public and relinearization keys |
//! | [`scheme`] | Encryption and decryption |
//! | evaluator | Homomorphic operations on [Ciphertext] |
//! | [`noise`] | Heuristic message and error bounds |
//! | [`utils`] | Fixed-point reference evaluators |
//!
//! # Example
//!
//! ```
//! use num_complex::Complex64;
//! use sampling::source::Source;
//! use scheme::{Parameters, ParametersLiteral, Scheme, SecretKey, Width};
//!
//! let params = Parameters::new(&ParametersLiteral {
//!     log_n: 3,
//!     log_q: 300,
//!     log_p: 30,
//!     max_level: 3,
//!     ..Default::default()
//! })
//! .unwrap();
//! let mut source_xs = Source::new([0u8; 32]);
//! let mut source_xa = Source::new([1u8; 32]);
//! let mut source_xe = Source::new([2u8; 32]);
//! let sk = SecretKey::generate(&params, &mut source_xs);
//! let scheme = Scheme::new(params, &sk, &mut source_xa, &mut source_xe);
//!
//! let ct = scheme.encrypt_const(Complex64::new(3.5, 2.1), 30, &mut source_xa, &mut source_xe).unwrap();
//! let ct = scheme.add_const(&ct, Complex64::new(1.0, 0.0), Width::Level).unwrap();
//! let m = scheme.decrypt_const(&sk, &ct).unwrap();
//! assert!((m - Complex64::new(4.5, 2.1)).norm() < 1e-6);
//! ```

pub mod ciphertext;
pub mod encoder;
pub mod error;
mod evaluator;
pub mod keys;
pub mod level;
pub mod noise;
pub mod parameters;
pub mod plaintext;
pub mod scheme;
pub mod utils;

#[cfg(test)]
mod tests;

pub use ciphertext::*;
pub use encoder::*;
pub use error::*;
pub use keys::*;
pub use level::*;
pub use noise::NoiseEstimate;
pub use parameters::*;
pub use plaintext::*;
pub use scheme::*;
