use std::fmt;

use backend::Poly;

use crate::noise::NoiseEstimate;

/// Pair `(c0, c1)` with `c0 + c1*s = 2^log_scale * m + e` modulo `qi(level)`.
///
/// Coefficients are residues in `[0, 2^width)`, where `width` is the
/// bit-length of the last operation's [crate::Width]; any such width is a
/// multiple of `qi(level)`.
///
/// The relation also holds modulo `qi(level) * 2^high_bits`.
/// Only a left shift under [crate::Width::Extended] raises it.
#[derive(Clone, Debug, PartialEq)]
pub struct Ciphertext {
    pub(crate) c0: Poly,
    pub(crate) c1: Poly,
    pub(crate) level: usize,
    pub(crate) log_scale: usize,
    pub(crate) noise: NoiseEstimate,
    pub(crate) high_bits: usize,
}

impl Ciphertext {
    pub fn c0(&self) -> &Poly {
        &self.c0
    }

    pub fn c1(&self) -> &Poly {
        &self.c1
    }

    pub fn n(&self) -> usize {
        self.c0.n()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Base two logarithm of the scale of the encoded values.
    pub fn log_scale(&self) -> usize {
        self.log_scale
    }

    pub fn noise(&self) -> &NoiseEstimate {
        &self.noise
    }

    /// Number of bits a [crate::Scheme::right_shift] can drop.
    pub fn high_bits(&self) -> usize {
        self.high_bits
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cipher: c0 = {}, c1 = {}, level = {}",
            self.c0.n(),
            self.c1.n(),
            self.level
        )
    }
}
