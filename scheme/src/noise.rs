use std::fmt;

/// Returns `log2(2^a + 2^b)`.
pub(crate) fn log2_add(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if lo == f64::NEG_INFINITY {
        return hi;
    }
    hi + (1.0 + (lo - hi).exp2()).log2()
}

/// Upper bounds on the magnitude of the encoded message and of the
/// accumulated error of a ciphertext, both as base two logarithms of
/// integer coefficient magnitudes.
///
/// The bounds are heuristic: they follow the worst-case growth of each
/// operation and are never checked against the ciphertext itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseEstimate {
    log_message: f64,
    log_error: f64,
}

impl NoiseEstimate {
    pub fn new(log_message: f64, log_error: f64) -> Self {
        Self {
            log_message,
            log_error,
        }
    }

    pub fn log_message(&self) -> f64 {
        self.log_message
    }

    pub fn log_error(&self) -> f64 {
        self.log_error
    }

    /// Number of bits of the message above the error.
    pub fn precision_bits(&self) -> f64 {
        self.log_message - self.log_error
    }

    /// Number of bits left before `message + error` wraps around half of
    /// a `log_q` bits modulus.
    pub fn headroom_bits(&self, log_q: usize) -> f64 {
        (log_q as f64 - 1.0) - log2_add(self.log_message, self.log_error)
    }

    pub(crate) fn add(&self, other: &NoiseEstimate) -> NoiseEstimate {
        NoiseEstimate {
            log_message: log2_add(self.log_message, other.log_message),
            log_error: log2_add(self.log_error, other.log_error),
        }
    }

    pub(crate) fn add_const(&self, log_const: f64) -> NoiseEstimate {
        NoiseEstimate {
            log_message: log2_add(self.log_message, log_const),
            log_error: log2_add(self.log_error, 0.0),
        }
    }

    pub(crate) fn mult_const(&self, log_const: f64) -> NoiseEstimate {
        NoiseEstimate {
            log_message: self.log_message + log_const,
            log_error: self.log_error + log_const,
        }
    }

    /// Product followed by a relinearization adding `2^log_relin`.
    pub(crate) fn mult(&self, other: &NoiseEstimate, log_relin: f64) -> NoiseEstimate {
        let cross: f64 = log2_add(
            self.log_error + log2_add(other.log_message, other.log_error),
            self.log_message + other.log_error,
        );
        NoiseEstimate {
            log_message: self.log_message + other.log_message,
            log_error: log2_add(cross, log_relin),
        }
    }

    /// Square followed by a relinearization adding `2^log_relin`.
    pub(crate) fn square(&self, log_relin: f64) -> NoiseEstimate {
        let cross: f64 = log2_add(1.0 + self.log_error + self.log_message, 2.0 * self.log_error);
        NoiseEstimate {
            log_message: 2.0 * self.log_message,
            log_error: log2_add(cross, log_relin),
        }
    }

    pub(crate) fn lsh(&self, bits: usize) -> NoiseEstimate {
        self.mult_const(bits as f64)
    }

    pub(crate) fn rsh(&self, bits: usize) -> NoiseEstimate {
        self.mult_const(-(bits as f64))
    }

    /// Division by `2^bits` followed by a rounding adding `2^log_b_scale`.
    pub(crate) fn rescale(&self, bits: usize, log_b_scale: f64) -> NoiseEstimate {
        let shifted: NoiseEstimate = self.rsh(bits);
        NoiseEstimate {
            log_message: shifted.log_message,
            log_error: log2_add(shifted.log_error, log_b_scale),
        }
    }
}

impl fmt::Display for NoiseEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "|m| <= 2^{:.2}, |e| <= 2^{:.2}",
            self.log_message, self.log_error
        )
    }
}
