use backend::{Module, Poly};

/// Ring element holding encoded values, scaled by `2^log_scale`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plaintext {
    pub data: Poly,
    pub log_scale: usize,
    pub slots: usize,
}

impl Plaintext {
    pub fn alloc(module: &Module, log_scale: usize, slots: usize) -> Self {
        Self {
            data: module.new_poly(),
            log_scale,
            slots,
        }
    }

    pub fn n(&self) -> usize {
        self.data.n()
    }

    /// Base two logarithm of an upper bound on the encoded coefficients.
    pub fn log_bound(&self) -> f64 {
        match self.data.max_bits() {
            0 => f64::NEG_INFINITY,
            bits => bits as f64,
        }
    }
}
