use crate::poly::Poly;

/// Ring context for `Z[i][X]/(X^n+1)`: fixes the degree every kernel of
/// [crate::PolyOps] operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Module {
    n: usize,
    log_n: usize,
}

impl Module {
    pub fn new(n: usize) -> Self {
        assert!(
            n >= 2 && n.is_power_of_two(),
            "invalid ring degree: n={} must be a power of two >= 2",
            n
        );
        Self {
            n,
            log_n: n.trailing_zeros() as usize,
        }
    }

    /// Returns the ring degree.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the base two logarithm of the ring degree.
    pub fn log_n(&self) -> usize {
        self.log_n
    }

    /// Allocates the zero polynomial.
    pub fn new_poly(&self) -> Poly {
        Poly::new(self.n)
    }
}
