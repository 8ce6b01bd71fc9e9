use itertools::izip;
use rug::Integer;

use crate::gauss_int::GaussInt;

/// Polynomial of `Z[i][X]/(X^n+1)`, stored as its real and imaginary
/// coefficient vectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    re: Vec<Integer>,
    im: Vec<Integer>,
}

impl Poly {
    pub fn new(n: usize) -> Self {
        Self {
            re: vec![Integer::new(); n],
            im: vec![Integer::new(); n],
        }
    }

    pub fn from_i64(re: &[i64], im: &[i64]) -> Self {
        assert_eq!(re.len(), im.len());
        Self {
            re: re.iter().map(|x| Integer::from(*x)).collect(),
            im: im.iter().map(|x| Integer::from(*x)).collect(),
        }
    }

    pub fn from_parts(re: Vec<Integer>, im: Vec<Integer>) -> Self {
        assert_eq!(re.len(), im.len());
        Self { re, im }
    }

    pub fn n(&self) -> usize {
        self.re.len()
    }

    pub fn re(&self) -> &[Integer] {
        &self.re
    }

    pub fn im(&self) -> &[Integer] {
        &self.im
    }

    pub fn re_mut(&mut self) -> &mut [Integer] {
        &mut self.re
    }

    pub fn im_mut(&mut self) -> &mut [Integer] {
        &mut self.im
    }

    /// Mutable access to both coefficient vectors at once.
    pub fn parts_mut(&mut self) -> (&mut [Integer], &mut [Integer]) {
        (&mut self.re, &mut self.im)
    }

    pub fn coeff(&self, i: usize) -> GaussInt {
        GaussInt::new(self.re[i].clone(), self.im[i].clone())
    }

    pub fn set_coeff(&mut self, i: usize, value: &GaussInt) {
        self.re[i].clone_from(&value.re);
        self.im[i].clone_from(&value.im);
    }

    pub fn zero(&mut self) {
        izip!(self.re.iter_mut(), self.im.iter_mut()).for_each(|(x, y)| {
            *x = Integer::new();
            *y = Integer::new();
        });
    }

    pub fn is_zero(&self) -> bool {
        izip!(self.re.iter(), self.im.iter()).all(|(x, y)| x.is_zero() && y.is_zero())
    }

    /// Largest bit-length among the absolute values of all coefficient parts.
    pub fn max_bits(&self) -> usize {
        izip!(self.re.iter(), self.im.iter())
            .map(|(x, y)| x.significant_bits().max(y.significant_bits()) as usize)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::Poly;
    use crate::gauss_int::GaussInt;

    #[test]
    fn set_and_get_coeff() {
        let mut a: Poly = Poly::new(8);
        assert!(a.is_zero());
        a.set_coeff(3, &GaussInt::from_i64(-4, 9));
        assert_eq!(a.coeff(3), GaussInt::from_i64(-4, 9));
        assert_eq!(a.max_bits(), 4);
        a.zero();
        assert!(a.is_zero());
    }
}
