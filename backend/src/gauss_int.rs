use std::fmt;
use std::ops::{Add, Mul, Neg, ShlAssign, ShrAssign, Sub};

use rug::{Float, Integer};

/// Gaussian integer `re + i*im` with arbitrary precision parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GaussInt {
    pub re: Integer,
    pub im: Integer,
}

impl GaussInt {
    pub fn new(re: Integer, im: Integer) -> Self {
        Self { re, im }
    }

    pub fn from_i64(re: i64, im: i64) -> Self {
        Self {
            re: Integer::from(re),
            im: Integer::from(im),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    /// Reduces both parts modulo `2^bits`, into `[0, 2^bits)`.
    pub fn keep_bits_mut(&mut self, bits: usize) {
        self.re.keep_bits_mut(bits as u32);
        self.im.keep_bits_mut(bits as u32);
    }

    /// Base two logarithm of the modulus `|re + i*im|`, `-inf` for zero.
    pub fn log2_abs(&self) -> f64 {
        if self.is_zero() {
            return f64::NEG_INFINITY;
        }
        let prec: u32 = 64;
        let re: Float = Float::with_val(prec, &self.re);
        let im: Float = Float::with_val(prec, &self.im);
        let norm: Float = Float::with_val(prec, re.square_ref()) + im.square();
        norm.log2().to_f64() / 2.0
    }
}

impl fmt::Display for GaussInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.re, self.im)
    }
}

impl Add<&GaussInt> for &GaussInt {
    type Output = GaussInt;

    fn add(self, rhs: &GaussInt) -> GaussInt {
        GaussInt {
            re: Integer::from(&self.re + &rhs.re),
            im: Integer::from(&self.im + &rhs.im),
        }
    }
}

impl Sub<&GaussInt> for &GaussInt {
    type Output = GaussInt;

    fn sub(self, rhs: &GaussInt) -> GaussInt {
        GaussInt {
            re: Integer::from(&self.re - &rhs.re),
            im: Integer::from(&self.im - &rhs.im),
        }
    }
}

impl Mul<&GaussInt> for &GaussInt {
    type Output = GaussInt;

    fn mul(self, rhs: &GaussInt) -> GaussInt {
        let mut re: Integer = Integer::from(&self.re * &rhs.re);
        re -= &self.im * &rhs.im;
        let mut im: Integer = Integer::from(&self.re * &rhs.im);
        im += &self.im * &rhs.re;
        GaussInt { re, im }
    }
}

impl Neg for &GaussInt {
    type Output = GaussInt;

    fn neg(self) -> GaussInt {
        GaussInt {
            re: Integer::from(-&self.re),
            im: Integer::from(-&self.im),
        }
    }
}

impl ShlAssign<usize> for GaussInt {
    fn shl_assign(&mut self, bits: usize) {
        self.re <<= bits as u32;
        self.im <<= bits as u32;
    }
}

/// Floor shift on both parts.
impl ShrAssign<usize> for GaussInt {
    fn shr_assign(&mut self, bits: usize) {
        self.re >>= bits as u32;
        self.im >>= bits as u32;
    }
}
