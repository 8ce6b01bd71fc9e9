//! Fixed-point reference evaluators.
//!
//! These compute, in the clear, the scaled Gaussian integers a ciphertext
//! should decrypt to after the corresponding sequence of homomorphic
//! operations. Every product is followed by a floor shift of `log_p` bits,
//! mirroring a rescale.

use std::f64::consts::PI;

use backend::{GaussInt, Integer, uniform_integer};
use num_complex::Complex64;
use sampling::source::Source;

use crate::evaluator::encode_const;

/// `round(x * 2^log_p)`.
pub fn evaluate_val(x: Complex64, log_p: usize) -> GaussInt {
    encode_const(x, log_p)
}

/// Gaussian integer with both parts uniform in `[0, 2^log_p)`.
pub fn evaluate_random_val(log_p: usize, source: &mut Source) -> GaussInt {
    let re: Integer = uniform_integer(log_p, source);
    let im: Integer = uniform_integer(log_p, source);
    GaussInt::new(re, im)
}

/// Random point of the unit circle at scale `2^log_p`.
pub fn evaluate_random_circle_val(log_p: usize, source: &mut Source) -> GaussInt {
    let theta: f64 = source.next_f64(0.0, 2.0 * PI);
    evaluate_val(Complex64::from_polar(1.0, theta), log_p)
}

pub fn evaluate_random_vals(size: usize, log_p: usize, source: &mut Source) -> Vec<GaussInt> {
    (0..size).map(|_| evaluate_random_val(log_p, source)).collect()
}

/// `x^degree` at scale `2^log_p`, by splitting `degree` on its highest bit.
pub fn evaluate_pow(x: Complex64, degree: usize, log_p: usize) -> GaussInt {
    if degree == 0 {
        return evaluate_val(Complex64::new(1.0, 0.0), log_p);
    }
    let log_degree: usize = degree.ilog2() as usize;
    let mut res: GaussInt = evaluate_pow2(x, log_degree, log_p);
    let rem: usize = degree - (1 << log_degree);
    if rem > 0 {
        let tmp: GaussInt = evaluate_pow(x, rem, log_p);
        res = &res * &tmp;
        res >>= log_p;
    }
    res
}

/// `x^(2^log_degree)` at scale `2^log_p`, by repeated squaring.
pub fn evaluate_pow2(x: Complex64, log_degree: usize, log_p: usize) -> GaussInt {
    let mut res: GaussInt = evaluate_val(x, log_p);
    (0..log_degree).for_each(|_| {
        res = &res * &res;
        res >>= log_p;
    });
    res
}

/// `[x, x^2, ..., x^degree]` at scale `2^log_p`.
pub fn evaluate_pow_vec(x: Complex64, degree: usize, log_p: usize) -> Vec<GaussInt> {
    let m: GaussInt = evaluate_val(x, log_p);
    let mut res: Vec<GaussInt> = Vec::with_capacity(degree);
    if degree == 0 {
        return res;
    }
    res.push(m.clone());
    (1..degree).for_each(|i| {
        let mut next: GaussInt = &res[i - 1] * &m;
        next >>= log_p;
        res.push(next);
    });
    res
}

/// `[x, x^2, x^4, ..., x^(2^log_degree)]` at scale `2^log_p`.
pub fn evaluate_pow2_vec(x: Complex64, log_degree: usize, log_p: usize) -> Vec<GaussInt> {
    let mut res: Vec<GaussInt> = Vec::with_capacity(log_degree + 1);
    res.push(evaluate_val(x, log_p));
    (0..log_degree).for_each(|i| {
        let mut next: GaussInt = &res[i] * &res[i];
        next >>= log_p;
        res.push(next);
    });
    res
}

/// `1/x` at scale `2^log_p`.
pub fn evaluate_inverse(x: Complex64, log_p: usize) -> GaussInt {
    evaluate_val(x.inv(), log_p)
}

/// `exp(x)` at scale `2^log_p`.
pub fn evaluate_exponent(x: Complex64, log_p: usize) -> GaussInt {
    evaluate_val(x.exp(), log_p)
}

/// `exp(x) / (1 + exp(x))` at scale `2^log_p`.
pub fn evaluate_sigmoid(x: Complex64, log_p: usize) -> GaussInt {
    let e: Complex64 = x.exp();
    evaluate_val(e / (e + 1.0), log_p)
}

/// Multiplies every value by `2^bits`.
pub fn left_shift_vals(vals: &mut [GaussInt], bits: usize) {
    vals.iter_mut().for_each(|v| *v <<= bits);
}

/// Rotates `vals` to the left by `shift` positions: `vals[i] <- vals[i + shift]`.
pub fn idx_shift<T>(vals: &mut [T], shift: usize) {
    if vals.is_empty() {
        return;
    }
    let len: usize = vals.len();
    vals.rotate_left(shift % len);
}
