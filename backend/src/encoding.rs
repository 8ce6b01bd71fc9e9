use itertools::izip;
use rug::{Float, Integer};

use crate::{gauss_int::GaussInt, poly::Poly};

const F64_PREC: u32 = 53;

/// Returns `round(x * 2^log_scale)`. Non finite inputs encode to zero.
pub fn encode_f64(x: f64, log_scale: usize) -> Integer {
    let mut v: Float = Float::with_val(F64_PREC, x);
    v <<= log_scale as u32;
    v.to_integer().unwrap_or_default()
}

/// Returns `x / 2^log_scale` rounded to the nearest f64.
pub fn decode_f64(x: &Integer, log_scale: usize) -> f64 {
    let prec: u32 = F64_PREC.max(x.significant_bits());
    let mut v: Float = Float::with_val(prec, x);
    v >>= log_scale as u32;
    v.to_f64()
}

/// Reduces `x` into the centered range `(-2^log_q / 2, 2^log_q / 2]`.
pub fn center(x: &mut Integer, log_q: usize) {
    x.keep_bits_mut(log_q as u32);
    if log_q == 0 {
        return;
    }
    let half: Integer = Integer::from(1) << (log_q - 1) as u32;
    if *x > half {
        *x -= Integer::from(1) << log_q as u32;
    }
}

/// [center] applied to both parts.
pub fn center_gauss(x: &mut GaussInt, log_q: usize) {
    center(&mut x.re, log_q);
    center(&mut x.im, log_q);
}

pub trait Encoding {
    /// Encodes complex values on the coefficients of the receiver.
    ///
    /// # Arguments
    ///
    /// * `re`: real parts of the values.
    /// * `im`: imaginary parts of the values.
    /// * `log_scale`: base two logarithm of the scaling applied before rounding.
    ///
    /// The value `j` is written on the coefficient `j * n / re.len()`, every
    /// other coefficient is zeroed.
    fn encode_coeffs_f64(&mut self, re: &[f64], im: &[f64], log_scale: usize);

    /// Encodes a single complex value on the constant coefficient and
    /// zeroes every other coefficient.
    fn encode_const_f64(&mut self, re: f64, im: f64, log_scale: usize);
}

pub trait Decoding {
    /// Decodes complex values from the coefficients of the receiver.
    ///
    /// # Arguments
    ///
    /// * `log_q`: base two logarithm of the modulus the coefficients are centered by.
    /// * `log_scale`: base two logarithm of the scaling of the data.
    /// * `re`: receives the real parts, read from coefficients `j * n / re.len()`.
    /// * `im`: receives the imaginary parts.
    fn decode_coeffs_f64(&self, log_q: usize, log_scale: usize, re: &mut [f64], im: &mut [f64]);

    /// Decodes the constant coefficient.
    fn decode_const_f64(&self, log_q: usize, log_scale: usize) -> (f64, f64);
}

impl Encoding for Poly {
    fn encode_coeffs_f64(&mut self, re: &[f64], im: &[f64], log_scale: usize) {
        encode_coeffs_f64(self, re, im, log_scale)
    }

    fn encode_const_f64(&mut self, re: f64, im: f64, log_scale: usize) {
        encode_coeffs_f64(self, &[re], &[im], log_scale)
    }
}

impl Decoding for Poly {
    fn decode_coeffs_f64(&self, log_q: usize, log_scale: usize, re: &mut [f64], im: &mut [f64]) {
        decode_coeffs_f64(self, log_q, log_scale, re, im)
    }

    fn decode_const_f64(&self, log_q: usize, log_scale: usize) -> (f64, f64) {
        let mut c: GaussInt = self.coeff(0);
        center_gauss(&mut c, log_q);
        (decode_f64(&c.re, log_scale), decode_f64(&c.im, log_scale))
    }
}

fn encode_coeffs_f64(a: &mut Poly, re: &[f64], im: &[f64], log_scale: usize) {
    let n: usize = a.n();
    let slots: usize = re.len();

    #[cfg(debug_assertions)]
    {
        assert_eq!(slots, im.len());
        assert!(
            slots.is_power_of_two() && slots <= n,
            "invalid slots: {} must be a power of two <= {}",
            slots,
            n
        );
    }

    let gap: usize = n / slots;
    a.zero();
    let (a_re, a_im) = a.parts_mut();
    izip!(
        a_re.iter_mut().step_by(gap),
        a_im.iter_mut().step_by(gap),
        re.iter(),
        im.iter()
    )
    .for_each(|(y_re, y_im, x_re, x_im)| {
        *y_re = encode_f64(*x_re, log_scale);
        *y_im = encode_f64(*x_im, log_scale);
    });
}

fn decode_coeffs_f64(a: &Poly, log_q: usize, log_scale: usize, re: &mut [f64], im: &mut [f64]) {
    let n: usize = a.n();
    let slots: usize = re.len();

    #[cfg(debug_assertions)]
    {
        assert_eq!(slots, im.len());
        assert!(
            slots.is_power_of_two() && slots <= n,
            "invalid slots: {} must be a power of two <= {}",
            slots,
            n
        );
    }

    let gap: usize = n / slots;
    izip!(
        a.re().iter().step_by(gap),
        a.im().iter().step_by(gap),
        re.iter_mut(),
        im.iter_mut()
    )
    .for_each(|(x_re, x_im, y_re, y_im)| {
        let mut c_re: Integer = x_re.clone();
        let mut c_im: Integer = x_im.clone();
        center(&mut c_re, log_q);
        center(&mut c_im, log_q);
        *y_re = decode_f64(&c_re, log_scale);
        *y_im = decode_f64(&c_im, log_scale);
    });
}

#[cfg(test)]
mod tests {
    use itertools::izip;
    use rug::Integer;

    use crate::{Decoding, Encoding, Poly, center, decode_f64, encode_f64};

    #[test]
    fn test_encode_decode_f64() {
        let x: f64 = -3.141592653589793;
        let v: Integer = encode_f64(x, 40);
        assert_eq!(v, Integer::from(-3454217652358i64));
        assert!((decode_f64(&v, 40) - x).abs() < 1e-12);
        assert_eq!(encode_f64(f64::NAN, 10), Integer::new());
    }

    #[test]
    fn test_center() {
        let log_q: usize = 8;
        [(0i64, 0i64), (127, 127), (128, 128), (129, -127), (255, -1), (-1, -1), (-128, 128), (300, 44)]
            .iter()
            .for_each(|(x, want)| {
                let mut v: Integer = Integer::from(*x);
                center(&mut v, log_q);
                assert_eq!(v, Integer::from(*want), "x={}", x);
            });
    }

    #[test]
    fn test_encode_decode_coeffs() {
        let n: usize = 16;
        let log_q: usize = 60;
        let log_scale: usize = 30;
        let re: [f64; 4] = [1.5, -2.25, 0.0, 7.125];
        let im: [f64; 4] = [-0.5, 0.75, 3.0, -1.0];
        let mut a: Poly = Poly::new(n);
        a.encode_coeffs_f64(&re, &im, log_scale);
        (0..n)
            .filter(|i| i % 4 != 0)
            .for_each(|i| assert!(a.coeff(i).is_zero()));

        // Stored residues are non-negative, as after a reduction.
        let (a_re, a_im) = a.parts_mut();
        a_re.iter_mut()
            .chain(a_im.iter_mut())
            .for_each(|x| x.keep_bits_mut(log_q as u32));

        let mut have_re: [f64; 4] = [0.0; 4];
        let mut have_im: [f64; 4] = [0.0; 4];
        a.decode_coeffs_f64(log_q, log_scale, &mut have_re, &mut have_im);
        izip!(have_re, re).for_each(|(a, b)| assert_eq!(a, b));
        izip!(have_im, im).for_each(|(a, b)| assert_eq!(a, b));
        assert_eq!(a.decode_const_f64(log_q, log_scale), (1.5, -0.5));
    }
}
