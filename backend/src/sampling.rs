use rug::{Integer, integer::Order};
use sampling::{Distribution, source::Source};

use crate::poly::Poly;

pub trait FillUniform {
    /// Fills both parts with uniform values in \[0, 2^log_q\).
    fn fill_uniform(&mut self, log_q: usize, source: &mut Source);
}

pub trait FillNormal {
    /// Fills both parts with a rounded normal of standard deviation `sigma`,
    /// bounded to \[-bound, bound\]. Values are left signed.
    fn fill_normal(&mut self, source: &mut Source, sigma: f64, bound: f64);
}

pub trait AddNormal {
    /// Adds a rounded normal of standard deviation `sigma`, bounded to
    /// \[-bound, bound\], on both parts and reduces modulo 2^log_q.
    fn add_normal(&mut self, log_q: usize, source: &mut Source, sigma: f64, bound: f64);
}

pub trait FillTernary {
    /// Fills the real part with `±1` each with probability `prob/2` and zeroes
    /// the imaginary part.
    fn fill_ternary_prob(&mut self, prob: f64, source: &mut Source);

    /// Fills the real part with exactly `hw` non-zero `±1` entries and zeroes
    /// the imaginary part.
    fn fill_ternary_hw(&mut self, hw: usize, source: &mut Source);
}

/// Uniform integer in `[0, 2^log_q)`.
pub fn uniform_integer(log_q: usize, source: &mut Source) -> Integer {
    let digits: Vec<u64> = (0..log_q.div_ceil(64)).map(|_| source.next_i64() as u64).collect();
    let mut x: Integer = Integer::from_digits(&digits, Order::Lsf);
    x.keep_bits_mut(log_q as u32);
    x
}

fn sample_i64(n: usize, dist: Distribution, source: &mut Source) -> Vec<i64> {
    let mut data: Vec<i64> = vec![0i64; n];
    dist.fill_i64(&mut data, source);
    data
}

impl FillUniform for Poly {
    fn fill_uniform(&mut self, log_q: usize, source: &mut Source) {
        let (re, im) = self.parts_mut();
        re.iter_mut()
            .chain(im.iter_mut())
            .for_each(|x| *x = uniform_integer(log_q, source));
    }
}

impl FillNormal for Poly {
    fn fill_normal(&mut self, source: &mut Source, sigma: f64, bound: f64) {
        let n: usize = self.n();
        let dist: Distribution = Distribution::Gaussian { sigma, bound };
        let e_re: Vec<i64> = sample_i64(n, dist, source);
        let e_im: Vec<i64> = sample_i64(n, dist, source);
        *self = Poly::from_i64(&e_re, &e_im);
    }
}

impl AddNormal for Poly {
    fn add_normal(&mut self, log_q: usize, source: &mut Source, sigma: f64, bound: f64) {
        let n: usize = self.n();
        let dist: Distribution = Distribution::Gaussian { sigma, bound };
        let e_re: Vec<i64> = sample_i64(n, dist, source);
        let e_im: Vec<i64> = sample_i64(n, dist, source);
        let bits: u32 = log_q as u32;
        let (re, im) = self.parts_mut();
        re.iter_mut()
            .zip(e_re)
            .chain(im.iter_mut().zip(e_im))
            .for_each(|(x, e)| {
                *x += e;
                x.keep_bits_mut(bits);
            });
    }
}

impl FillTernary for Poly {
    fn fill_ternary_prob(&mut self, prob: f64, source: &mut Source) {
        let n: usize = self.n();
        let s: Vec<i64> = sample_i64(n, Distribution::TernaryProb(prob), source);
        *self = Poly::from_i64(&s, &vec![0i64; n]);
    }

    fn fill_ternary_hw(&mut self, hw: usize, source: &mut Source) {
        let n: usize = self.n();
        let s: Vec<i64> = sample_i64(n, Distribution::TernaryFixed(hw), source);
        *self = Poly::from_i64(&s, &vec![0i64; n]);
    }
}

#[cfg(test)]
mod tests {
    use rug::Integer;
    use sampling::source::Source;

    use super::{AddNormal, FillNormal, FillTernary, FillUniform};
    use crate::Poly;

    #[test]
    fn poly_fill_uniform() {
        let n: usize = 1024;
        let log_q: usize = 100;
        let mut source: Source = Source::new([0u8; 32]);
        let mut a: Poly = Poly::new(n);
        a.fill_uniform(log_q, &mut source);
        assert!(a.re().iter().chain(a.im().iter()).all(|x| *x >= 0 && x.significant_bits() as usize <= log_q));
        // Roughly half of the samples have their top bit set.
        let top: usize = a
            .re()
            .iter()
            .chain(a.im().iter())
            .filter(|x| x.significant_bits() as usize == log_q)
            .count();
        assert!((top as f64 / (2 * n) as f64 - 0.5).abs() < 0.05, "top={}", top);
    }

    #[test]
    fn poly_fill_normal() {
        let n: usize = 4096;
        let sigma: f64 = 3.2;
        let bound: f64 = 6.0 * sigma;
        let mut source: Source = Source::new([0u8; 32]);
        let mut a: Poly = Poly::new(n);
        a.fill_normal(&mut source, sigma, bound);
        let values: Vec<f64> = a
            .re()
            .iter()
            .chain(a.im().iter())
            .map(|x| x.to_f64())
            .collect();
        assert!(values.iter().all(|x| x.abs() <= bound));
        let mean: f64 = values.iter().sum::<f64>() / values.len() as f64;
        let std: f64 = (values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / values.len() as f64).sqrt();
        assert!((std - sigma).abs() < 0.1, "std={} ~!= {}", std, sigma);
    }

    #[test]
    fn poly_add_normal_reduces() {
        let n: usize = 64;
        let log_q: usize = 40;
        let mut source: Source = Source::new([1u8; 32]);
        let mut a: Poly = Poly::new(n);
        a.add_normal(log_q, &mut source, 3.2, 19.2);
        assert!(a.re().iter().chain(a.im().iter()).all(|x| *x >= 0 && x.significant_bits() as usize <= log_q));
        // Negative samples wrapped to the top of the range.
        let max: Integer = Integer::from(1) << log_q as u32;
        assert!(a.re().iter().any(|x| Integer::from(&max - x) < 20));
    }

    #[test]
    fn poly_fill_ternary() {
        let n: usize = 256;
        let mut source: Source = Source::new([2u8; 32]);
        let mut s: Poly = Poly::new(n);
        s.fill_ternary_hw(64, &mut source);
        assert_eq!(s.re().iter().filter(|x| !x.is_zero()).count(), 64);
        assert!(s.re().iter().all(|x| *x >= -1 && *x <= 1));
        assert!(s.im().iter().all(|x| x.is_zero()));

        s.fill_ternary_prob(0.5, &mut source);
        let hw: usize = s.re().iter().filter(|x| !x.is_zero()).count();
        assert!(hw > 96 && hw < 160, "hw={}", hw);
        assert!(s.im().iter().all(|x| x.is_zero()));
    }
}
