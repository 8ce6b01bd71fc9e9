use rand::RngCore;
use rand::seq::SliceRandom;
use rand_distr::Normal;

use crate::source::Source;

/// Distributions of small integer polynomials.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distribution {
    /// Ternary with probabilistic Hamming weight: `±1` each with probability `p/2`.
    TernaryProb(f64),
    /// Ternary with fixed Hamming weight.
    TernaryFixed(usize),
    /// Rounded normal of standard deviation `sigma`, rejected outside `[-bound, bound]`.
    Gaussian { sigma: f64, bound: f64 },
}

impl Distribution {
    /// Overwrites `data` with fresh samples.
    pub fn fill_i64(&self, data: &mut [i64], source: &mut Source) {
        match *self {
            Distribution::TernaryProb(prob) => {
                let half: f64 = prob / 2.0;
                data.iter_mut().for_each(|x| {
                    let u: f64 = source.next_f64(0.0, 1.0);
                    *x = if u < half {
                        -1
                    } else if u < prob {
                        1
                    } else {
                        0
                    }
                });
            }
            Distribution::TernaryFixed(hw) => {
                assert!(
                    hw <= data.len(),
                    "invalid hamming weight: {} > {}",
                    hw,
                    data.len()
                );
                data.iter_mut().for_each(|x| *x = 0);
                data[..hw]
                    .iter_mut()
                    .for_each(|x| *x = (((source.next_u64() & 1) as i64) << 1) - 1);
                data.shuffle(source);
            }
            Distribution::Gaussian { sigma, bound } => {
                let normal: Normal<f64> = Normal::new(0.0, sigma).unwrap();
                data.iter_mut().for_each(|x| {
                    let mut v: f64 = rand_distr::Distribution::sample(&normal, source);
                    while v.abs() > bound {
                        v = rand_distr::Distribution::sample(&normal, source);
                    }
                    *x = v.round() as i64
                });
            }
        }
    }

    /// Upper bound on the absolute value of a single sample.
    pub fn bound(&self) -> f64 {
        match *self {
            Distribution::TernaryProb(_) | Distribution::TernaryFixed(_) => 1.0,
            Distribution::Gaussian { bound, .. } => bound.round(),
        }
    }
}
