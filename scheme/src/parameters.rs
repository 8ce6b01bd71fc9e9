use backend::{Module, RootTable};
use log::debug;

use crate::error::{Error, Result};

pub(crate) const SIX_SIGMA: f64 = 6.0;

/// User facing description of a parameter set, validated by [Parameters::new].
#[derive(Clone, Debug, PartialEq)]
pub struct ParametersLiteral {
    /// Base two logarithm of the ring degree.
    pub log_n: usize,
    /// Bit-length of the modulus of the first level.
    pub log_q: usize,
    /// Bits dropped by every rescale, also the default fixed-point scale.
    pub log_p: usize,
    /// Bit-length of the key-switching modulus `P`; `None` uses `log_q`.
    pub log_special: Option<usize>,
    /// Number of levels of the modulus chain.
    pub max_level: usize,
    /// Standard deviation of the error distribution.
    pub sigma: f64,
    /// Density of the ternary encryption mask.
    pub rho: f64,
    /// Hamming weight of the secret key; `None` uses `min(64, n)`.
    pub hamming_weight: Option<usize>,
}

impl Default for ParametersLiteral {
    fn default() -> Self {
        Self {
            log_n: 10,
            log_q: 300,
            log_p: 30,
            log_special: None,
            max_level: 3,
            sigma: 3.2,
            rho: 0.5,
            hamming_weight: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Parameters {
    log_n: usize,
    log_q: usize,
    log_p: usize,
    log_special: usize,
    max_level: usize,
    sigma: f64,
    rho: f64,
    hamming_weight: usize,
    log_b_clean: f64,
    log_b_ks: f64,
    log_b_scale: f64,
    module: Module,
    root_table: RootTable,
}

impl Parameters {
    pub fn new(p: &ParametersLiteral) -> Result<Self> {
        if p.log_n == 0 || p.log_n > 20 {
            return Err(Error::InvalidParameters(format!(
                "log_n={} must be in [1, 20]",
                p.log_n
            )));
        }
        if p.log_q == 0 || p.log_p == 0 || p.max_level == 0 {
            return Err(Error::InvalidParameters(format!(
                "log_q={}, log_p={} and max_level={} must be positive",
                p.log_q, p.log_p, p.max_level
            )));
        }
        // Bits left at the last level, saturated to i64.
        let log_q_last: i64 = match p.log_p.checked_mul(p.max_level - 1) {
            Some(drop) if drop < p.log_q => i64::try_from(p.log_q - drop).unwrap_or(i64::MAX),
            Some(drop) => i64::try_from(drop - p.log_q).map_or(i64::MIN, |d| -d),
            None => i64::MIN,
        };
        if log_q_last <= 0 {
            return Err(Error::ModulusUnderflow {
                level: p.max_level,
                log_q: log_q_last,
            });
        }
        if !(p.sigma.is_finite() && p.sigma > 0.0) {
            return Err(Error::InvalidParameters(format!(
                "sigma={} must be positive",
                p.sigma
            )));
        }
        if !(p.rho > 0.0 && p.rho <= 1.0) {
            return Err(Error::InvalidParameters(format!(
                "rho={} must be in (0, 1]",
                p.rho
            )));
        }

        let n: usize = 1 << p.log_n;
        let log_special: usize = p.log_special.unwrap_or(p.log_q);
        if log_special == 0 {
            return Err(Error::InvalidParameters(
                "log_special must be positive".to_string(),
            ));
        }
        if p.log_q.checked_add(log_special).is_none() {
            return Err(Error::InvalidParameters(format!(
                "log_q={} + log_special={} overflows",
                p.log_q, log_special
            )));
        }
        let hamming_weight: usize = p.hamming_weight.unwrap_or(n.min(64));
        if hamming_weight == 0 || hamming_weight > n {
            return Err(Error::InvalidParameters(format!(
                "hamming_weight={} must be in [1, {}]",
                hamming_weight, n
            )));
        }

        let n_f64: f64 = n as f64;
        let h_f64: f64 = hamming_weight as f64;
        let b_clean: f64 = 8.0 * 2f64.sqrt() * p.sigma * n_f64
            + SIX_SIGMA * p.sigma * n_f64.sqrt()
            + 16.0 * p.sigma * (h_f64 * n_f64).sqrt();
        let b_ks: f64 = 8.0 * p.sigma * n_f64 / 3f64.sqrt();
        let b_scale: f64 = (n_f64 / 3.0).sqrt() * (3.0 + 8.0 * h_f64.sqrt());

        debug!(
            "parameters: n={} log_q={} log_p={} log_special={} max_level={} sigma={} rho={} h={}",
            n, p.log_q, p.log_p, log_special, p.max_level, p.sigma, p.rho, hamming_weight
        );

        Ok(Self {
            log_n: p.log_n,
            log_q: p.log_q,
            log_p: p.log_p,
            log_special,
            max_level: p.max_level,
            sigma: p.sigma,
            rho: p.rho,
            hamming_weight,
            log_b_clean: b_clean.log2(),
            log_b_ks: b_ks.log2(),
            log_b_scale: b_scale.log2(),
            module: Module::new(n),
            root_table: RootTable::new(n),
        })
    }

    pub fn n(&self) -> usize {
        1 << self.log_n
    }

    pub fn log_n(&self) -> usize {
        self.log_n
    }

    pub fn log_q(&self) -> usize {
        self.log_q
    }

    pub fn log_p(&self) -> usize {
        self.log_p
    }

    /// Bit-length of the key-switching modulus `P`.
    pub fn log_special(&self) -> usize {
        self.log_special
    }

    /// Bit-length of `P*q`.
    pub fn log_pq(&self) -> usize {
        self.log_q + self.log_special
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Rejection bound of the error distribution.
    pub fn bound(&self) -> f64 {
        SIX_SIGMA * self.sigma
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn hamming_weight(&self) -> usize {
        self.hamming_weight
    }

    /// log2 of the error bound of a fresh encryption.
    pub fn log_b_clean(&self) -> f64 {
        self.log_b_clean
    }

    /// log2 of the key-switching error bound, before the division by `P`.
    pub fn log_b_ks(&self) -> f64 {
        self.log_b_ks
    }

    /// log2 of the rounding error bound of a rescale.
    pub fn log_b_scale(&self) -> f64 {
        self.log_b_scale
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn root_table(&self) -> &RootTable {
        &self.root_table
    }
}

#[cfg(test)]
mod tests {
    use super::{Parameters, ParametersLiteral};
    use crate::error::Error;

    #[test]
    fn defaults() {
        let params: Parameters = Parameters::new(&ParametersLiteral {
            log_n: 3,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(params.n(), 8);
        assert_eq!(params.log_special(), 300);
        assert_eq!(params.log_pq(), 600);
        assert_eq!(params.hamming_weight(), 8);
        assert_eq!(params.module().n(), 8);
        assert_eq!(params.root_table().m(), 16);
        assert!(params.log_b_scale() < params.log_b_clean());
    }

    #[test]
    fn modulus_underflow() {
        let res = Parameters::new(&ParametersLiteral {
            log_n: 3,
            log_q: 60,
            log_p: 30,
            max_level: 3,
            ..Default::default()
        });
        assert_eq!(
            res.unwrap_err(),
            Error::ModulusUnderflow {
                level: 3,
                log_q: 0
            }
        );

        // Overflowing chains report a saturated underflow.
        assert_eq!(
            Parameters::new(&ParametersLiteral {
                log_n: 3,
                log_q: 60,
                log_p: usize::MAX / 2,
                max_level: 4,
                ..Default::default()
            })
            .unwrap_err(),
            Error::ModulusUnderflow {
                level: 4,
                log_q: i64::MIN
            }
        );
        assert_eq!(
            Parameters::new(&ParametersLiteral {
                log_n: 3,
                log_q: 60,
                log_p: usize::MAX / 2,
                max_level: 3,
                ..Default::default()
            })
            .unwrap_err(),
            Error::ModulusUnderflow {
                level: 3,
                log_q: i64::MIN
            }
        );

        // The last level keeps a single bit.
        assert!(
            Parameters::new(&ParametersLiteral {
                log_n: 3,
                log_q: 61,
                log_p: 30,
                max_level: 3,
                ..Default::default()
            })
            .is_ok()
        );
    }

    #[test]
    fn invalid_parameters() {
        [
            ParametersLiteral {
                log_n: 0,
                ..Default::default()
            },
            ParametersLiteral {
                log_p: 0,
                ..Default::default()
            },
            ParametersLiteral {
                max_level: 0,
                ..Default::default()
            },
            ParametersLiteral {
                sigma: -1.0,
                ..Default::default()
            },
            ParametersLiteral {
                rho: 1.5,
                ..Default::default()
            },
            ParametersLiteral {
                log_n: 3,
                hamming_weight: Some(9),
                ..Default::default()
            },
            ParametersLiteral {
                log_special: Some(0),
                ..Default::default()
            },
        ]
        .iter()
        .for_each(|p| {
            assert!(
                matches!(Parameters::new(p), Err(Error::InvalidParameters(_))),
                "{:?}",
                p
            )
        });
    }
}
