mod encryption;

use itertools::izip;
use num_complex::Complex64;
use sampling::source::Source;

use crate::{
    keys::SecretKey,
    parameters::{Parameters, ParametersLiteral},
    scheme::Scheme,
};

pub(crate) struct TestContext {
    pub(crate) sk: SecretKey,
    pub(crate) scheme: Scheme,
    pub(crate) source_xa: Source,
    pub(crate) source_xe: Source,
}

impl TestContext {
    pub(crate) fn new(log_n: usize, log_q: usize, log_p: usize, max_level: usize) -> Self {
        let params: Parameters = Parameters::new(&ParametersLiteral {
            log_n,
            log_q,
            log_p,
            max_level,
            ..Default::default()
        })
        .unwrap();
        let mut source_xs: Source = Source::new([0u8; 32]);
        let mut source_xa: Source = Source::new([1u8; 32]);
        let mut source_xe: Source = Source::new([2u8; 32]);
        let sk: SecretKey = SecretKey::generate(&params, &mut source_xs);
        let scheme: Scheme = Scheme::new(params, &sk, &mut source_xa, &mut source_xe);
        Self {
            sk,
            scheme,
            source_xa,
            source_xe,
        }
    }

    /// n = 32, log_q = 300, log_p = 40, L = 3.
    pub(crate) fn standard() -> Self {
        Self::new(5, 300, 40, 3)
    }
}

pub(crate) fn random_values(slots: usize, source: &mut Source) -> Vec<Complex64> {
    (0..slots)
        .map(|_| Complex64::new(source.next_f64(-1.0, 1.0), source.next_f64(-1.0, 1.0)))
        .collect()
}

pub(crate) fn assert_close(have: &[Complex64], want: &[Complex64], tolerance: f64) {
    assert_eq!(have.len(), want.len());
    izip!(have.iter(), want.iter()).enumerate().for_each(|(i, (a, b))| {
        assert!(
            (a - b).norm() < tolerance,
            "slot {}: {} != {} (tolerance {})",
            i,
            a,
            b,
            tolerance
        )
    });
}
