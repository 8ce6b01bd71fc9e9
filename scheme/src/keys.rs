use backend::{AddNormal, FillTernary, FillUniform, Module, Poly, PolyOps};
use log::debug;
use sampling::source::Source;

use crate::parameters::Parameters;

/// Ternary secret `s` of fixed Hamming weight, with a zero imaginary part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretKey {
    pub(crate) data: Poly,
}

impl SecretKey {
    pub fn alloc(module: &Module) -> Self {
        Self {
            data: module.new_poly(),
        }
    }

    pub fn fill_ternary_hw(&mut self, hw: usize, source: &mut Source) {
        self.data.fill_ternary_hw(hw, source);
    }

    pub fn fill_ternary_prob(&mut self, prob: f64, source: &mut Source) {
        self.data.fill_ternary_prob(prob, source);
    }

    /// Samples a secret with the Hamming weight of `params`.
    pub fn generate(params: &Parameters, source_xs: &mut Source) -> Self {
        let mut sk: SecretKey = SecretKey::alloc(params.module());
        sk.fill_ternary_hw(params.hamming_weight(), source_xs);
        debug!("secret key: n={} h={}", params.n(), params.hamming_weight());
        sk
    }

    pub fn data(&self) -> &Poly {
        &self.data
    }
}

/// Samples `(a, b = -a*s + e + m)` modulo `2^log_q`, with `a` uniform and
/// `e` a rounded Gaussian on both parts.
fn encrypt_zero_sk(
    params: &Parameters,
    sk: &SecretKey,
    m: Option<&Poly>,
    log_q: usize,
    source_xa: &mut Source,
    source_xe: &mut Source,
) -> (Poly, Poly) {
    let module: &Module = params.module();
    let mut a: Poly = module.new_poly();
    a.fill_uniform(log_q, source_xa);

    let mut b: Poly = module.new_poly();
    module.poly_mul(&mut b, &sk.data, &a, log_q);
    module.poly_negate_inplace(&mut b, log_q);
    b.add_normal(log_q, source_xe, params.sigma(), params.bound());

    if let Some(m) = m {
        module.poly_add_inplace(&mut b, m, log_q);
    }
    (a, b)
}

/// Public encryption key: `b = -a*s + e` modulo `q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) a: Poly,
    pub(crate) b: Poly,
}

impl PublicKey {
    pub fn generate(params: &Parameters, sk: &SecretKey, source_xa: &mut Source, source_xe: &mut Source) -> Self {
        let (a, b) = encrypt_zero_sk(params, sk, None, params.log_q(), source_xa, source_xe);
        debug!("public key: log_q={}", params.log_q());
        Self { a, b }
    }

    pub fn a(&self) -> &Poly {
        &self.a
    }

    pub fn b(&self) -> &Poly {
        &self.b
    }
}

/// Relinearization key: `b* = -a*·s + e + P·s^2` modulo `P*q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelinearizationKey {
    pub(crate) a: Poly,
    pub(crate) b: Poly,
}

impl RelinearizationKey {
    pub fn generate(params: &Parameters, sk: &SecretKey, source_xa: &mut Source, source_xe: &mut Source) -> Self {
        let module: &Module = params.module();
        let log_pq: usize = params.log_pq();

        let mut s2: Poly = module.new_poly();
        module.poly_square(&mut s2, &sk.data, log_pq);
        module.poly_lsh_inplace(&mut s2, params.log_special(), log_pq);

        let (a, b) = encrypt_zero_sk(params, sk, Some(&s2), log_pq, source_xa, source_xe);
        debug!(
            "relinearization key: log_pq={} log_special={}",
            log_pq,
            params.log_special()
        );
        Self { a, b }
    }

    pub fn a(&self) -> &Poly {
        &self.a
    }

    pub fn b(&self) -> &Poly {
        &self.b
    }
}

#[cfg(test)]
mod tests {
    use backend::{Integer, Module, Poly, PolyOps, center};
    use sampling::source::Source;

    use super::{PublicKey, RelinearizationKey, SecretKey};
    use crate::parameters::{Parameters, ParametersLiteral};

    fn params() -> Parameters {
        Parameters::new(&ParametersLiteral {
            log_n: 4,
            log_q: 120,
            log_p: 30,
            max_level: 3,
            ..Default::default()
        })
        .unwrap()
    }

    /// Returns `b + a*s` centered modulo `2^log_q`.
    fn phase(module: &Module, a: &Poly, b: &Poly, sk: &SecretKey, log_q: usize) -> Poly {
        let mut res: Poly = module.new_poly();
        module.poly_mul(&mut res, sk.data(), a, log_q);
        module.poly_add_inplace(&mut res, b, log_q);
        let (re, im) = res.parts_mut();
        re.iter_mut().chain(im.iter_mut()).for_each(|x| center(x, log_q));
        res
    }

    #[test]
    fn secret_key_weight() {
        let params: Parameters = params();
        let mut source_xs: Source = Source::new([0u8; 32]);
        let sk: SecretKey = SecretKey::generate(&params, &mut source_xs);
        assert_eq!(
            sk.data().re().iter().filter(|x| !x.is_zero()).count(),
            params.hamming_weight()
        );
        assert!(sk.data().im().iter().all(|x| x.is_zero()));
    }

    #[test]
    fn public_key_phase_is_small() {
        let params: Parameters = params();
        let module: &Module = params.module();
        let mut source_xs: Source = Source::new([0u8; 32]);
        let mut source_xa: Source = Source::new([1u8; 32]);
        let mut source_xe: Source = Source::new([2u8; 32]);
        let sk: SecretKey = SecretKey::generate(&params, &mut source_xs);
        let pk: PublicKey = PublicKey::generate(&params, &sk, &mut source_xa, &mut source_xe);
        let e: Poly = phase(module, pk.a(), pk.b(), &sk, params.log_q());
        let bound: f64 = params.bound();
        assert!(e.re().iter().chain(e.im().iter()).all(|x| x.to_f64().abs() <= bound));
        assert!(!e.is_zero());
    }

    #[test]
    fn relinearization_key_phase_is_scaled_square() {
        let params: Parameters = params();
        let module: &Module = params.module();
        let log_pq: usize = params.log_pq();
        let mut source_xs: Source = Source::new([0u8; 32]);
        let mut source_xa: Source = Source::new([1u8; 32]);
        let mut source_xe: Source = Source::new([2u8; 32]);
        let sk: SecretKey = SecretKey::generate(&params, &mut source_xs);
        let rlk: RelinearizationKey = RelinearizationKey::generate(&params, &sk, &mut source_xa, &mut source_xe);

        let mut e: Poly = phase(module, rlk.a(), rlk.b(), &sk, log_pq);
        let mut s2: Poly = module.new_poly();
        module.poly_square(&mut s2, sk.data(), log_pq);
        module.poly_lsh_inplace(&mut s2, params.log_special(), log_pq);
        module.poly_sub_inplace(&mut e, &s2, log_pq);
        let (re, im) = e.parts_mut();
        re.iter_mut().chain(im.iter_mut()).for_each(|x| center(x, log_pq));

        let bound: Integer = Integer::from(params.bound() as i64);
        assert!(e.re().iter().chain(e.im().iter()).all(|x| x.clone().abs() <= bound));
    }
}
