use backend::{AddNormal, FillTernary, Module, Poly, PolyOps};
use log::debug;
use num_complex::Complex64;
use sampling::source::Source;

use crate::{
    ciphertext::Ciphertext,
    encoder::Encoder,
    error::{Error, Result},
    keys::{PublicKey, RelinearizationKey, SecretKey},
    level::LevelContext,
    noise::NoiseEstimate,
    parameters::Parameters,
    plaintext::Plaintext,
};

/// Public side of the scheme: encryption and homomorphic evaluation.
///
/// Decryption takes the [SecretKey] as an argument and is never cached.
#[derive(Clone, Debug)]
pub struct Scheme {
    pub(crate) params: Parameters,
    pub(crate) levels: LevelContext,
    pub(crate) encoder: Encoder,
    pub(crate) pk: PublicKey,
    pub(crate) rlk: RelinearizationKey,
}

impl Scheme {
    /// Generates the public and relinearization keys of `sk`.
    pub fn new(params: Parameters, sk: &SecretKey, source_xa: &mut Source, source_xe: &mut Source) -> Self {
        let pk: PublicKey = PublicKey::generate(&params, sk, source_xa, source_xe);
        let rlk: RelinearizationKey = RelinearizationKey::generate(&params, sk, source_xa, source_xe);
        Self::from_keys(params, pk, rlk)
    }

    pub fn from_keys(params: Parameters, pk: PublicKey, rlk: RelinearizationKey) -> Self {
        let levels: LevelContext = LevelContext::new(&params);
        let encoder: Encoder = Encoder::new(&params);
        debug!(
            "scheme: n={} levels={} log_q=[{}..{}]",
            params.n(),
            levels.max_level(),
            params.log_q(),
            params.log_q() - params.log_p() * (params.max_level() - 1)
        );
        Self {
            params,
            levels,
            encoder,
            pk,
            rlk,
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn levels(&self) -> &LevelContext {
        &self.levels
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    pub fn relinearization_key(&self) -> &RelinearizationKey {
        &self.rlk
    }

    pub(crate) fn module(&self) -> &Module {
        self.params.module()
    }

    /// Fresh RLWE sample `(v*b + e0, v*a + e1)` modulo `q`.
    fn rlwe_instance(&self, source_xa: &mut Source, source_xe: &mut Source) -> (Poly, Poly) {
        let module: &Module = self.module();
        let log_q: usize = self.params.log_q();
        let sigma: f64 = self.params.sigma();
        let bound: f64 = self.params.bound();

        let mut v: Poly = module.new_poly();
        v.fill_ternary_prob(self.params.rho(), source_xa);

        let mut c0: Poly = module.new_poly();
        module.poly_mul(&mut c0, &v, &self.pk.b, log_q);
        c0.add_normal(log_q, source_xe, sigma, bound);

        let mut c1: Poly = module.new_poly();
        module.poly_mul(&mut c1, &v, &self.pk.a, log_q);
        c1.add_normal(log_q, source_xe, sigma, bound);

        (c0, c1)
    }

    /// Encrypts an encoded plaintext at level 1.
    ///
    /// Fails if a coefficient of `pt` reaches `q/4`, past which the message
    /// would wrap around `q` once the encryption noise is added.
    pub fn encrypt_pt(&self, pt: &Plaintext, source_xa: &mut Source, source_xe: &mut Source) -> Result<Ciphertext> {
        let log_q: usize = self.params.log_q();
        let log_bound: usize = pt.data.max_bits();
        if log_bound + 1 >= log_q {
            return Err(Error::PlaintextOverflow { log_bound, log_q });
        }
        let (mut c0, c1) = self.rlwe_instance(source_xa, source_xe);
        self.module().poly_add_inplace(&mut c0, &pt.data, log_q);
        Ok(Ciphertext {
            c0,
            c1,
            level: 1,
            log_scale: pt.log_scale,
            noise: NoiseEstimate::new(pt.log_bound(), self.params.log_b_clean()),
            high_bits: 0,
        })
    }

    /// Encrypts `values.len()` slots scaled by `2^log_scale`.
    pub fn encrypt(
        &self,
        values: &[Complex64],
        log_scale: usize,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> Result<Ciphertext> {
        let pt: Plaintext = self.encoder.encode(values, log_scale)?;
        self.encrypt_pt(&pt, source_xa, source_xe)
    }

    /// Encrypts exactly `n` slots.
    pub fn encrypt_all(
        &self,
        values: &[Complex64],
        log_scale: usize,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> Result<Ciphertext> {
        let pt: Plaintext = self.encoder.encode_all(values, log_scale)?;
        self.encrypt_pt(&pt, source_xa, source_xe)
    }

    /// Encrypts a single value on the constant coefficient.
    pub fn encrypt_const(
        &self,
        value: Complex64,
        log_scale: usize,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> Result<Ciphertext> {
        let pt: Plaintext = self.encoder.encode_const(value, log_scale);
        self.encrypt_pt(&pt, source_xa, source_xe)
    }

    /// Returns `c0 + c1*s` modulo `qi(level)` and `log(qi(level))`.
    fn phase(&self, sk: &SecretKey, ct: &Ciphertext) -> Result<(Poly, usize)> {
        let log_qi: usize = self.levels.log_qi(ct.level)?;
        let module: &Module = self.module();
        let mut poly: Poly = module.new_poly();
        module.poly_mul(&mut poly, &sk.data, &ct.c1, log_qi);
        module.poly_add_inplace(&mut poly, &ct.c0, log_qi);
        Ok((poly, log_qi))
    }

    /// Decrypts the constant coefficient.
    pub fn decrypt_const(&self, sk: &SecretKey, ct: &Ciphertext) -> Result<Complex64> {
        let (poly, log_qi) = self.phase(sk, ct)?;
        Ok(self.encoder.decode_const(&poly, log_qi, ct.log_scale))
    }

    /// Decrypts `slots` values.
    pub fn decrypt(&self, sk: &SecretKey, ct: &Ciphertext, slots: usize) -> Result<Vec<Complex64>> {
        self.encoder.check_slots(slots)?;
        let (poly, log_qi) = self.phase(sk, ct)?;
        self.encoder.decode(&poly, log_qi, ct.log_scale, slots)
    }

    /// Decrypts `n` slots.
    pub fn decrypt_all(&self, sk: &SecretKey, ct: &Ciphertext) -> Result<Vec<Complex64>> {
        let (poly, log_qi) = self.phase(sk, ct)?;
        Ok(self.encoder.decode_all(&poly, log_qi, ct.log_scale))
    }

    /// Decrypts the constant coefficient of every ciphertext, in order.
    pub fn decrypt_batch(&self, sk: &SecretKey, cts: &[Ciphertext]) -> Result<Vec<Complex64>> {
        cts.iter().map(|ct| self.decrypt_const(sk, ct)).collect()
    }
}
