use backend::{Decoding, Encoding, Module, Poly, RootTable};
use itertools::izip;
use num_complex::Complex64;

use crate::{
    error::{Error, Result},
    parameters::Parameters,
    plaintext::Plaintext,
};

/// Maps vectors of complex slots to ring elements and back.
///
/// `slots` values are interpolated by the inverse twisted transform into a
/// polynomial of `slots` coefficients in `Y = X^(n/slots)`, which is then
/// written with stride `n/slots` on the ring element. Products of encodings
/// are encodings of the slot-wise products.
#[derive(Clone, Debug)]
pub struct Encoder {
    module: Module,
    table: RootTable,
}

impl Encoder {
    pub fn new(params: &Parameters) -> Self {
        Self {
            module: *params.module(),
            table: params.root_table().clone(),
        }
    }

    pub fn n(&self) -> usize {
        self.module.n()
    }

    /// Returns [Error::InvalidSlotCount] unless `slots` is a power of two
    /// dividing the ring degree.
    pub fn check_slots(&self, slots: usize) -> Result<()> {
        let n: usize = self.n();
        if slots == 0 || !slots.is_power_of_two() || slots > n {
            return Err(Error::InvalidSlotCount { slots, n });
        }
        Ok(())
    }

    /// Encodes `values.len()` slots scaled by `2^log_scale`.
    pub fn encode(&self, values: &[Complex64], log_scale: usize) -> Result<Plaintext> {
        let slots: usize = values.len();
        self.check_slots(slots)?;

        let mut re: Vec<f64> = values.iter().map(|v| v.re).collect();
        let mut im: Vec<f64> = values.iter().map(|v| v.im).collect();
        self.table.ifft_twisted(&mut re, &mut im);

        let mut pt: Plaintext = Plaintext::alloc(&self.module, log_scale, slots);
        pt.data.encode_coeffs_f64(&re, &im, log_scale);
        Ok(pt)
    }

    /// Encodes exactly `n` slots, one per coefficient.
    pub fn encode_all(&self, values: &[Complex64], log_scale: usize) -> Result<Plaintext> {
        if values.len() != self.n() {
            return Err(Error::InvalidSlotCount {
                slots: values.len(),
                n: self.n(),
            });
        }
        self.encode(values, log_scale)
    }

    /// Encodes `value` on the constant coefficient, which decodes to `value`
    /// in every slot.
    pub fn encode_const(&self, value: Complex64, log_scale: usize) -> Plaintext {
        let mut pt: Plaintext = Plaintext::alloc(&self.module, log_scale, 1);
        pt.data.encode_const_f64(value.re, value.im, log_scale);
        pt
    }

    /// Decodes `slots` values from `data`, whose coefficients are residues
    /// modulo `2^log_q` of values scaled by `2^log_scale`.
    pub fn decode(&self, data: &Poly, log_q: usize, log_scale: usize, slots: usize) -> Result<Vec<Complex64>> {
        self.check_slots(slots)?;
        let mut re: Vec<f64> = vec![0f64; slots];
        let mut im: Vec<f64> = vec![0f64; slots];
        data.decode_coeffs_f64(log_q, log_scale, &mut re, &mut im);
        self.table.fft_twisted(&mut re, &mut im);
        Ok(izip!(re, im).map(|(x, y)| Complex64::new(x, y)).collect())
    }

    /// Decodes `n` slots.
    pub fn decode_all(&self, data: &Poly, log_q: usize, log_scale: usize) -> Vec<Complex64> {
        let n: usize = self.n();
        let mut re: Vec<f64> = vec![0f64; n];
        let mut im: Vec<f64> = vec![0f64; n];
        data.decode_coeffs_f64(log_q, log_scale, &mut re, &mut im);
        self.table.fft_twisted(&mut re, &mut im);
        izip!(re, im).map(|(x, y)| Complex64::new(x, y)).collect()
    }

    /// Decodes the constant coefficient of `data`.
    pub fn decode_const(&self, data: &Poly, log_q: usize, log_scale: usize) -> Complex64 {
        let (re, im) = data.decode_const_f64(log_q, log_scale);
        Complex64::new(re, im)
    }
}
