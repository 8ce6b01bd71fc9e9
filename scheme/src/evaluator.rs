use backend::{GaussInt, Module, Poly, PolyOps, encode_f64};
use log::{debug, trace};
use num_complex::Complex64;

use crate::{
    ciphertext::Ciphertext,
    error::{Error, Result},
    level::Width,
    noise::log2_add,
    scheme::Scheme,
};

/// Fixed-point encoding of `c` as a Gaussian integer scaled by `2^log_scale`.
pub(crate) fn encode_const(c: Complex64, log_scale: usize) -> GaussInt {
    GaussInt::new(encode_f64(c.re, log_scale), encode_f64(c.im, log_scale))
}

fn check_same_level(a: &Ciphertext, b: &Ciphertext) -> Result<()> {
    if a.level != b.level {
        return Err(Error::LevelMismatch {
            lhs: a.level,
            rhs: b.level,
        });
    }
    Ok(())
}

fn check_same_scale(a: &Ciphertext, b: &Ciphertext) -> Result<()> {
    if a.log_scale != b.log_scale {
        return Err(Error::ScaleMismatch {
            lhs: a.log_scale,
            rhs: b.log_scale,
        });
    }
    Ok(())
}

fn check_scale(log_scale: usize, bits: usize) -> Result<()> {
    if bits > log_scale {
        return Err(Error::ScaleUnderflow { log_scale, bits });
    }
    Ok(())
}

/// High bits above `qi(level)` left valid by a reduction at `width`.
fn reduced_high_bits(high_bits: usize, width: Width) -> usize {
    match width {
        Width::Level => 0,
        Width::Extended => high_bits,
    }
}

/// Homomorphic operations.
///
/// Every operation comes as a value form returning a new ciphertext and an
/// `_inplace` form mutating its receiver. Operations taking a [Width] reduce
/// their output modulo `qi(level)` or `P*qi(level)`; both are multiples of
/// the modulus of the level, so either is a valid representation. Value and
/// level of the receiver are left untouched when an error is returned.
///
/// A reduction at [Width::Level] discards the bits a ciphertext held above
/// `qi(level)` (see [Ciphertext::high_bits]); so do multiplications and
/// level changes.
impl Scheme {
    pub fn add(&self, a: &Ciphertext, b: &Ciphertext, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = a.clone();
        self.add_inplace(&mut res, b, width)?;
        Ok(res)
    }

    /// a <- a + b
    pub fn add_inplace(&self, a: &mut Ciphertext, b: &Ciphertext, width: Width) -> Result<()> {
        check_same_level(a, b)?;
        check_same_scale(a, b)?;
        let bits: usize = self.levels.bits(a.level, width)?;
        let module: &Module = self.module();
        module.poly_add_inplace(&mut a.c0, &b.c0, bits);
        module.poly_add_inplace(&mut a.c1, &b.c1, bits);
        a.noise = a.noise.add(&b.noise);
        a.high_bits = reduced_high_bits(a.high_bits.min(b.high_bits), width);
        Ok(())
    }

    pub fn sub(&self, a: &Ciphertext, b: &Ciphertext, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = a.clone();
        self.sub_inplace(&mut res, b, width)?;
        Ok(res)
    }

    /// a <- a - b
    pub fn sub_inplace(&self, a: &mut Ciphertext, b: &Ciphertext, width: Width) -> Result<()> {
        check_same_level(a, b)?;
        check_same_scale(a, b)?;
        let bits: usize = self.levels.bits(a.level, width)?;
        let module: &Module = self.module();
        module.poly_sub_inplace(&mut a.c0, &b.c0, bits);
        module.poly_sub_inplace(&mut a.c1, &b.c1, bits);
        a.noise = a.noise.add(&b.noise);
        a.high_bits = reduced_high_bits(a.high_bits.min(b.high_bits), width);
        Ok(())
    }

    pub fn add_const(&self, ct: &Ciphertext, c: Complex64, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.add_const_inplace(&mut res, c, width)?;
        Ok(res)
    }

    /// Adds `c`, encoded at the scale of `ct`, to every slot.
    pub fn add_const_inplace(&self, ct: &mut Ciphertext, c: Complex64, width: Width) -> Result<()> {
        let cst: GaussInt = encode_const(c, ct.log_scale);
        self.add_const_integer_inplace(ct, &cst, width)
    }

    pub fn add_const_integer(&self, ct: &Ciphertext, c: &GaussInt, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.add_const_integer_inplace(&mut res, c, width)?;
        Ok(res)
    }

    /// Adds the raw constant `c` to the constant coefficient of `c0`.
    pub fn add_const_integer_inplace(&self, ct: &mut Ciphertext, c: &GaussInt, width: Width) -> Result<()> {
        let bits: usize = self.levels.bits(ct.level, width)?;
        let mut c00: GaussInt = &ct.c0.coeff(0) + c;
        c00.keep_bits_mut(bits);
        ct.c0.set_coeff(0, &c00);
        ct.noise = ct.noise.add_const(c.log2_abs());
        ct.high_bits = reduced_high_bits(ct.high_bits, width);
        Ok(())
    }

    pub fn mult_by_const(&self, ct: &Ciphertext, c: Complex64, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.mult_by_const_inplace(&mut res, c, width)?;
        Ok(res)
    }

    /// Multiplies every slot by `c`, encoded at scale `2^log_p`; the scale of
    /// `ct` grows by `log_p` bits.
    pub fn mult_by_const_inplace(&self, ct: &mut Ciphertext, c: Complex64, width: Width) -> Result<()> {
        let log_p: usize = self.params.log_p();
        let cst: GaussInt = encode_const(c, log_p);
        self.mult_by_integer_inplace(ct, &cst, width)?;
        ct.log_scale += log_p;
        Ok(())
    }

    pub fn mult_by_integer(&self, ct: &Ciphertext, c: &GaussInt, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.mult_by_integer_inplace(&mut res, c, width)?;
        Ok(res)
    }

    /// Multiplies `c0` and `c1` by the raw constant `c`.
    pub fn mult_by_integer_inplace(&self, ct: &mut Ciphertext, c: &GaussInt, width: Width) -> Result<()> {
        let bits: usize = self.levels.bits(ct.level, width)?;
        let module: &Module = self.module();
        module.poly_mul_scalar_inplace(&mut ct.c0, c, bits);
        module.poly_mul_scalar_inplace(&mut ct.c1, c, bits);
        ct.noise = ct.noise.mult_const(c.log2_abs());
        ct.high_bits = reduced_high_bits(ct.high_bits, width);
        Ok(())
    }

    /// Maps `(cc11, level)` to `(d0, d1)` with `d0 + d1*s = cc11*s^2 + e_ks`
    /// modulo `qi(level)`.
    fn relinearize(&self, cc11: &Poly, level: usize) -> Result<(Poly, Poly)> {
        let log_special: usize = self.params.log_special();
        let log_pqi: usize = self.levels.log_pqi(level)?;
        let module: &Module = self.module();

        trace!("relinearize: level={} log_pqi={}", level, log_pqi);

        let mut d0: Poly = module.new_poly();
        let mut d1: Poly = module.new_poly();
        module.poly_mul(&mut d0, cc11, &self.rlk.b, log_pqi);
        module.poly_mul(&mut d1, cc11, &self.rlk.a, log_pqi);
        module.poly_rsh_inplace(&mut d0, log_special);
        module.poly_rsh_inplace(&mut d1, log_special);
        Ok((d0, d1))
    }

    /// log2 of the error added by a relinearization at `level`.
    fn log_relin_error(&self, level: usize) -> Result<f64> {
        let log_qi: usize = self.levels.log_qi(level)?;
        Ok(log2_add(
            log_qi as f64 + self.params.log_b_ks() - self.params.log_special() as f64,
            self.params.log_b_scale(),
        ))
    }

    pub fn mult(&self, a: &Ciphertext, b: &Ciphertext, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = a.clone();
        self.mult_inplace(&mut res, b, width)?;
        Ok(res)
    }

    /// a <- a * b, relinearized. The level is unchanged and the scales add up.
    pub fn mult_inplace(&self, a: &mut Ciphertext, b: &Ciphertext, width: Width) -> Result<()> {
        check_same_level(a, b)?;
        let level: usize = a.level;
        let bits: usize = self.levels.bits(level, width)?;
        let log_qi: usize = self.levels.log_qi(level)?;
        let log_relin: f64 = self.log_relin_error(level)?;
        let module: &Module = self.module();

        let mut cc00: Poly = module.new_poly();
        let mut cc01: Poly = module.new_poly();
        let mut cc10: Poly = module.new_poly();
        let mut cc11: Poly = module.new_poly();
        module.poly_mul(&mut cc00, &a.c0, &b.c0, bits);
        module.poly_mul(&mut cc01, &a.c0, &b.c1, bits);
        module.poly_mul(&mut cc10, &a.c1, &b.c0, bits);
        module.poly_mul(&mut cc11, &a.c1, &b.c1, log_qi);

        let (mut d0, mut d1) = self.relinearize(&cc11, level)?;
        module.poly_add_inplace(&mut d1, &cc10, bits);
        module.poly_add_inplace(&mut d1, &cc01, bits);
        module.poly_add_inplace(&mut d0, &cc00, bits);

        a.c0 = d0;
        a.c1 = d1;
        a.log_scale += b.log_scale;
        a.noise = a.noise.mult(&b.noise, log_relin);
        a.high_bits = 0;
        Ok(())
    }

    pub fn square(&self, ct: &Ciphertext, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.square_inplace(&mut res, width)?;
        Ok(res)
    }

    /// ct <- ct^2, relinearized. Overwrites its own operand.
    pub fn square_inplace(&self, ct: &mut Ciphertext, width: Width) -> Result<()> {
        let level: usize = ct.level;
        let bits: usize = self.levels.bits(level, width)?;
        let log_qi: usize = self.levels.log_qi(level)?;
        let log_relin: f64 = self.log_relin_error(level)?;
        let module: &Module = self.module();

        let mut cc00: Poly = module.new_poly();
        let mut cc10: Poly = module.new_poly();
        let mut cc11: Poly = module.new_poly();
        module.poly_square(&mut cc00, &ct.c0, bits);
        module.poly_mul(&mut cc10, &ct.c1, &ct.c0, bits);
        module.poly_lsh_inplace(&mut cc10, 1, bits);
        module.poly_square(&mut cc11, &ct.c1, log_qi);

        let (mut d0, mut d1) = self.relinearize(&cc11, level)?;
        module.poly_add_inplace(&mut d1, &cc10, bits);
        module.poly_add_inplace(&mut d0, &cc00, bits);

        ct.c0 = d0;
        ct.c1 = d1;
        ct.log_scale *= 2;
        ct.noise = ct.noise.square(log_relin);
        ct.high_bits = 0;
        Ok(())
    }

    pub fn mult_by_monomial(&self, ct: &Ciphertext, degree: i64, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.mult_by_monomial_inplace(&mut res, degree, width)?;
        Ok(res)
    }

    /// Multiplies `c0` and `c1` by `X^degree`, `degree` taken modulo `2n`.
    pub fn mult_by_monomial_inplace(&self, ct: &mut Ciphertext, degree: i64, width: Width) -> Result<()> {
        let bits: usize = self.levels.bits(ct.level, width)?;
        let module: &Module = self.module();
        module.poly_rotate_inplace(&mut ct.c0, degree, bits);
        module.poly_rotate_inplace(&mut ct.c1, degree, bits);
        ct.high_bits = reduced_high_bits(ct.high_bits, width);
        Ok(())
    }

    pub fn left_shift(&self, ct: &Ciphertext, bits: usize, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.left_shift_inplace(&mut res, bits, width)?;
        Ok(res)
    }

    /// Multiplies `c0` and `c1` by `2^bits`; the scale grows by `bits`.
    ///
    /// Under [Width::Extended] the shifted-out high bits are kept, up to
    /// `log_special` of them, which lets [Scheme::right_shift] undo the
    /// shift exactly.
    pub fn left_shift_inplace(&self, ct: &mut Ciphertext, bits: usize, width: Width) -> Result<()> {
        let w: usize = self.levels.bits(ct.level, width)?;
        let module: &Module = self.module();
        module.poly_lsh_inplace(&mut ct.c0, bits, w);
        module.poly_lsh_inplace(&mut ct.c1, bits, w);
        ct.log_scale += bits;
        ct.noise = ct.noise.lsh(bits);
        ct.high_bits = match width {
            Width::Level => 0,
            Width::Extended => (ct.high_bits + bits).min(self.params.log_special()),
        };
        Ok(())
    }

    pub fn right_shift(&self, ct: &Ciphertext, bits: usize) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.right_shift_inplace(&mut res, bits)?;
        Ok(res)
    }

    /// Floor-divides the coefficients of `c0` and `c1` by `2^bits`, keeping
    /// level and modulus; the scale drops by `bits`.
    ///
    /// `bits` may not exceed [Ciphertext::high_bits]: only a left shift
    /// under [Width::Extended] makes room for it, and the pair is then an
    /// exact round trip.
    pub fn right_shift_inplace(&self, ct: &mut Ciphertext, bits: usize) -> Result<()> {
        check_scale(ct.log_scale, bits)?;
        if bits > ct.high_bits {
            return Err(Error::HighBitsExhausted {
                bits,
                high_bits: ct.high_bits,
            });
        }
        let module: &Module = self.module();
        module.poly_rsh_inplace(&mut ct.c0, bits);
        module.poly_rsh_inplace(&mut ct.c1, bits);
        ct.log_scale -= bits;
        ct.noise = ct.noise.rsh(bits);
        ct.high_bits -= bits;
        Ok(())
    }

    pub fn mod_switch_to(&self, ct: &Ciphertext, new_level: usize) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.mod_switch_to_inplace(&mut res, new_level)?;
        Ok(res)
    }

    /// Rescales `ct` down to `new_level`: the modulus and the coefficients are
    /// divided by `2^(log_p * (new_level - level))`, and so is the scale.
    pub fn mod_switch_to_inplace(&self, ct: &mut Ciphertext, new_level: usize) -> Result<()> {
        let jump: usize = self.levels.jump(ct.level, new_level)?;
        if jump == 0 {
            return Ok(());
        }
        let bits: usize = self.params.log_p() * jump;
        check_scale(ct.log_scale, bits)?;
        let log_qi: usize = self.levels.log_qi(new_level)?;
        let module: &Module = self.module();

        trace!("rescale: level={} bits={}", ct.level, bits);

        module.poly_rsh_inplace(&mut ct.c0, bits);
        module.poly_rsh_inplace(&mut ct.c1, bits);
        module.poly_truncate_inplace(&mut ct.c0, log_qi);
        module.poly_truncate_inplace(&mut ct.c1, log_qi);

        debug!("mod_switch: level {} -> {}", ct.level, new_level);

        ct.level = new_level;
        ct.log_scale -= bits;
        ct.noise = ct.noise.rescale(bits, self.params.log_b_scale());
        ct.high_bits = 0;
        Ok(())
    }

    /// Rescales `ct` to the next level.
    pub fn mod_switch(&self, ct: &Ciphertext) -> Result<Ciphertext> {
        self.mod_switch_to(ct, ct.level + 1)
    }

    pub fn mod_switch_inplace(&self, ct: &mut Ciphertext) -> Result<()> {
        let new_level: usize = ct.level + 1;
        self.mod_switch_to_inplace(ct, new_level)
    }

    pub fn mod_embed_to(&self, ct: &Ciphertext, new_level: usize) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.mod_embed_to_inplace(&mut res, new_level)?;
        Ok(res)
    }

    /// Reduces `c0` and `c1` modulo `qi(new_level)` without touching the
    /// encoded value or its scale.
    pub fn mod_embed_to_inplace(&self, ct: &mut Ciphertext, new_level: usize) -> Result<()> {
        let jump: usize = self.levels.jump(ct.level, new_level)?;
        if jump == 0 {
            return Ok(());
        }
        let log_qi: usize = self.levels.log_qi(new_level)?;
        let module: &Module = self.module();
        module.poly_truncate_inplace(&mut ct.c0, log_qi);
        module.poly_truncate_inplace(&mut ct.c1, log_qi);

        debug!("mod_embed: level {} -> {}", ct.level, new_level);

        ct.level = new_level;
        ct.high_bits = 0;
        Ok(())
    }

    /// Embeds `ct` into the next level.
    pub fn mod_embed(&self, ct: &Ciphertext) -> Result<Ciphertext> {
        self.mod_embed_to(ct, ct.level + 1)
    }

    pub fn mod_embed_inplace(&self, ct: &mut Ciphertext) -> Result<()> {
        let new_level: usize = ct.level + 1;
        self.mod_embed_to_inplace(ct, new_level)
    }

    pub fn mult_and_mod_switch(&self, a: &Ciphertext, b: &Ciphertext, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = a.clone();
        self.mult_and_mod_switch_inplace(&mut res, b, width)?;
        Ok(res)
    }

    /// a <- rescale(a * b)
    pub fn mult_and_mod_switch_inplace(&self, a: &mut Ciphertext, b: &Ciphertext, width: Width) -> Result<()> {
        self.levels.jump(a.level, a.level + 1)?;
        check_scale(a.log_scale + b.log_scale, self.params.log_p())?;
        self.mult_inplace(a, b, width)?;
        self.mod_switch_inplace(a)
    }

    pub fn square_and_mod_switch(&self, ct: &Ciphertext, width: Width) -> Result<Ciphertext> {
        let mut res: Ciphertext = ct.clone();
        self.square_and_mod_switch_inplace(&mut res, width)?;
        Ok(res)
    }

    /// ct <- rescale(ct^2)
    pub fn square_and_mod_switch_inplace(&self, ct: &mut Ciphertext, width: Width) -> Result<()> {
        self.levels.jump(ct.level, ct.level + 1)?;
        check_scale(2 * ct.log_scale, self.params.log_p())?;
        self.square_inplace(ct, width)?;
        self.mod_switch_inplace(ct)
    }
}
