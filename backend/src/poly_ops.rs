use itertools::izip;
use rug::Integer;

use crate::{gauss_int::GaussInt, module::Module, poly::Poly};

/// Arithmetic over `Z[i][X]/(X^n+1)` modulo `2^log_q`.
///
/// Every kernel taking a `log_q` argument leaves its output reduced into
/// `[0, 2^log_q)` on both the real and imaginary parts. Right shifts never
/// grow their input and therefore take no modulus.
pub trait PolyOps {
    /// res <- (a + b) mod 2^log_q
    fn poly_add(&self, res: &mut Poly, a: &Poly, b: &Poly, log_q: usize);

    /// res <- (res + a) mod 2^log_q
    fn poly_add_inplace(&self, res: &mut Poly, a: &Poly, log_q: usize);

    /// res <- (a - b) mod 2^log_q
    fn poly_sub(&self, res: &mut Poly, a: &Poly, b: &Poly, log_q: usize);

    /// res <- (res - a) mod 2^log_q
    fn poly_sub_inplace(&self, res: &mut Poly, a: &Poly, log_q: usize);

    /// res <- -res mod 2^log_q
    fn poly_negate_inplace(&self, res: &mut Poly, log_q: usize);

    /// res <- (a * b) mod (X^n+1, 2^log_q)
    fn poly_mul(&self, res: &mut Poly, a: &Poly, b: &Poly, log_q: usize);

    /// res <- (res * a) mod (X^n+1, 2^log_q)
    fn poly_mul_inplace(&self, res: &mut Poly, a: &Poly, log_q: usize);

    /// res <- a^2 mod (X^n+1, 2^log_q)
    fn poly_square(&self, res: &mut Poly, a: &Poly, log_q: usize);

    /// res <- (c * a) mod 2^log_q
    fn poly_mul_scalar(&self, res: &mut Poly, a: &Poly, c: &GaussInt, log_q: usize);

    /// res <- (c * res) mod 2^log_q
    fn poly_mul_scalar_inplace(&self, res: &mut Poly, c: &GaussInt, log_q: usize);

    /// res <- (a << bits) mod 2^log_q
    fn poly_lsh(&self, res: &mut Poly, a: &Poly, bits: usize, log_q: usize);

    /// res <- (res << bits) mod 2^log_q
    fn poly_lsh_inplace(&self, res: &mut Poly, bits: usize, log_q: usize);

    /// res <- floor(a / 2^bits)
    fn poly_rsh(&self, res: &mut Poly, a: &Poly, bits: usize);

    /// res <- floor(res / 2^bits)
    fn poly_rsh_inplace(&self, res: &mut Poly, bits: usize);

    /// res <- a mod 2^log_q
    fn poly_truncate(&self, res: &mut Poly, a: &Poly, log_q: usize);

    /// res <- res mod 2^log_q
    fn poly_truncate_inplace(&self, res: &mut Poly, log_q: usize);

    /// res <- (X^k * a) mod (X^n+1, 2^log_q), `k` taken modulo `2n`.
    fn poly_rotate(&self, res: &mut Poly, a: &Poly, k: i64, log_q: usize);

    /// res <- (X^k * res) mod (X^n+1, 2^log_q)
    fn poly_rotate_inplace(&self, res: &mut Poly, k: i64, log_q: usize);
}

impl PolyOps for Module {
    fn poly_add(&self, res: &mut Poly, a: &Poly, b: &Poly, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(b.n(), self.n());
            assert_eq!(res.n(), self.n());
        }
        let bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        izip!(res_re.iter_mut(), a.re().iter(), b.re().iter())
            .chain(izip!(res_im.iter_mut(), a.im().iter(), b.im().iter()))
            .for_each(|(r, x, y)| {
                *r = Integer::from(x + y);
                r.keep_bits_mut(bits);
            });
    }

    fn poly_add_inplace(&self, res: &mut Poly, a: &Poly, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(res.n(), self.n());
        }
        let bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        izip!(res_re.iter_mut(), a.re().iter())
            .chain(izip!(res_im.iter_mut(), a.im().iter()))
            .for_each(|(r, x)| {
                *r += x;
                r.keep_bits_mut(bits);
            });
    }

    fn poly_sub(&self, res: &mut Poly, a: &Poly, b: &Poly, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(b.n(), self.n());
            assert_eq!(res.n(), self.n());
        }
        let bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        izip!(res_re.iter_mut(), a.re().iter(), b.re().iter())
            .chain(izip!(res_im.iter_mut(), a.im().iter(), b.im().iter()))
            .for_each(|(r, x, y)| {
                *r = Integer::from(x - y);
                r.keep_bits_mut(bits);
            });
    }

    fn poly_sub_inplace(&self, res: &mut Poly, a: &Poly, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(res.n(), self.n());
        }
        let bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        izip!(res_re.iter_mut(), a.re().iter())
            .chain(izip!(res_im.iter_mut(), a.im().iter()))
            .for_each(|(r, x)| {
                *r -= x;
                r.keep_bits_mut(bits);
            });
    }

    fn poly_negate_inplace(&self, res: &mut Poly, log_q: usize) {
        let bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        res_re.iter_mut().chain(res_im.iter_mut()).for_each(|r| {
            *r = Integer::from(-&*r);
            r.keep_bits_mut(bits);
        });
    }

    fn poly_mul(&self, res: &mut Poly, a: &Poly, b: &Poly, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(b.n(), self.n());
            assert_eq!(res.n(), self.n());
        }

        // (ar + i*ai)(br + i*bi) = (ar*br - ai*bi) + i*((ar+ai)(br+bi) - ar*br - ai*bi)
        let rr: Vec<Integer> = negacyclic_mul(a.re(), b.re());
        let ii: Vec<Integer> = negacyclic_mul(a.im(), b.im());
        let a_sum: Vec<Integer> = izip!(a.re().iter(), a.im().iter())
            .map(|(x, y)| Integer::from(x + y))
            .collect();
        let b_sum: Vec<Integer> = izip!(b.re().iter(), b.im().iter())
            .map(|(x, y)| Integer::from(x + y))
            .collect();
        let ss: Vec<Integer> = negacyclic_mul(&a_sum, &b_sum);

        combine_karatsuba(res, rr, ii, ss, log_q);
    }

    fn poly_mul_inplace(&self, res: &mut Poly, a: &Poly, log_q: usize) {
        let mut tmp: Poly = self.new_poly();
        self.poly_mul(&mut tmp, res, a, log_q);
        *res = tmp;
    }

    fn poly_square(&self, res: &mut Poly, a: &Poly, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(res.n(), self.n());
        }

        // (ar + i*ai)^2 = (ar^2 - ai^2) + i*(2*ar*ai)
        let rr: Vec<Integer> = negacyclic_mul(a.re(), a.re());
        let ii: Vec<Integer> = negacyclic_mul(a.im(), a.im());
        let ri: Vec<Integer> = negacyclic_mul(a.re(), a.im());

        let bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        izip!(res_re.iter_mut(), rr, ii).for_each(|(r, x, y)| {
            *r = x - y;
            r.keep_bits_mut(bits);
        });
        izip!(res_im.iter_mut(), ri).for_each(|(r, x)| {
            *r = x << 1u32;
            r.keep_bits_mut(bits);
        });
    }

    fn poly_mul_scalar(&self, res: &mut Poly, a: &Poly, c: &GaussInt, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(res.n(), self.n());
        }
        let bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        izip!(res_re.iter_mut(), res_im.iter_mut(), a.re().iter(), a.im().iter()).for_each(|(r, i, x, y)| {
            let mut re: Integer = Integer::from(x * &c.re);
            re -= y * &c.im;
            let mut im: Integer = Integer::from(x * &c.im);
            im += y * &c.re;
            re.keep_bits_mut(bits);
            im.keep_bits_mut(bits);
            *r = re;
            *i = im;
        });
    }

    fn poly_mul_scalar_inplace(&self, res: &mut Poly, c: &GaussInt, log_q: usize) {
        let mut tmp: Poly = self.new_poly();
        self.poly_mul_scalar(&mut tmp, res, c, log_q);
        *res = tmp;
    }

    fn poly_lsh(&self, res: &mut Poly, a: &Poly, bits: usize, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(res.n(), self.n());
        }
        let q_bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        izip!(res_re.iter_mut(), a.re().iter())
            .chain(izip!(res_im.iter_mut(), a.im().iter()))
            .for_each(|(r, x)| {
                *r = Integer::from(x << bits as u32);
                r.keep_bits_mut(q_bits);
            });
    }

    fn poly_lsh_inplace(&self, res: &mut Poly, bits: usize, log_q: usize) {
        let q_bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        res_re.iter_mut().chain(res_im.iter_mut()).for_each(|r| {
            *r <<= bits as u32;
            r.keep_bits_mut(q_bits);
        });
    }

    fn poly_rsh(&self, res: &mut Poly, a: &Poly, bits: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(res.n(), self.n());
        }
        let (res_re, res_im) = res.parts_mut();
        izip!(res_re.iter_mut(), a.re().iter())
            .chain(izip!(res_im.iter_mut(), a.im().iter()))
            .for_each(|(r, x)| {
                *r = Integer::from(x >> bits as u32);
            });
    }

    fn poly_rsh_inplace(&self, res: &mut Poly, bits: usize) {
        let (res_re, res_im) = res.parts_mut();
        res_re
            .iter_mut()
            .chain(res_im.iter_mut())
            .for_each(|r| *r >>= bits as u32);
    }

    fn poly_truncate(&self, res: &mut Poly, a: &Poly, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(res.n(), self.n());
        }
        let bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        izip!(res_re.iter_mut(), a.re().iter())
            .chain(izip!(res_im.iter_mut(), a.im().iter()))
            .for_each(|(r, x)| {
                r.clone_from(x);
                r.keep_bits_mut(bits);
            });
    }

    fn poly_truncate_inplace(&self, res: &mut Poly, log_q: usize) {
        let bits: u32 = log_q as u32;
        let (res_re, res_im) = res.parts_mut();
        res_re
            .iter_mut()
            .chain(res_im.iter_mut())
            .for_each(|r| r.keep_bits_mut(bits));
    }

    fn poly_rotate(&self, res: &mut Poly, a: &Poly, k: i64, log_q: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(a.n(), self.n());
            assert_eq!(res.n(), self.n());
        }
        let n: usize = self.n();
        let bits: u32 = log_q as u32;
        let shift: usize = k.rem_euclid(2 * n as i64) as usize;
        let (res_re, res_im) = res.parts_mut();
        rotate_negacyclic(res_re, a.re(), shift, bits);
        rotate_negacyclic(res_im, a.im(), shift, bits);
    }

    fn poly_rotate_inplace(&self, res: &mut Poly, k: i64, log_q: usize) {
        let mut tmp: Poly = self.new_poly();
        self.poly_rotate(&mut tmp, res, k, log_q);
        *res = tmp;
    }
}

/// Schoolbook product in `Z[X]/(X^n+1)`, no reduction of the coefficients.
fn negacyclic_mul(a: &[Integer], b: &[Integer]) -> Vec<Integer> {
    let n: usize = a.len();
    let mut res: Vec<Integer> = vec![Integer::new(); n];
    a.iter().enumerate().filter(|(_, x)| !x.is_zero()).for_each(|(i, x)| {
        b.iter().enumerate().for_each(|(j, y)| {
            let k: usize = i + j;
            if k < n {
                res[k] += x * y;
            } else {
                res[k - n] -= x * y;
            }
        });
    });
    res
}

fn combine_karatsuba(res: &mut Poly, rr: Vec<Integer>, ii: Vec<Integer>, ss: Vec<Integer>, log_q: usize) {
    let bits: u32 = log_q as u32;
    let (res_re, res_im) = res.parts_mut();
    izip!(res_re.iter_mut(), res_im.iter_mut(), rr, ii, ss).for_each(|(r, i, x, y, s)| {
        let mut im: Integer = s;
        im -= &x;
        im -= &y;
        im.keep_bits_mut(bits);
        let mut re: Integer = x;
        re -= y;
        re.keep_bits_mut(bits);
        *r = re;
        *i = im;
    });
}

/// res <- X^shift * a with `shift` in `[0, 2n)`.
fn rotate_negacyclic(res: &mut [Integer], a: &[Integer], shift: usize, bits: u32) {
    let n: usize = a.len();
    a.iter().enumerate().for_each(|(i, x)| {
        let j: usize = i + shift;
        if j < n {
            res[j].clone_from(x);
            res[j].keep_bits_mut(bits);
        } else if j < 2 * n {
            res[j - n] = Integer::from(-x);
            res[j - n].keep_bits_mut(bits);
        } else {
            res[j - 2 * n].clone_from(x);
            res[j - 2 * n].keep_bits_mut(bits);
        }
    });
}
