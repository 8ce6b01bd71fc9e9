use std::f64::consts::PI;

/// Table of the `m = 2n` complex roots of unity `exp(2*pi*i*t/m)`, split in
/// real and imaginary parts.
///
/// A polynomial of `slots` coefficients living in `Z[Y]/(Y^slots+1)`, with
/// `Y = X^(n/slots)`, is evaluated at the odd powers of `zeta = exp(i*pi/slots)`,
/// which are the roots of `Y^slots+1`. Products of such polynomials are
/// therefore slot-wise products of their evaluations.
#[derive(Clone, Debug, PartialEq)]
pub struct RootTable {
    m: usize,
    re: Vec<f64>,
    im: Vec<f64>,
}

impl RootTable {
    pub fn new(n: usize) -> Self {
        assert!(n.is_power_of_two(), "n must be a power of two but is {n}");
        let m: usize = 2 * n;
        let two_pi: f64 = 2.0 * PI;
        let (re, im): (Vec<f64>, Vec<f64>) = (0..m)
            .map(|t| {
                let angle: f64 = two_pi * (t as f64) / (m as f64);
                (angle.cos(), angle.sin())
            })
            .unzip();
        Self { m, re, im }
    }

    /// Returns the order of the primitive root of the table.
    pub fn m(&self) -> usize {
        self.m
    }

    #[inline(always)]
    fn root(&self, t: usize) -> (f64, f64) {
        let t: usize = t & (self.m - 1);
        (self.re[t], self.im[t])
    }

    /// Evaluates in place the polynomial of coefficients `(re, im)` at
    /// `zeta^(2j+1)` for `j` in `0..slots`.
    pub fn fft_twisted(&self, re: &mut [f64], im: &mut [f64]) {
        let slots: usize = self.check_slots(re, im);
        let step: usize = self.m / (2 * slots);

        // c_k <- c_k * zeta^k
        (0..slots).for_each(|k| {
            let (wr, wi) = self.root(k * step);
            cplx_mul_assign(&mut re[k], &mut im[k], wr, wi);
        });

        self.dft(re, im, false);
    }

    /// Inverse of [RootTable::fft_twisted].
    pub fn ifft_twisted(&self, re: &mut [f64], im: &mut [f64]) {
        let slots: usize = self.check_slots(re, im);
        let step: usize = self.m / (2 * slots);

        self.dft(re, im, true);

        // c_k <- c_k * zeta^-k / slots
        let inv: f64 = 1.0 / slots as f64;
        (0..slots).for_each(|k| {
            let (wr, wi) = self.root(self.m - k * step);
            cplx_mul_assign(&mut re[k], &mut im[k], wr * inv, wi * inv);
        });
    }

    fn check_slots(&self, re: &[f64], im: &[f64]) -> usize {
        let slots: usize = re.len();
        assert_eq!(slots, im.len());
        assert!(
            slots.is_power_of_two() && 2 * slots <= self.m,
            "invalid slots: {} must be a power of two <= {}",
            slots,
            self.m / 2
        );
        slots
    }

    /// Radix-2 transform `v_j = sum_k c_k * w^(jk)` with `w = exp(±2*pi*i/slots)`.
    fn dft(&self, re: &mut [f64], im: &mut [f64], inverse: bool) {
        let slots: usize = re.len();
        bit_reverse(re, im);

        let mut len: usize = 2;
        while len <= slots {
            let stride: usize = self.m / len;
            let half: usize = len >> 1;
            (0..slots).step_by(len).for_each(|start| {
                (0..half).for_each(|j| {
                    let t: usize = if inverse { self.m - j * stride } else { j * stride };
                    let (wr, wi) = self.root(t);
                    let (a, b) = (start + j, start + j + half);
                    let (mut ra, mut ia, mut rb, mut ib) = (re[a], im[a], re[b], im[b]);
                    cplx_twiddle(&mut ra, &mut ia, &mut rb, &mut ib, wr, wi);
                    re[a] = ra;
                    im[a] = ia;
                    re[b] = rb;
                    im[b] = ib;
                })
            });
            len <<= 1;
        }
    }
}

#[inline(always)]
fn cplx_mul_assign(re: &mut f64, im: &mut f64, wr: f64, wi: f64) {
    let r: f64 = *re * wr - *im * wi;
    let i: f64 = *re * wi + *im * wr;
    *re = r;
    *im = i;
}

#[inline(always)]
fn cplx_twiddle(ra: &mut f64, ia: &mut f64, rb: &mut f64, ib: &mut f64, omg_re: f64, omg_im: f64) {
    let dr: f64 = *rb * omg_re - *ib * omg_im;
    let di: f64 = *rb * omg_im + *ib * omg_re;
    *rb = *ra - dr;
    *ib = *ia - di;
    *ra += dr;
    *ia += di;
}

fn bit_reverse(re: &mut [f64], im: &mut [f64]) {
    let size: usize = re.len();
    if size <= 2 {
        return;
    }
    let log_size: u32 = size.trailing_zeros();
    (0..size).for_each(|i| {
        let j: usize = i.reverse_bits() >> (usize::BITS - log_size);
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    });
}
