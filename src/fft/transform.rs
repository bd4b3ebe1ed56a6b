//! Fixed-length mixed-radix transforms.
//!
//! Each length is factored at compile time into radix-4, radix-2, radix-3
//! and radix-5 stages (in that order) and run as a Stockham autosort
//! transform, which needs no bit-reversal pass and ping-pongs between two
//! stack buffers.
//!
//! A stage of radix `p` over sub-length `n` with stride `s` maps
//!
//! ```text
//! y[t + s(p q + k)] = Σ_j x[t + s(q + m j)] · W_n^(k (j m + q)),   m = n / p
//! ```
//!
//! so the small DFT and the inter-stage twiddle collapse into one table
//! lookup per term. Sums are exact in 64 bits; each output is rounded once
//! (half away from zero) and wrapped to 16 bits. Forward stages also divide
//! by `p`, giving an overall `1/N`; inverse stages do not scale.

use crate::{
    error::{length_mismatch, Result},
    fft::{size::TransformSize, twiddle},
    types::{Complex16, Complex32},
};

const MAX_STAGES: usize = 8;
const MAX_RADIX: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Inverse,
}

/// Radix sequence of one transform length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadixPlan {
    radices: [usize; MAX_STAGES],
    stages: usize,
}

impl RadixPlan {
    /// Factors `len` into 4s, then at most one 2, then 3s and 5s. Lengths
    /// with any other prime factor have no plan.
    pub const fn factor(len: usize) -> Option<Self> {
        let mut plan = RadixPlan {
            radices: [0; MAX_STAGES],
            stages: 0,
        };
        if len < 2 {
            return None;
        }

        let mut rest = len;
        let candidates = [4, 2, 3, 5];
        let mut c = 0;
        while c < candidates.len() {
            let radix = candidates[c];
            while rest % radix == 0 {
                if plan.stages == MAX_STAGES {
                    return None;
                }
                plan.radices[plan.stages] = radix;
                plan.stages += 1;
                rest /= radix;
            }
            c += 1;
        }

        if rest == 1 {
            Some(plan)
        } else {
            None
        }
    }

    pub fn radices(&self) -> &[usize] {
        &self.radices[..self.stages]
    }
}

/// `N`-point transform over `Complex16`.
///
/// Only catalog lengths can be instantiated; any other `N` fails to compile
/// as soon as one of the methods is used.
///
/// ```
/// use phy_kernels::{fft::Transform, Complex16};
///
/// let mut input = [Complex16::default(); 64];
/// input[0] = Complex16::new(64 * 100, 0);
/// let mut output = [Complex16::default(); 64];
///
/// Transform::<64>::forward(&mut output, &input);
/// assert!(output.iter().all(|&bin| bin == Complex16::new(100, 0)));
/// ```
pub struct Transform<const N: usize>;

impl<const N: usize> Transform<N> {
    pub const SIZE: TransformSize = match TransformSize::from_len(N) {
        Some(size) => size,
        None => panic!("transform length is not in the catalog"),
    };

    pub const PLAN: RadixPlan = match RadixPlan::factor(N) {
        Some(plan) => plan,
        None => panic!("transform length has no radix plan"),
    };

    /// Forward transform scaled by `1/N`.
    pub fn forward(output: &mut [Complex16; N], input: &[Complex16; N]) {
        Self::process(Direction::Forward, output, input);
    }

    /// Unscaled inverse transform.
    pub fn inverse(output: &mut [Complex16; N], input: &[Complex16; N]) {
        Self::process(Direction::Inverse, output, input);
    }

    pub fn forward_in_place(buffer: &mut [Complex16; N]) {
        let input = *buffer;
        Self::process(Direction::Forward, buffer, &input);
    }

    pub fn inverse_in_place(buffer: &mut [Complex16; N]) {
        let input = *buffer;
        Self::process(Direction::Inverse, buffer, &input);
    }

    pub(crate) fn run_slices(direction: Direction, output: &mut [Complex16], input: &[Complex16]) -> Result<()> {
        let input: &[Complex16; N] = input
            .try_into()
            .map_err(|_| length_mismatch("fft input", N, input.len()))?;
        let output_len = output.len();
        let output: &mut [Complex16; N] = output
            .try_into()
            .map_err(|_| length_mismatch("fft output", N, output_len))?;

        Self::process(direction, output, input);
        Ok(())
    }

    pub(crate) fn run_in_place(direction: Direction, buffer: &mut [Complex16]) -> Result<()> {
        let buffer_len = buffer.len();
        let buffer: &mut [Complex16; N] = buffer
            .try_into()
            .map_err(|_| length_mismatch("fft buffer", N, buffer_len))?;

        let input = *buffer;
        Self::process(direction, buffer, &input);
        Ok(())
    }

    fn process(direction: Direction, output: &mut [Complex16; N], input: &[Complex16; N]) {
        let table = twiddle::table(Self::SIZE);

        let mut ping = *input;
        let mut pong = [Complex16::default(); N];
        let (mut src, mut dst) = (&mut ping, &mut pong);

        let mut n = N;
        let mut stride = 1;
        for &radix in Self::PLAN.radices() {
            stage(direction, radix, n, stride, table, &src[..], &mut dst[..]);
            std::mem::swap(&mut src, &mut dst);
            n /= radix;
            stride *= radix;
        }

        *output = *src;
    }
}

/// Rounds `value / divisor` half away from zero.
#[inline(always)]
fn div_round(value: i64, divisor: i64) -> i64 {
    let half = divisor / 2;
    if value >= 0 {
        (value + half) / divisor
    } else {
        -((half - value) / divisor)
    }
}

fn stage(
    direction: Direction,
    radix: usize,
    n: usize,
    stride: usize,
    table: &[Complex32],
    x: &[Complex16],
    y: &mut [Complex16],
) {
    let m = n / radix;
    let step = x.len() / n;
    let divisor = match direction {
        Direction::Forward => twiddle::Q15_ONE * radix as i64,
        Direction::Inverse => twiddle::Q15_ONE,
    };

    let mut gathered = [Complex16::default(); MAX_RADIX];
    for q in 0..m {
        for t in 0..stride {
            for (j, a) in gathered[..radix].iter_mut().enumerate() {
                *a = x[t + stride * (q + m * j)];
            }

            for k in 0..radix {
                let (mut re, mut im) = (0i64, 0i64);
                for (j, a) in gathered[..radix].iter().enumerate() {
                    let w = table[(k * (j * m + q)) % n * step];
                    let (wr, wi) = match direction {
                        Direction::Forward => (w.re as i64, w.im as i64),
                        Direction::Inverse => (w.re as i64, -(w.im as i64)),
                    };
                    let (ar, ai) = (a.re as i64, a.im as i64);
                    re += ar * wr - ai * wi;
                    im += ar * wi + ai * wr;
                }

                y[t + stride * (radix * q + k)] =
                    Complex16::new(div_round(re, divisor) as i16, div_round(im, divisor) as i16);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_plans() {
        assert_eq!(RadixPlan::factor(64).unwrap().radices(), &[4, 4, 4]);
        assert_eq!(RadixPlan::factor(2048).unwrap().radices(), &[4, 4, 4, 4, 4, 2]);
        assert_eq!(RadixPlan::factor(1080).unwrap().radices(), &[4, 2, 3, 3, 3, 5]);
        assert_eq!(RadixPlan::factor(1200).unwrap().radices(), &[4, 4, 3, 5, 5]);
        assert!(RadixPlan::factor(14).is_none());
        assert!(RadixPlan::factor(1).is_none());
    }

    #[test]
    fn test_every_catalog_length_has_a_plan() {
        for size in TransformSize::ALL {
            let plan = RadixPlan::factor(size.len()).unwrap();
            assert_eq!(plan.radices().iter().product::<usize>(), size.len());
        }
    }

    #[test]
    fn test_div_round_half_away_from_zero() {
        assert_eq!(div_round(3, 2), 2);
        assert_eq!(div_round(-3, 2), -2);
        assert_eq!(div_round(5, 4), 1);
        assert_eq!(div_round(-5, 4), -1);
        assert_eq!(div_round(6, 4), 2);
        assert_eq!(div_round(-6, 4), -2);
    }

    #[test]
    fn test_single_tone_lands_in_one_bin() {
        // The inverse of a single bin is a tone; the forward transform brings it back
        const N: usize = 16;
        let mut input = [Complex16::default(); N];
        Transform::<N>::inverse(&mut input, &{
            let mut bins = [Complex16::default(); N];
            bins[3] = Complex16::new(1000, 0);
            bins
        });

        let mut output = [Complex16::default(); N];
        Transform::<N>::forward(&mut output, &input);
        for (k, bin) in output.iter().enumerate() {
            if k == 3 {
                assert!((bin.re - 1000).abs() <= 2 && bin.im.abs() <= 2, "bin 3 = {:?}", bin);
            } else {
                assert!(bin.re.abs() <= 2 && bin.im.abs() <= 2, "bin {} = {:?}", k, bin);
            }
        }
    }
}
