//! Complex-valued kernels: products, narrowing and lane shuffles.

use crate::{
    error::{ensure_len, KernelError, Result},
    simd::{
        kernels::{self, ConjMulC16, MulC16, NegI8, PackC16, SignI8},
        slice, Backend,
    },
    types::{components, components_mut, Complex16, Complex8},
};

// Products are formed in 32 bits before the shift
const PRODUCT_BITS: u32 = 32;

#[inline(always)]
fn ensure_product_shift(shift: u32) -> Result<()> {
    if shift < PRODUCT_BITS {
        Ok(())
    } else {
        Err(KernelError::InvalidShift {
            shift,
            bits: PRODUCT_BITS,
        })
    }
}

impl Backend {
    /// Complex multiply with post-shift.
    ///
    /// ```text
    /// out.re = (x.re * y.re - x.im * y.im) >> shift
    /// out.im = (x.re * y.im + x.im * y.re) >> shift
    /// ```
    ///
    /// Products and sums wrap at 32 bits, the shift is arithmetic and the
    /// result is truncated to 16 bits. `shift = 0` is plain complex
    /// multiplication.
    pub fn multiply(self, out: &mut [Complex16], x: &[Complex16], y: &[Complex16], shift: u32) -> Result<()> {
        ensure_product_shift(shift)?;
        ensure_len("multiply", x.len(), y.len())?;
        ensure_len("multiply", x.len(), out.len())?;
        slice::binary(self, &MulC16 { shift }, out, x, y);
        Ok(())
    }

    /// Multiplies `x` by the conjugate of `y`, same shift convention as
    /// [`Backend::multiply`].
    ///
    /// ```text
    /// out.re = (x.re * y.re + x.im * y.im) >> shift
    /// out.im = (x.im * y.re - x.re * y.im) >> shift
    /// ```
    pub fn conj_multiply(self, out: &mut [Complex16], x: &[Complex16], y: &[Complex16], shift: u32) -> Result<()> {
        ensure_product_shift(shift)?;
        ensure_len("conj_multiply", x.len(), y.len())?;
        ensure_len("conj_multiply", x.len(), out.len())?;
        slice::binary(self, &ConjMulC16 { shift }, out, x, y);
        Ok(())
    }

    /// Full-precision `x * conj(y)`: real parts to `re`, imaginary parts to
    /// `im`, no shift.
    pub fn conj_multiply_i32(self, re: &mut [i32], im: &mut [i32], x: &[Complex16], y: &[Complex16]) -> Result<()> {
        ensure_len("conj_multiply_i32", x.len(), y.len())?;
        ensure_len("conj_multiply_i32", x.len(), re.len())?;
        ensure_len("conj_multiply_i32", x.len(), im.len())?;
        kernels::conj_mul_c16_split(self, re, im, x, y);
        Ok(())
    }

    /// Narrows each component to 8 bits, saturating to `[-128, 127]`.
    pub fn pack(self, out: &mut [Complex8], input: &[Complex16]) -> Result<()> {
        ensure_len("pack", input.len(), out.len())?;
        slice::unary(self, &PackC16, out, input);
        Ok(())
    }

    /// Negates both components; `-128` stays `-128`.
    pub fn negate(self, out: &mut [Complex8], input: &[Complex8]) -> Result<()> {
        ensure_len("negate", input.len(), out.len())?;
        slice::unary(self, &NegI8, components_mut(out), components(input));
        Ok(())
    }

    /// `out[i]` is `-a[i]`, `0` or `a[i]` for negative, zero or positive `b[i]`.
    pub fn sign(self, out: &mut [i8], a: &[i8], b: &[i8]) -> Result<()> {
        ensure_len("sign", a.len(), b.len())?;
        ensure_len("sign", a.len(), out.len())?;
        slice::binary(self, &SignI8, out, a, b);
        Ok(())
    }

    /// Keeps every even-indexed sample. A trailing odd sample is dropped.
    pub fn downsample(self, out: &mut [Complex16], input: &[Complex16]) -> Result<()> {
        ensure_len("downsample", input.len() / 2, out.len())?;
        kernels::downsample_c16(self, out, input);
        Ok(())
    }
}

/// Reinterprets complex bytes as a flat `i8` buffer: `re0, im0, re1, im1, ...`.
///
/// # Errors
///
/// [`KernelError::LengthMismatch`] unless `out.len() == 2 * input.len()`.
pub fn cast(out: &mut [i8], input: &[Complex8]) -> Result<()> {
    ensure_len("cast", input.len() * 2, out.len())?;
    out.copy_from_slice(components(input));
    Ok(())
}

/// `y = [x1, x3, x1, x3]`.
#[inline]
pub fn permute_odd(y: &mut [Complex16; 4], x: &[Complex16; 4]) {
    *y = [x[1], x[3], x[1], x[3]];
}

/// `z = [x0, x1, y0, y1]`.
#[inline]
pub fn interleave_low(z: &mut [Complex16; 4], x: &[Complex16; 4], y: &[Complex16; 4]) {
    *z = [x[0], x[1], y[0], y[1]];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: i16, im: i16) -> Complex16 {
        Complex16::new(re, im)
    }

    #[test]
    fn test_multiply_shift_is_arithmetic() {
        let x = [c(-3, 0)];
        let y = [c(1, 0)];
        let mut out = [Complex16::default()];
        Backend::Scalar.multiply(&mut out, &x, &y, 1).unwrap();
        // -3 >> 1 rounds toward negative infinity
        assert_eq!(out[0], c(-2, 0));
    }

    #[test]
    fn test_multiply_rejects_wide_shift() {
        let mut out = [Complex16::default()];
        let error = Backend::Scalar.multiply(&mut out, &[c(1, 1)], &[c(1, 1)], 32);
        assert_eq!(error, Err(KernelError::InvalidShift { shift: 32, bits: 32 }));
    }

    #[test]
    fn test_pack_saturates() {
        let input = [c(200, -200), c(-5, 127), c(128, -129)];
        let mut out = [Complex8::default(); 3];
        Backend::Scalar.pack(&mut out, &input).unwrap();
        assert_eq!(out, [Complex8::new(127, -128), Complex8::new(-5, 127), Complex8::new(127, -128)]);
    }

    #[test]
    fn test_cast_layout() {
        let input = [Complex8::new(1, -1), Complex8::new(2, -2)];
        let mut out = [0i8; 4];
        cast(&mut out, &input).unwrap();
        assert_eq!(out, [1, -1, 2, -2]);
        assert!(cast(&mut out[..3], &input).is_err());
    }

    #[test]
    fn test_negate_wraps_minimum() {
        let input = [Complex8::new(i8::MIN, 5)];
        let mut out = [Complex8::default()];
        Backend::Scalar.negate(&mut out, &input).unwrap();
        assert_eq!(out[0], Complex8::new(i8::MIN, -5));
    }

    #[test]
    fn test_downsample_odd_length() {
        let input: Vec<Complex16> = (0..5).map(|i| c(i, -i)).collect();
        let mut out = [Complex16::default(); 2];
        Backend::Scalar.downsample(&mut out, &input).unwrap();
        assert_eq!(out, [c(0, 0), c(2, -2)]);
    }

    #[test]
    fn test_shuffles() {
        let x = [c(0, 0), c(1, 1), c(2, 2), c(3, 3)];
        let y = [c(4, 4), c(5, 5), c(6, 6), c(7, 7)];

        let mut permuted = [Complex16::default(); 4];
        permute_odd(&mut permuted, &x);
        assert_eq!(permuted, [c(1, 1), c(3, 3), c(1, 1), c(3, 3)]);

        let mut interleaved = [Complex16::default(); 4];
        interleave_low(&mut interleaved, &x, &y);
        assert_eq!(interleaved, [c(0, 0), c(1, 1), c(4, 4), c(5, 5)]);
    }
}
