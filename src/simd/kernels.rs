//! Kernel definitions: the scalar operation of every lane kernel plus the
//! block override for the instruction set `build.rs` selected.

#[cfg(neon)]
use crate::simd::neon;
#[cfg(sse2)]
use crate::simd::sse2;
use crate::{
    simd::{
        traits::{BinaryKernel, UnaryKernel},
        Backend,
    },
    types::{Complex16, Complex8},
};

// Blocks are 128-bit registers on every supported instruction set.
pub(crate) const I8_LANES: usize = 16;
pub(crate) const I16_LANES: usize = 8;
pub(crate) const I32_LANES: usize = 4;
pub(crate) const C16_LANES: usize = 4;

// ================================================================================================
// SCALAR DEFINITIONS
// ================================================================================================

#[inline(always)]
pub(crate) fn mul_c16(x: Complex16, y: Complex16, shift: u32) -> Complex16 {
    let (xr, xi, yr, yi) = (x.re as i32, x.im as i32, y.re as i32, y.im as i32);
    let re = (xr * yr).wrapping_sub(xi * yi) >> shift;
    let im = (xr * yi).wrapping_add(xi * yr) >> shift;
    Complex16::new(re as i16, im as i16)
}

#[inline(always)]
pub(crate) fn conj_mul_c16_wide(x: Complex16, y: Complex16) -> (i32, i32) {
    let (xr, xi, yr, yi) = (x.re as i32, x.im as i32, y.re as i32, y.im as i32);
    let re = (xr * yr).wrapping_add(xi * yi);
    let im = (xi * yr).wrapping_sub(xr * yi);
    (re, im)
}

#[inline(always)]
pub(crate) fn conj_mul_c16(x: Complex16, y: Complex16, shift: u32) -> Complex16 {
    let (re, im) = conj_mul_c16_wide(x, y);
    Complex16::new((re >> shift) as i16, (im >> shift) as i16)
}

#[inline(always)]
pub(crate) fn saturate_i8(v: i16) -> i8 {
    v.clamp(i8::MIN as i16, i8::MAX as i16) as i8
}

#[inline(always)]
pub(crate) fn sign_i8(a: i8, b: i8) -> i8 {
    match b {
        0 => 0,
        b if b < 0 => a.wrapping_neg(),
        _ => a,
    }
}

// ================================================================================================
// LANE KERNELS
// ================================================================================================

macro_rules! binary_lane_kernel {
    ($name:ident, $lane:ty, $lanes:expr, $op:expr, sse2 = $sse:ident, neon = $neon:ident) => {
        pub(crate) struct $name;

        impl BinaryKernel for $name {
            type Input = $lane;
            type Output = $lane;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn scalar(&self, a: $lane, b: $lane) -> $lane {
                $op(a, b)
            }

            #[cfg(sse2)]
            #[inline(always)]
            fn block(&self, a: &[$lane], b: &[$lane], out: &mut [$lane]) {
                // SAFETY: cfg(sse2) is only set when the target CPU has SSE2;
                // the driver hands over exactly LANES elements per slice.
                unsafe { sse2::$sse(a, b, out) }
            }

            #[cfg(neon)]
            #[inline(always)]
            fn block(&self, a: &[$lane], b: &[$lane], out: &mut [$lane]) {
                // SAFETY: cfg(neon) is only set when the target CPU has NEON;
                // the driver hands over exactly LANES elements per slice.
                unsafe { neon::$neon(a, b, out) }
            }
        }
    };
}

macro_rules! shift_lane_kernel {
    ($name:ident, $lane:ty, $lanes:expr, $op:expr, sse2 = $sse:ident, neon = $neon:ident) => {
        pub(crate) struct $name {
            pub(crate) shift: u32,
        }

        impl UnaryKernel for $name {
            type Input = $lane;
            type Output = $lane;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn scalar(&self, a: $lane) -> $lane {
                $op(a, self.shift)
            }

            #[cfg(sse2)]
            #[inline(always)]
            fn block(&self, a: &[$lane], out: &mut [$lane]) {
                // SAFETY: see binary_lane_kernel; shift < lane width is
                // validated by the public entry points.
                unsafe { sse2::$sse(a, out, self.shift) }
            }

            #[cfg(neon)]
            #[inline(always)]
            fn block(&self, a: &[$lane], out: &mut [$lane]) {
                // SAFETY: see binary_lane_kernel; shift < lane width is
                // validated by the public entry points.
                unsafe { neon::$neon(a, out, self.shift) }
            }
        }
    };
}

binary_lane_kernel!(AddI16, i16, I16_LANES, |a: i16, b: i16| a.wrapping_add(b), sse2 = add_i16, neon = add_i16);
binary_lane_kernel!(AddI32, i32, I32_LANES, |a: i32, b: i32| a.wrapping_add(b), sse2 = add_i32, neon = add_i32);
binary_lane_kernel!(SubI16, i16, I16_LANES, |a: i16, b: i16| a.wrapping_sub(b), sse2 = sub_i16, neon = sub_i16);
binary_lane_kernel!(SubI32, i32, I32_LANES, |a: i32, b: i32| a.wrapping_sub(b), sse2 = sub_i32, neon = sub_i32);

binary_lane_kernel!(AndU8, u8, I8_LANES, |a: u8, b: u8| a & b, sse2 = and_u8, neon = and_u8);
binary_lane_kernel!(OrU8, u8, I8_LANES, |a: u8, b: u8| a | b, sse2 = or_u8, neon = or_u8);
binary_lane_kernel!(XorU8, u8, I8_LANES, |a: u8, b: u8| a ^ b, sse2 = xor_u8, neon = xor_u8);
binary_lane_kernel!(AndNotU8, u8, I8_LANES, |a: u8, b: u8| !a & b, sse2 = andnot_u8, neon = andnot_u8);

binary_lane_kernel!(SignI8, i8, I8_LANES, sign_i8, sse2 = sign_i8, neon = sign_i8);

shift_lane_kernel!(ShlI16, i16, I16_LANES, |a: i16, s: u32| a.wrapping_shl(s), sse2 = shl_i16, neon = shl_i16);
shift_lane_kernel!(ShrI16, i16, I16_LANES, |a: i16, s: u32| a >> s, sse2 = shr_i16, neon = shr_i16);
shift_lane_kernel!(ShlI32, i32, I32_LANES, |a: i32, s: u32| a.wrapping_shl(s), sse2 = shl_i32, neon = shl_i32);
shift_lane_kernel!(ShrI32, i32, I32_LANES, |a: i32, s: u32| a >> s, sse2 = shr_i32, neon = shr_i32);

pub(crate) struct NegI8;

impl UnaryKernel for NegI8 {
    type Input = i8;
    type Output = i8;
    const LANES: usize = I8_LANES;

    #[inline(always)]
    fn scalar(&self, a: i8) -> i8 {
        a.wrapping_neg()
    }

    #[cfg(sse2)]
    #[inline(always)]
    fn block(&self, a: &[i8], out: &mut [i8]) {
        // SAFETY: SSE2 present per cfg; slices hold LANES elements.
        unsafe { sse2::neg_i8(a, out) }
    }

    #[cfg(neon)]
    #[inline(always)]
    fn block(&self, a: &[i8], out: &mut [i8]) {
        // SAFETY: NEON present per cfg; slices hold LANES elements.
        unsafe { neon::neg_i8(a, out) }
    }
}

// ================================================================================================
// COMPLEX KERNELS
// ================================================================================================

/// `x * y >> shift` per component.
pub(crate) struct MulC16 {
    pub(crate) shift: u32,
}

impl BinaryKernel for MulC16 {
    type Input = Complex16;
    type Output = Complex16;
    const LANES: usize = C16_LANES;

    #[inline(always)]
    fn scalar(&self, x: Complex16, y: Complex16) -> Complex16 {
        mul_c16(x, y, self.shift)
    }

    #[cfg(sse2)]
    #[inline(always)]
    fn block(&self, x: &[Complex16], y: &[Complex16], out: &mut [Complex16]) {
        // SAFETY: SSE2 present per cfg; slices hold LANES elements; shift < 32.
        unsafe { sse2::mul_c16(x, y, out, self.shift) }
    }

    #[cfg(neon)]
    #[inline(always)]
    fn block(&self, x: &[Complex16], y: &[Complex16], out: &mut [Complex16]) {
        // SAFETY: NEON present per cfg; slices hold LANES elements; shift < 32.
        unsafe { neon::mul_c16(x, y, out, self.shift) }
    }
}

/// `x * conj(y) >> shift` per component.
pub(crate) struct ConjMulC16 {
    pub(crate) shift: u32,
}

impl BinaryKernel for ConjMulC16 {
    type Input = Complex16;
    type Output = Complex16;
    const LANES: usize = C16_LANES;

    #[inline(always)]
    fn scalar(&self, x: Complex16, y: Complex16) -> Complex16 {
        conj_mul_c16(x, y, self.shift)
    }

    #[cfg(sse2)]
    #[inline(always)]
    fn block(&self, x: &[Complex16], y: &[Complex16], out: &mut [Complex16]) {
        // SAFETY: SSE2 present per cfg; slices hold LANES elements; shift < 32.
        unsafe { sse2::conj_mul_c16(x, y, out, self.shift) }
    }

    #[cfg(neon)]
    #[inline(always)]
    fn block(&self, x: &[Complex16], y: &[Complex16], out: &mut [Complex16]) {
        // SAFETY: NEON present per cfg; slices hold LANES elements; shift < 32.
        unsafe { neon::conj_mul_c16(x, y, out, self.shift) }
    }
}

/// Saturating 16 → 8 bit narrowing of both components.
pub(crate) struct PackC16;

impl UnaryKernel for PackC16 {
    type Input = Complex16;
    type Output = Complex8;
    // Two input registers fill one output register
    const LANES: usize = 8;

    #[inline(always)]
    fn scalar(&self, a: Complex16) -> Complex8 {
        Complex8::new(saturate_i8(a.re), saturate_i8(a.im))
    }

    #[cfg(sse2)]
    #[inline(always)]
    fn block(&self, a: &[Complex16], out: &mut [Complex8]) {
        // SAFETY: SSE2 present per cfg; slices hold LANES elements.
        unsafe { sse2::pack_c16(a, out) }
    }

    #[cfg(neon)]
    #[inline(always)]
    fn block(&self, a: &[Complex16], out: &mut [Complex8]) {
        // SAFETY: NEON present per cfg; slices hold LANES elements.
        unsafe { neon::pack_c16(a, out) }
    }
}

// ================================================================================================
// NON-ELEMENTWISE KERNELS
// ================================================================================================

/// `x * conj(y)` into separate, unshifted real and imaginary buffers.
#[inline(always)]
pub(crate) fn conj_mul_c16_split(
    backend: Backend,
    re: &mut [i32],
    im: &mut [i32],
    x: &[Complex16],
    y: &[Complex16],
) {
    debug_assert!(re.len() == x.len() && im.len() == x.len() && y.len() == x.len());

    let span = match backend {
        Backend::Simd => x.len() - x.len() % C16_LANES,
        Backend::Scalar => 0,
    };

    #[cfg(any(sse2, neon))]
    for (((r, i), a), b) in re[..span]
        .chunks_exact_mut(C16_LANES)
        .zip(im[..span].chunks_exact_mut(C16_LANES))
        .zip(x[..span].chunks_exact(C16_LANES))
        .zip(y[..span].chunks_exact(C16_LANES))
    {
        // SAFETY: instruction set present per cfg; every slice holds C16_LANES elements.
        #[cfg(sse2)]
        unsafe {
            sse2::conj_mul_c16_split(a, b, r, i)
        }
        #[cfg(neon)]
        unsafe {
            neon::conj_mul_c16_split(a, b, r, i)
        }
    }

    // Portable builds have no block form; everything past `start` is scalar
    let start = if cfg!(any(sse2, neon)) { span } else { 0 };
    for (((r, i), &a), &b) in re[start..]
        .iter_mut()
        .zip(im[start..].iter_mut())
        .zip(&x[start..])
        .zip(&y[start..])
    {
        (*r, *i) = conj_mul_c16_wide(a, b);
    }
}

/// Keeps every even-indexed sample: `out[i] = input[2 * i]`.
#[inline(always)]
pub(crate) fn downsample_c16(backend: Backend, out: &mut [Complex16], input: &[Complex16]) {
    debug_assert_eq!(out.len(), input.len() / 2);

    // One block reads two registers and writes one
    let span = match backend {
        Backend::Simd => out.len() - out.len() % C16_LANES,
        Backend::Scalar => 0,
    };

    #[cfg(sse2)]
    for (o, i) in out[..span]
        .chunks_exact_mut(C16_LANES)
        .zip(input[..2 * span].chunks_exact(2 * C16_LANES))
    {
        // SAFETY: SSE2 present per cfg; `i` holds 8 samples and `o` holds 4.
        unsafe { sse2::downsample_c16(i, o) }
    }

    #[cfg(not(sse2))]
    for (o, pair) in out[..span].iter_mut().zip(input[..2 * span].chunks_exact(2)) {
        *o = pair[0];
    }

    for (o, pair) in out[span..].iter_mut().zip(input[2 * span..].chunks_exact(2)) {
        *o = pair[0];
    }
}
