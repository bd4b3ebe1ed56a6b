//! Elementwise fixed-point vector arithmetic.
//!
//! All kernels write into a caller-provided output slice that comes first in
//! the argument list, followed by the inputs. Length relations are checked
//! before anything is written and reported as
//! [`KernelError::LengthMismatch`](crate::error::KernelError::LengthMismatch).
//!
//! Arithmetic wraps at the native lane width; only [`pack`] saturates.
//!
//! The free functions run on [`Backend::active`]. The same kernels are
//! methods on [`Backend`], so a caller can force the scalar reference path:
//!
//! ```
//! use phy_kernels::{vector, Backend, Complex16};
//!
//! let x = [Complex16::new(3, 4); 5];
//! let y = [Complex16::new(5, -2); 5];
//! let mut fast = [Complex16::default(); 5];
//! let mut reference = [Complex16::default(); 5];
//!
//! vector::multiply(&mut fast, &x, &y, 0).unwrap();
//! Backend::Scalar.multiply(&mut reference, &x, &y, 0).unwrap();
//! assert_eq!(fast, reference);
//! assert_eq!(fast[0], Complex16::new(23, 14));
//! ```

mod complex;
mod sample;

pub use complex::{cast, interleave_low, permute_odd};
pub use sample::{LaneInt, Sample};

use crate::{
    error::{ensure_len, KernelError, Result},
    simd::Backend,
    types::{Complex16, Complex8},
};

#[inline(always)]
fn ensure_shift<T: Sample>(shift: u32) -> Result<()> {
    let bits = <T::Lane as LaneInt>::BITS;
    if shift < bits {
        Ok(())
    } else {
        Err(KernelError::InvalidShift { shift, bits })
    }
}

impl Backend {
    /// `c[i] = a[i] + b[i]`, wrapping.
    pub fn add<T: Sample>(self, c: &mut [T], a: &[T], b: &[T]) -> Result<()> {
        ensure_len("add", a.len(), b.len())?;
        ensure_len("add", a.len(), c.len())?;
        <T::Lane as LaneInt>::add_lanes(self, T::lanes_mut(c), T::lanes(a), T::lanes(b));
        Ok(())
    }

    /// `c[i] = a[i] - b[i]`, wrapping.
    pub fn sub<T: Sample>(self, c: &mut [T], a: &[T], b: &[T]) -> Result<()> {
        ensure_len("sub", a.len(), b.len())?;
        ensure_len("sub", a.len(), c.len())?;
        <T::Lane as LaneInt>::sub_lanes(self, T::lanes_mut(c), T::lanes(a), T::lanes(b));
        Ok(())
    }

    /// `a[i] += b[i]`, wrapping.
    pub fn add_assign<T: Sample>(self, a: &mut [T], b: &[T]) -> Result<()> {
        ensure_len("add_assign", a.len(), b.len())?;
        <T::Lane as LaneInt>::add_assign_lanes(self, T::lanes_mut(a), T::lanes(b));
        Ok(())
    }

    /// `a[i] -= b[i]`, wrapping.
    pub fn sub_assign<T: Sample>(self, a: &mut [T], b: &[T]) -> Result<()> {
        ensure_len("sub_assign", a.len(), b.len())?;
        <T::Lane as LaneInt>::sub_assign_lanes(self, T::lanes_mut(a), T::lanes(b));
        Ok(())
    }

    /// Per-lane left shift; complex samples shift both components.
    pub fn shift_left<T: Sample>(self, out: &mut [T], x: &[T], shift: u32) -> Result<()> {
        ensure_shift::<T>(shift)?;
        ensure_len("shift_left", x.len(), out.len())?;
        <T::Lane as LaneInt>::shl_lanes(self, T::lanes_mut(out), T::lanes(x), shift);
        Ok(())
    }

    /// Per-lane arithmetic right shift.
    pub fn shift_right<T: Sample>(self, out: &mut [T], x: &[T], shift: u32) -> Result<()> {
        ensure_shift::<T>(shift)?;
        ensure_len("shift_right", x.len(), out.len())?;
        <T::Lane as LaneInt>::shr_lanes(self, T::lanes_mut(out), T::lanes(x), shift);
        Ok(())
    }
}

/// Elementwise wrapping addition: `c[i] = a[i] + b[i]`.
///
/// # Errors
///
/// [`KernelError::LengthMismatch`] unless all three slices have the same length.
pub fn add<T: Sample>(c: &mut [T], a: &[T], b: &[T]) -> Result<()> {
    Backend::active().add(c, a, b)
}

/// Elementwise wrapping subtraction: `c[i] = a[i] - b[i]`.
pub fn sub<T: Sample>(c: &mut [T], a: &[T], b: &[T]) -> Result<()> {
    Backend::active().sub(c, a, b)
}

/// In-place form of [`add`].
pub fn add_assign<T: Sample>(a: &mut [T], b: &[T]) -> Result<()> {
    Backend::active().add_assign(a, b)
}

/// In-place form of [`sub`].
pub fn sub_assign<T: Sample>(a: &mut [T], b: &[T]) -> Result<()> {
    Backend::active().sub_assign(a, b)
}

/// Shifts every lane left by `shift` bits.
///
/// # Errors
///
/// [`KernelError::InvalidShift`] if `shift` is not below the lane width (16
/// for `i16`/`Complex16`, 32 for `i32`/`Complex32`).
pub fn shift_left<T: Sample>(out: &mut [T], x: &[T], shift: u32) -> Result<()> {
    Backend::active().shift_left(out, x, shift)
}

/// Shifts every lane right by `shift` bits, sign-extending.
pub fn shift_right<T: Sample>(out: &mut [T], x: &[T], shift: u32) -> Result<()> {
    Backend::active().shift_right(out, x, shift)
}

/// Sequential wrapping sum at the element width. Empty input sums to zero.
pub fn sum<T: Sample>(x: &[T]) -> T {
    x.iter().fold(T::default(), |acc, &v| acc.wrapping_add(v))
}

/// Sum of exactly four elements.
#[inline]
pub fn sum4<T: Sample>(x: &[T; 4]) -> T {
    x[0].wrapping_add(x[1]).wrapping_add(x[2]).wrapping_add(x[3])
}

/// Four-element reduction broadcast into every lane of `z`.
#[inline]
pub fn hadd<T: Sample>(z: &mut [T; 4], x: &[T; 4]) {
    *z = [sum4(x); 4];
}

/// `x * y >> shift` per component; see [`Backend::multiply`].
pub fn multiply(out: &mut [Complex16], x: &[Complex16], y: &[Complex16], shift: u32) -> Result<()> {
    Backend::active().multiply(out, x, y, shift)
}

/// `x * conj(y) >> shift` per component; see [`Backend::conj_multiply`].
pub fn conj_multiply(out: &mut [Complex16], x: &[Complex16], y: &[Complex16], shift: u32) -> Result<()> {
    Backend::active().conj_multiply(out, x, y, shift)
}

/// Unshifted `x * conj(y)` into separate real and imaginary buffers.
pub fn conj_multiply_i32(re: &mut [i32], im: &mut [i32], x: &[Complex16], y: &[Complex16]) -> Result<()> {
    Backend::active().conj_multiply_i32(re, im, x, y)
}

/// Saturating narrowing of both components to `[-128, 127]`.
pub fn pack(out: &mut [Complex8], input: &[Complex16]) -> Result<()> {
    Backend::active().pack(out, input)
}

/// Wrapping negation of both components.
pub fn negate(out: &mut [Complex8], input: &[Complex8]) -> Result<()> {
    Backend::active().negate(out, input)
}

/// Applies the sign of `b` to `a`: `-a`, `0` or `a`.
pub fn sign(out: &mut [i8], a: &[i8], b: &[i8]) -> Result<()> {
    Backend::active().sign(out, a, b)
}

/// Keeps the even-indexed samples: `out[i] = input[2 * i]`.
pub fn downsample(out: &mut [Complex16], input: &[Complex16]) -> Result<()> {
    Backend::active().downsample(out, input)
}
