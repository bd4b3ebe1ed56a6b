//! Fixed-point sample types.
//!
//! All complex types are `num::complex::Complex<T>`, which is `#[repr(C)]`
//! with `re` stored before `im`. A `[Complex16]` buffer is therefore laid out
//! exactly like an `[i16]` buffer of twice the length, which is what the lane
//! kernels rely on.

use num::complex::Complex;

/// Complex sample with 8-bit components.
pub type Complex8 = Complex<i8>;

/// Complex sample with 16-bit fixed-point components.
pub type Complex16 = Complex<i16>;

/// Complex sample with 32-bit components, used for widened products and sums.
pub type Complex32 = Complex<i32>;

/// Reinterprets a complex buffer as its interleaved `re, im` components.
#[inline(always)]
pub(crate) fn components<T>(samples: &[Complex<T>]) -> &[T] {
    // SAFETY: Complex<T> is repr(C) { re: T, im: T } with no padding, so the
    // buffer holds exactly 2 * len initialized values of T.
    unsafe { std::slice::from_raw_parts(samples.as_ptr() as *const T, samples.len() * 2) }
}

/// Mutable counterpart of [`components`].
#[inline(always)]
pub(crate) fn components_mut<T>(samples: &mut [Complex<T>]) -> &mut [T] {
    // SAFETY: see `components`; the borrow is unique for its lifetime.
    unsafe { std::slice::from_raw_parts_mut(samples.as_mut_ptr() as *mut T, samples.len() * 2) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_layout() {
        let samples = [Complex16::new(1, -2), Complex16::new(3, -4)];
        assert_eq!(components(&samples), &[1, -2, 3, -4]);
    }

    #[test]
    fn test_components_mut_writes_through() {
        let mut samples = [Complex32::new(0, 0); 2];
        components_mut(&mut samples)[3] = 7;
        assert_eq!(samples[1], Complex32::new(0, 7));
    }
}
