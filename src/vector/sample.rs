//! Element types of the elementwise kernels.
//!
//! Every sample type is stored as lanes of one native integer width:
//! `i16` and `Complex16` as `i16` lanes, `i32` and `Complex32` as `i32`
//! lanes. Add, subtract and shift are lane-local, so the complex types reuse
//! the integer kernels over their interleaved components.

use num::complex::Complex;

use crate::{
    simd::{
        kernels::{AddI16, AddI32, ShlI16, ShlI32, ShrI16, ShrI32, SubI16, SubI32},
        slice, Backend,
    },
    types::{components, components_mut},
};

mod sealed {
    pub trait Sealed {}

    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for num::complex::Complex<i16> {}
    impl Sealed for num::complex::Complex<i32> {}
}

/// Native integer lane (`i16` or `i32`) with its lane-vectorized kernels.
pub trait LaneInt: Copy + Default + sealed::Sealed {
    /// Lane width in bits; shift amounts must stay below it.
    const BITS: u32;

    #[doc(hidden)]
    fn add_lanes(backend: Backend, out: &mut [Self], a: &[Self], b: &[Self]);
    #[doc(hidden)]
    fn sub_lanes(backend: Backend, out: &mut [Self], a: &[Self], b: &[Self]);
    #[doc(hidden)]
    fn add_assign_lanes(backend: Backend, a: &mut [Self], b: &[Self]);
    #[doc(hidden)]
    fn sub_assign_lanes(backend: Backend, a: &mut [Self], b: &[Self]);
    #[doc(hidden)]
    fn shl_lanes(backend: Backend, out: &mut [Self], a: &[Self], shift: u32);
    #[doc(hidden)]
    fn shr_lanes(backend: Backend, out: &mut [Self], a: &[Self], shift: u32);
}

macro_rules! impl_lane_int {
    ($lane:ty, $add:ident, $sub:ident, $shl:ident, $shr:ident) => {
        impl LaneInt for $lane {
            const BITS: u32 = <$lane>::BITS;

            #[inline(always)]
            fn add_lanes(backend: Backend, out: &mut [Self], a: &[Self], b: &[Self]) {
                slice::binary(backend, &$add, out, a, b);
            }

            #[inline(always)]
            fn sub_lanes(backend: Backend, out: &mut [Self], a: &[Self], b: &[Self]) {
                slice::binary(backend, &$sub, out, a, b);
            }

            #[inline(always)]
            fn add_assign_lanes(backend: Backend, a: &mut [Self], b: &[Self]) {
                slice::binary_assign(backend, &$add, a, b);
            }

            #[inline(always)]
            fn sub_assign_lanes(backend: Backend, a: &mut [Self], b: &[Self]) {
                slice::binary_assign(backend, &$sub, a, b);
            }

            #[inline(always)]
            fn shl_lanes(backend: Backend, out: &mut [Self], a: &[Self], shift: u32) {
                slice::unary(backend, &$shl { shift }, out, a);
            }

            #[inline(always)]
            fn shr_lanes(backend: Backend, out: &mut [Self], a: &[Self], shift: u32) {
                slice::unary(backend, &$shr { shift }, out, a);
            }
        }
    };
}

impl_lane_int!(i16, AddI16, SubI16, ShlI16, ShrI16);
impl_lane_int!(i32, AddI32, SubI32, ShlI32, ShrI32);

/// Sample type accepted by `add`, `sub`, `sum`, `hadd` and the shifts.
pub trait Sample: Copy + Default + PartialEq + std::fmt::Debug + sealed::Sealed {
    /// Native lane the sample is made of.
    type Lane: LaneInt;

    /// Views a sample buffer as its lanes.
    fn lanes(samples: &[Self]) -> &[Self::Lane];

    /// Mutable counterpart of [`Sample::lanes`].
    fn lanes_mut(samples: &mut [Self]) -> &mut [Self::Lane];

    /// Addition wrapping at the lane width.
    fn wrapping_add(self, other: Self) -> Self;
}

macro_rules! impl_scalar_sample {
    ($lane:ty) => {
        impl Sample for $lane {
            type Lane = $lane;

            #[inline(always)]
            fn lanes(samples: &[Self]) -> &[Self] {
                samples
            }

            #[inline(always)]
            fn lanes_mut(samples: &mut [Self]) -> &mut [Self] {
                samples
            }

            #[inline(always)]
            fn wrapping_add(self, other: Self) -> Self {
                <$lane>::wrapping_add(self, other)
            }
        }
    };
}

macro_rules! impl_complex_sample {
    ($lane:ty) => {
        impl Sample for Complex<$lane> {
            type Lane = $lane;

            #[inline(always)]
            fn lanes(samples: &[Self]) -> &[$lane] {
                components(samples)
            }

            #[inline(always)]
            fn lanes_mut(samples: &mut [Self]) -> &mut [$lane] {
                components_mut(samples)
            }

            #[inline(always)]
            fn wrapping_add(self, other: Self) -> Self {
                Complex::new(self.re.wrapping_add(other.re), self.im.wrapping_add(other.im))
            }
        }
    };
}

impl_scalar_sample!(i16);
impl_scalar_sample!(i32);
impl_complex_sample!(i16);
impl_complex_sample!(i32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Complex16, Complex32};

    #[test]
    fn test_complex_lanes_are_interleaved() {
        let samples = [Complex16::new(1, 2), Complex16::new(3, 4)];
        assert_eq!(<Complex16 as Sample>::lanes(&samples), &[1i16, 2, 3, 4]);
    }

    #[test]
    fn test_complex_wrapping_add() {
        let a = Complex32::new(i32::MAX, -1);
        let b = Complex32::new(1, 1);
        assert_eq!(a.wrapping_add(b), Complex32::new(i32::MIN, 0));
    }

    #[test]
    fn test_lane_bits() {
        assert_eq!(<i16 as LaneInt>::BITS, 16);
        assert_eq!(<i32 as LaneInt>::BITS, 32);
    }
}
