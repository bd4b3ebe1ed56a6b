//! SSE2 block implementations on 128-bit registers.
//!
//! SSE2 is part of the x86_64 baseline, so this backend is what every
//! native x86 build gets. Each function processes exactly one register of
//! elements (see the `*_LANES` constants in `simd::kernels`) using unaligned
//! loads and stores; callers guarantee the slice lengths.
//!
//! The complex multiplies avoid the 16-bit negation overflow of
//! `-(-32768)`: they multiply by the bitwise complement (`!v == -v - 1`) and
//! add the missing term back in 32-bit arithmetic, which reproduces the
//! scalar wrapping definition exactly.

mod arith;
mod bits;

pub(crate) use arith::*;
pub(crate) use bits::*;
