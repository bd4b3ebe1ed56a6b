//! ARM NEON block implementations for AArch64.
//!
//! Same contract as the SSE2 backend: one 128-bit register of elements per
//! call, unaligned loads, slice lengths guaranteed by the caller. Complex
//! data is deinterleaved with `vld2`, which makes the widening multiplies
//! straightforward (`vmull`/`vmlal`/`vmlsl` on the real and imaginary halves).

mod arith;
mod bits;

pub(crate) use arith::*;
pub(crate) use bits::*;
