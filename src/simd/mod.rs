//! Lane-parallel execution layer shared by every vector kernel.
//!
//! A kernel is described once by its scalar operation ([`traits`]) and,
//! optionally, a register-width block implementation for the instruction set
//! selected at build time. The drivers in [`slice`] feed whole blocks to the
//! block implementation and always finish the `len % LANES` remainder with
//! the scalar operation, so the two paths cannot drift apart.
//!
//! # Build-time selection
//!
//! `build.rs` emits exactly one of `cfg(sse2)`, `cfg(neon)` or
//! `cfg(fallback)`. On `fallback` builds the block implementation is the
//! portable per-lane loop, which the compiler is free to auto-vectorize.

#[cfg(sse2)]
pub(crate) mod sse2;

#[cfg(neon)]
pub(crate) mod neon;

pub(crate) mod kernels;
pub(crate) mod slice;
pub mod traits;

/// Execution path of the lane-vectorized kernels.
///
/// Both variants produce bit-identical results. `Scalar` exists as the
/// reference path and for callers that want to rule the SIMD code out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Element-by-element scalar loop.
    Scalar,
    /// Register-width blocks on the compiled instruction set, scalar remainder.
    Simd,
}

impl Backend {
    /// Backend used by the crate's free functions.
    #[inline(always)]
    pub const fn active() -> Self {
        Backend::Simd
    }

    /// Name of the instruction set the `Simd` backend was compiled for.
    pub const fn instruction_set() -> &'static str {
        if cfg!(sse2) {
            "sse2"
        } else if cfg!(neon) {
            "neon"
        } else {
            "portable"
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_active() {
        assert_eq!(Backend::default(), Backend::active());
    }

    #[test]
    fn test_instruction_set_is_known() {
        assert!(["sse2", "neon", "portable"].contains(&Backend::instruction_set()));
    }
}
