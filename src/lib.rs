//! Fixed-point signal processing kernels for an OFDM physical layer.
//!
//! Every vector kernel has a portable scalar implementation and a SIMD one
//! (SSE2 on x86, NEON on aarch64), selected when the crate is built. The
//! two produce identical results; [`Backend`] exposes both so they can be
//! compared.

pub mod bits;
pub mod error;
pub mod fft;
pub mod simd;
pub mod timing;
pub mod trig;
pub mod types;
pub mod vector;
pub mod viterbi;

pub use bits::BitArray;
pub use error::{KernelError, Result};
pub use fft::TransformSize;
pub use simd::Backend;
pub use types::{Complex16, Complex32, Complex8};
pub use viterbi::{CodeRate, ViterbiDecoder};
