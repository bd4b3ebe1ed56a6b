//! Q15 twiddle tables, one per catalog length, built on first use.
//!
//! Floating point is only used to build the tables; the transforms run in
//! integer arithmetic.

use std::{f64::consts::TAU, sync::OnceLock};

use crate::{fft::size::TransformSize, types::Complex32};

/// 1.0 in Q15. Twiddles are stored in 32 bits so that `W^0 = 32768` is exact.
pub(crate) const Q15_ONE: i64 = 1 << 15;

const TABLE_COUNT: usize = TransformSize::ALL.len();

static TABLES: [OnceLock<Box<[Complex32]>>; TABLE_COUNT] = [const { OnceLock::new() }; TABLE_COUNT];

/// `W_N^i = e^{-2πi·i/N}` for `i` in `0..N`, rounded to Q15.
pub(crate) fn table(size: TransformSize) -> &'static [Complex32] {
    TABLES[size.index()].get_or_init(|| build(size.len()))
}

fn build(len: usize) -> Box<[Complex32]> {
    let scale = Q15_ONE as f64;
    (0..len)
        .map(|i| {
            let angle = -TAU * i as f64 / len as f64;
            Complex32::new(
                (scale * angle.cos()).round() as i32,
                (scale * angle.sin()).round() as i32,
            )
        })
        .collect()
}
