//! Slice drivers: whole blocks to the backend, remainder to the scalar op.
//!
//! Callers validate lengths before reaching this layer; the drivers only
//! `debug_assert` them.

use crate::simd::{
    traits::{BinaryKernel, UnaryKernel},
    Backend,
};

/// Number of leading elements handled in blocks for `len` elements.
#[inline(always)]
fn block_span(backend: Backend, len: usize, lanes: usize) -> usize {
    match backend {
        Backend::Simd => len - (len % lanes),
        Backend::Scalar => 0,
    }
}

#[inline(always)]
pub(crate) fn binary<K: BinaryKernel>(
    backend: Backend,
    kernel: &K,
    out: &mut [K::Output],
    a: &[K::Input],
    b: &[K::Input],
) {
    debug_assert_eq!(a.len(), b.len(), "inputs must be the same length");
    debug_assert_eq!(a.len(), out.len(), "output must match the inputs");

    let span = block_span(backend, a.len(), K::LANES);
    let (out_blocks, out_rest) = out.split_at_mut(span);
    let (a_blocks, a_rest) = a.split_at(span);
    let (b_blocks, b_rest) = b.split_at(span);

    for ((o, x), y) in out_blocks
        .chunks_exact_mut(K::LANES)
        .zip(a_blocks.chunks_exact(K::LANES))
        .zip(b_blocks.chunks_exact(K::LANES))
    {
        kernel.block(x, y, o);
    }

    for ((o, &x), &y) in out_rest.iter_mut().zip(a_rest).zip(b_rest) {
        *o = kernel.scalar(x, y);
    }
}

#[inline(always)]
pub(crate) fn unary<K: UnaryKernel>(
    backend: Backend,
    kernel: &K,
    out: &mut [K::Output],
    a: &[K::Input],
) {
    debug_assert_eq!(a.len(), out.len(), "output must match the input");

    let span = block_span(backend, a.len(), K::LANES);
    let (out_blocks, out_rest) = out.split_at_mut(span);
    let (a_blocks, a_rest) = a.split_at(span);

    for (o, x) in out_blocks
        .chunks_exact_mut(K::LANES)
        .zip(a_blocks.chunks_exact(K::LANES))
    {
        kernel.block(x, o);
    }

    for (o, &x) in out_rest.iter_mut().zip(a_rest) {
        *o = kernel.scalar(x);
    }
}

/// In-place form of [`binary`]: `a[i] = op(a[i], b[i])`.
#[inline(always)]
pub(crate) fn binary_assign<K, T>(backend: Backend, kernel: &K, a: &mut [T], b: &[T])
where
    K: BinaryKernel<Input = T, Output = T>,
    T: Copy + Default,
{
    debug_assert_eq!(a.len(), b.len(), "inputs must be the same length");

    let span = block_span(backend, a.len(), K::LANES);
    let (a_blocks, a_rest) = a.split_at_mut(span);
    let (b_blocks, b_rest) = b.split_at(span);

    // One register-width staging buffer; blocks are at most 16 lanes wide.
    let mut staged = [T::default(); 16];
    for (x, y) in a_blocks
        .chunks_exact_mut(K::LANES)
        .zip(b_blocks.chunks_exact(K::LANES))
    {
        let staged = &mut staged[..K::LANES];
        kernel.block(x, y, staged);
        x.copy_from_slice(staged);
    }

    for (x, &y) in a_rest.iter_mut().zip(b_rest) {
        *x = kernel.scalar(*x, y);
    }
}
