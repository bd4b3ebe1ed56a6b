#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::types::{Complex16, Complex8};

// `_MM_SHUFFLE(2, 3, 0, 1)`: swap the two 16-bit halves of every 32-bit lane
const SWAP_HALVES: i32 = 0b10_11_00_01;

// `_MM_SHUFFLE(2, 0, 2, 0)`: 32-bit lanes [0, 2, 0, 2]
const EVEN_LANES: i32 = 0b10_00_10_00;

#[inline(always)]
unsafe fn load<T>(src: &[T]) -> __m128i {
    _mm_loadu_si128(src.as_ptr() as *const __m128i)
}

#[inline(always)]
unsafe fn store<T>(dst: &mut [T], v: __m128i) {
    _mm_storeu_si128(dst.as_mut_ptr() as *mut __m128i, v)
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn add_i16(a: &[i16], b: &[i16], out: &mut [i16]) {
    store(out, _mm_add_epi16(load(a), load(b)));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn add_i32(a: &[i32], b: &[i32], out: &mut [i32]) {
    store(out, _mm_add_epi32(load(a), load(b)));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sub_i16(a: &[i16], b: &[i16], out: &mut [i16]) {
    store(out, _mm_sub_epi16(load(a), load(b)));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sub_i32(a: &[i32], b: &[i32], out: &mut [i32]) {
    store(out, _mm_sub_epi32(load(a), load(b)));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn shl_i16(a: &[i16], out: &mut [i16], shift: u32) {
    let count = _mm_cvtsi32_si128(shift as i32);
    store(out, _mm_sll_epi16(load(a), count));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn shr_i16(a: &[i16], out: &mut [i16], shift: u32) {
    let count = _mm_cvtsi32_si128(shift as i32);
    store(out, _mm_sra_epi16(load(a), count));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn shl_i32(a: &[i32], out: &mut [i32], shift: u32) {
    let count = _mm_cvtsi32_si128(shift as i32);
    store(out, _mm_sll_epi32(load(a), count));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn shr_i32(a: &[i32], out: &mut [i32], shift: u32) {
    let count = _mm_cvtsi32_si128(shift as i32);
    store(out, _mm_sra_epi32(load(a), count));
}

/// Sign-extended real parts (low halves) of four packed `Complex16`.
#[inline(always)]
unsafe fn real_parts(v: __m128i) -> __m128i {
    _mm_srai_epi32::<16>(_mm_slli_epi32::<16>(v))
}

/// Sign-extended imaginary parts (high halves) of four packed `Complex16`.
#[inline(always)]
unsafe fn imag_parts(v: __m128i) -> __m128i {
    _mm_srai_epi32::<16>(v)
}

/// Packs the low 16 bits of `re` and `im` back into four `Complex16`.
#[inline(always)]
unsafe fn interleave(re: __m128i, im: __m128i) -> __m128i {
    let low = _mm_and_si128(re, _mm_set1_epi32(0x0000_FFFF));
    _mm_or_si128(low, _mm_slli_epi32::<16>(im))
}

/// Wide products `x * conj(y)`: (re, im) as four i32 each.
#[inline(always)]
unsafe fn conj_products(mx: __m128i, my: __m128i) -> (__m128i, __m128i) {
    // re = x.re*y.re + x.im*y.im
    let re = _mm_madd_epi16(mx, my);

    // im = x.im*y.re + x.re*(!y.im) + x.re
    let swapped = _mm_shufflehi_epi16::<SWAP_HALVES>(_mm_shufflelo_epi16::<SWAP_HALVES>(my));
    let inverted = _mm_xor_si128(swapped, _mm_set1_epi32(0x0000_FFFF));
    let im = _mm_add_epi32(_mm_madd_epi16(mx, inverted), real_parts(mx));

    (re, im)
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mul_c16(x: &[Complex16], y: &[Complex16], out: &mut [Complex16], shift: u32) {
    let mx = load(x);
    let my = load(y);

    // re = x.re*y.re + x.im*(!y.im) + x.im
    let inverted = _mm_xor_si128(my, _mm_set1_epi32(0xFFFF_0000_u32 as i32));
    let re = _mm_add_epi32(_mm_madd_epi16(mx, inverted), imag_parts(mx));

    // im = x.re*y.im + x.im*y.re
    let swapped = _mm_shufflehi_epi16::<SWAP_HALVES>(_mm_shufflelo_epi16::<SWAP_HALVES>(my));
    let im = _mm_madd_epi16(mx, swapped);

    let count = _mm_cvtsi32_si128(shift as i32);
    store(out, interleave(_mm_sra_epi32(re, count), _mm_sra_epi32(im, count)));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn conj_mul_c16(x: &[Complex16], y: &[Complex16], out: &mut [Complex16], shift: u32) {
    let (re, im) = conj_products(load(x), load(y));

    let count = _mm_cvtsi32_si128(shift as i32);
    store(out, interleave(_mm_sra_epi32(re, count), _mm_sra_epi32(im, count)));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn conj_mul_c16_split(x: &[Complex16], y: &[Complex16], re: &mut [i32], im: &mut [i32]) {
    let (vre, vim) = conj_products(load(x), load(y));
    store(re, vre);
    store(im, vim);
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn pack_c16(a: &[Complex16], out: &mut [Complex8]) {
    let lo = load(&a[..4]);
    let hi = load(&a[4..]);
    store(out, _mm_packs_epi16(lo, hi));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn neg_i8(a: &[i8], out: &mut [i8]) {
    store(out, _mm_sub_epi8(_mm_setzero_si128(), load(a)));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sign_i8(a: &[i8], b: &[i8], out: &mut [i8]) {
    let zero = _mm_setzero_si128();
    let va = load(a);
    let vb = load(b);

    let negative = _mm_cmplt_epi8(vb, zero);
    let is_zero = _mm_cmpeq_epi8(vb, zero);
    let negated = _mm_sub_epi8(zero, va);

    let picked = _mm_or_si128(_mm_and_si128(negative, negated), _mm_andnot_si128(negative, va));
    store(out, _mm_andnot_si128(is_zero, picked));
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn downsample_c16(input: &[Complex16], out: &mut [Complex16]) {
    let even_lo = _mm_shuffle_epi32::<EVEN_LANES>(load(&input[..4]));
    let even_hi = _mm_shuffle_epi32::<EVEN_LANES>(load(&input[4..]));
    store(out, _mm_unpacklo_epi64(even_lo, even_hi));
}
