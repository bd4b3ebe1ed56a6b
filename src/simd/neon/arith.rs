use std::arch::aarch64::*;

use crate::types::{Complex16, Complex8};

#[target_feature(enable = "neon")]
pub(crate) unsafe fn add_i16(a: &[i16], b: &[i16], out: &mut [i16]) {
    vst1q_s16(out.as_mut_ptr(), vaddq_s16(vld1q_s16(a.as_ptr()), vld1q_s16(b.as_ptr())));
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn add_i32(a: &[i32], b: &[i32], out: &mut [i32]) {
    vst1q_s32(out.as_mut_ptr(), vaddq_s32(vld1q_s32(a.as_ptr()), vld1q_s32(b.as_ptr())));
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn sub_i16(a: &[i16], b: &[i16], out: &mut [i16]) {
    vst1q_s16(out.as_mut_ptr(), vsubq_s16(vld1q_s16(a.as_ptr()), vld1q_s16(b.as_ptr())));
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn sub_i32(a: &[i32], b: &[i32], out: &mut [i32]) {
    vst1q_s32(out.as_mut_ptr(), vsubq_s32(vld1q_s32(a.as_ptr()), vld1q_s32(b.as_ptr())));
}

// vshlq with a negative count is an arithmetic right shift for signed lanes

#[target_feature(enable = "neon")]
pub(crate) unsafe fn shl_i16(a: &[i16], out: &mut [i16], shift: u32) {
    let count = vdupq_n_s16(shift as i16);
    vst1q_s16(out.as_mut_ptr(), vshlq_s16(vld1q_s16(a.as_ptr()), count));
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn shr_i16(a: &[i16], out: &mut [i16], shift: u32) {
    let count = vdupq_n_s16(-(shift as i16));
    vst1q_s16(out.as_mut_ptr(), vshlq_s16(vld1q_s16(a.as_ptr()), count));
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn shl_i32(a: &[i32], out: &mut [i32], shift: u32) {
    let count = vdupq_n_s32(shift as i32);
    vst1q_s32(out.as_mut_ptr(), vshlq_s32(vld1q_s32(a.as_ptr()), count));
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn shr_i32(a: &[i32], out: &mut [i32], shift: u32) {
    let count = vdupq_n_s32(-(shift as i32));
    vst1q_s32(out.as_mut_ptr(), vshlq_s32(vld1q_s32(a.as_ptr()), count));
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn neg_i8(a: &[i8], out: &mut [i8]) {
    vst1q_s8(out.as_mut_ptr(), vnegq_s8(vld1q_s8(a.as_ptr())));
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn sign_i8(a: &[i8], b: &[i8], out: &mut [i8]) {
    let va = vld1q_s8(a.as_ptr());
    let vb = vld1q_s8(b.as_ptr());

    let picked = vbslq_s8(vcltzq_s8(vb), vnegq_s8(va), va);
    let zero = vreinterpretq_s8_u8(vceqzq_s8(vb));
    vst1q_s8(out.as_mut_ptr(), vbicq_s8(picked, zero));
}

/// Loads four `Complex16` as separate (re, im) halves.
#[inline(always)]
unsafe fn load_c16(src: &[Complex16]) -> int16x4x2_t {
    vld2_s16(src.as_ptr() as *const i16)
}

#[inline(always)]
unsafe fn store_c16(dst: &mut [Complex16], re: int32x4_t, im: int32x4_t, shift: u32) {
    let count = vdupq_n_s32(-(shift as i32));
    let narrowed = int16x4x2_t(
        vmovn_s32(vshlq_s32(re, count)),
        vmovn_s32(vshlq_s32(im, count)),
    );
    vst2_s16(dst.as_mut_ptr() as *mut i16, narrowed);
}

/// Wide products `x * conj(y)`.
#[inline(always)]
unsafe fn conj_products(x: int16x4x2_t, y: int16x4x2_t) -> (int32x4_t, int32x4_t) {
    let re = vmlal_s16(vmull_s16(x.0, y.0), x.1, y.1);
    let im = vmlsl_s16(vmull_s16(x.1, y.0), x.0, y.1);
    (re, im)
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn mul_c16(x: &[Complex16], y: &[Complex16], out: &mut [Complex16], shift: u32) {
    let vx = load_c16(x);
    let vy = load_c16(y);

    let re = vmlsl_s16(vmull_s16(vx.0, vy.0), vx.1, vy.1);
    let im = vmlal_s16(vmull_s16(vx.0, vy.1), vx.1, vy.0);
    store_c16(out, re, im, shift);
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn conj_mul_c16(x: &[Complex16], y: &[Complex16], out: &mut [Complex16], shift: u32) {
    let (re, im) = conj_products(load_c16(x), load_c16(y));
    store_c16(out, re, im, shift);
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn conj_mul_c16_split(x: &[Complex16], y: &[Complex16], re: &mut [i32], im: &mut [i32]) {
    let (vre, vim) = conj_products(load_c16(x), load_c16(y));
    vst1q_s32(re.as_mut_ptr(), vre);
    vst1q_s32(im.as_mut_ptr(), vim);
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn pack_c16(a: &[Complex16], out: &mut [Complex8]) {
    let src = a.as_ptr() as *const i16;
    let lo = vqmovn_s16(vld1q_s16(src));
    let hi = vqmovn_s16(vld1q_s16(src.add(8)));
    vst1q_s8(out.as_mut_ptr() as *mut i8, vcombine_s8(lo, hi));
}
