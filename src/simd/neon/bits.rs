use std::arch::aarch64::*;

macro_rules! neon_bitwise {
    ($name:ident, |$a:ident, $b:ident| $body:expr) => {
        #[target_feature(enable = "neon")]
        pub(crate) unsafe fn $name(a: &[u8], b: &[u8], out: &mut [u8]) {
            let $a = vld1q_u8(a.as_ptr());
            let $b = vld1q_u8(b.as_ptr());
            vst1q_u8(out.as_mut_ptr(), $body);
        }
    };
}

neon_bitwise!(and_u8, |a, b| vandq_u8(a, b));
neon_bitwise!(or_u8, |a, b| vorrq_u8(a, b));
neon_bitwise!(xor_u8, |a, b| veorq_u8(a, b));
// vbicq_u8(x, y) == x & !y
neon_bitwise!(andnot_u8, |a, b| vbicq_u8(b, a));
