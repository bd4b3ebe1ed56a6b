#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

macro_rules! sse2_bitwise {
    ($name:ident, $intrinsic:ident) => {
        #[target_feature(enable = "sse2")]
        pub(crate) unsafe fn $name(a: &[u8], b: &[u8], out: &mut [u8]) {
            let va = _mm_loadu_si128(a.as_ptr() as *const __m128i);
            let vb = _mm_loadu_si128(b.as_ptr() as *const __m128i);
            _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, $intrinsic(va, vb));
        }
    };
}

sse2_bitwise!(and_u8, _mm_and_si128);
sse2_bitwise!(or_u8, _mm_or_si128);
sse2_bitwise!(xor_u8, _mm_xor_si128);
// _mm_andnot_si128(a, b) == !a & b
sse2_bitwise!(andnot_u8, _mm_andnot_si128);
