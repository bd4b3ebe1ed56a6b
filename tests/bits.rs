//! Bit-field logic: fast paths against the generic kernels, and a
//! statistical sanity check of the random bit source.

use phy_kernels::bits::{self, BitArray};
use phy_kernels::{Backend, KernelError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::{Binomial, DiscreteCDF};

fn random_bytes(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random()).collect()
}

#[test]
fn test_or_fast_paths_match_generic() {
    let mut rng = StdRng::seed_from_u64(48);
    for width in [48, 96, 192, 288] {
        let len = bits::byte_len(width);
        let a = random_bytes(&mut rng, len);
        let b = random_bytes(&mut rng, len);

        let mut fast = vec![0u8; len];
        let mut generic = vec![0u8; len];
        bits::or(&mut fast, &a, &b, width).unwrap();
        Backend::Scalar.or(&mut generic, &a, &b, width).unwrap();
        assert_eq!(fast, generic, "{} bits", width);
    }
}

#[test]
fn test_fixed_width_helpers() {
    let a = [0b1010_1010u8; 6];
    let b = [0b0101_0000u8; 6];
    let mut out = [0u8; 6];
    bits::or_48(&mut out, &a, &b);
    assert_eq!(out, [0b1111_1010; 6]);

    let mut out = [0u8; 36];
    bits::or_288(&mut out, &[1; 36], &[2; 36]);
    assert_eq!(out, [3; 36]);
}

#[test]
fn test_backends_agree_on_every_length() {
    let mut rng = StdRng::seed_from_u64(7);
    for width in 0..=300 {
        let len = bits::byte_len(width);
        let a = random_bytes(&mut rng, len);
        let b = random_bytes(&mut rng, len);

        for op in [Backend::and, Backend::or, Backend::xor, Backend::andnot] {
            let mut scalar = vec![0u8; len];
            let mut simd = vec![0u8; len];
            op(Backend::Scalar, &mut scalar, &a, &b, width).unwrap();
            op(Backend::Simd, &mut simd, &a, &b, width).unwrap();
            assert_eq!(scalar, simd, "{} bits", width);
        }
    }
}

#[test]
fn test_operations_only_touch_used_bytes() {
    // 20 bits cover three bytes
    let a = [0xFFu8; 4];
    let b = [0x0Fu8; 4];
    let mut out = [0xAAu8; 4];
    bits::andnot(&mut out, &b, &a, 20).unwrap();
    assert_eq!(out, [0xF0, 0xF0, 0xF0, 0xAA]);

    bits::xor(&mut out, &a, &b, 8).unwrap();
    assert_eq!(out, [0xF0, 0xF0, 0xF0, 0xAA]);
    bits::and(&mut out, &a, &b, 1).unwrap();
    assert_eq!(out[0], 0x0F);
}

#[test]
fn test_short_buffers_are_rejected() {
    let mut out = [0u8; 5];
    assert!(matches!(
        bits::or(&mut out, &[0; 6], &[0; 6], 48),
        Err(KernelError::LengthMismatch { .. })
    ));
}

#[test]
fn test_single_byte_forms() {
    let mut out = [0u8];
    bits::and8(&mut out, &[0b1100], &[0b1010]);
    assert_eq!(out, [0b1000]);
    bits::or8(&mut out, &[0b1100], &[0b1010]);
    assert_eq!(out, [0b1110]);
    bits::xor8(&mut out, &[0b1100], &[0b1010]);
    assert_eq!(out, [0b0110]);
    bits::andnot8(&mut out, &[0b1100], &[0b1010]);
    assert_eq!(out, [0b0010]);
}

#[test]
fn test_random_bits_are_balanced() {
    const BITS: usize = 1 << 16;
    let mut buffer = vec![0u8; BITS / 8];
    bits::populate_random_bits(&mut buffer, BITS).unwrap();

    let ones: u64 = buffer.iter().map(|byte| byte.count_ones() as u64).sum();
    let distribution = Binomial::new(0.5, BITS as u64).unwrap();
    let tail = distribution.cdf(ones);
    assert!(tail > 1e-9 && tail < 1.0 - 1e-9, "{} ones in {} bits", ones, BITS);
}

#[test]
fn test_bit_array_randomize_respects_length() {
    let mut array = BitArray::new(13);
    array.randomize();
    assert_eq!(array.as_bytes().len(), 2);
    assert_eq!(array.as_bytes()[1] & 0b1110_0000, 0);
    assert_eq!(array.iter().count(), 13);
    assert_eq!(array.get(13), None);
}

#[test]
fn test_bit_array_from_bytes() {
    let array = BitArray::from_bytes(&[0b0000_0101, 0xFF], 10).unwrap();
    let bits: Vec<bool> = array.iter().collect();
    assert_eq!(
        bits,
        [true, false, true, false, false, false, false, false, true, true]
    );
    assert_eq!(array.as_bytes(), &[0b0000_0101, 0b0000_0011]);
    assert!(BitArray::from_bytes(&[0], 9).is_err());
}
