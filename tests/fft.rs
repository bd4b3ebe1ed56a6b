//! Transform accuracy over the whole catalog.

use std::f64::consts::TAU;

use phy_kernels::{fft, Complex16, KernelError, TransformSize};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_symbol(rng: &mut StdRng, len: usize, amplitude: i16) -> Vec<Complex16> {
    (0..len)
        .map(|_| Complex16::new(rng.random_range(-amplitude..=amplitude), rng.random_range(-amplitude..=amplitude)))
        .collect()
}

/// Direct `1/N`-scaled DFT in floating point.
fn reference_dft(input: &[Complex16]) -> Vec<(f64, f64)> {
    let n = input.len();
    (0..n)
        .map(|k| {
            let (mut re, mut im) = (0.0, 0.0);
            for (j, x) in input.iter().enumerate() {
                let angle = -TAU * ((j * k) % n) as f64 / n as f64;
                let (sin, cos) = angle.sin_cos();
                re += x.re as f64 * cos - x.im as f64 * sin;
                im += x.re as f64 * sin + x.im as f64 * cos;
            }
            (re / n as f64, im / n as f64)
        })
        .collect()
}

#[test]
fn test_forward_matches_reference() {
    let mut rng = StdRng::seed_from_u64(2024);
    for len in [12, 60, 64, 324, 1200] {
        let input = random_symbol(&mut rng, len, 20_000);
        let mut output = vec![Complex16::default(); len];
        fft::fft(&mut output, len, &input).unwrap();

        for (k, (bin, (re, im))) in output.iter().zip(reference_dft(&input)).enumerate() {
            assert!(
                (bin.re as f64 - re).abs() <= 2.0 && (bin.im as f64 - im).abs() <= 2.0,
                "{}-point bin {}: {:?} vs ({:.2}, {:.2})",
                len,
                k,
                bin,
                re,
                im
            );
        }
    }
}

#[test]
fn test_round_trip_every_size() {
    let mut rng = StdRng::seed_from_u64(11);
    for &size in TransformSize::ALL {
        let len = size.len();
        let input = random_symbol(&mut rng, len, 1000);
        let mut bins = vec![Complex16::default(); len];
        let mut restored = vec![Complex16::default(); len];
        fft::fft(&mut bins, len, &input).unwrap();
        fft::ifft(&mut restored, len, &bins).unwrap();

        let tolerance = 4 * (len as f64).sqrt() as i32 + 8;
        let worst = input
            .iter()
            .zip(&restored)
            .map(|(a, b)| (a.re as i32 - b.re as i32).abs().max((a.im as i32 - b.im as i32).abs()))
            .max()
            .unwrap_or(0);
        assert!(worst <= tolerance, "{}: error {} over {}", size, worst, tolerance);
    }
}

#[test]
fn test_impulse_and_zero() {
    for &size in TransformSize::ALL {
        let len = size.len();
        let mut impulse = vec![Complex16::default(); len];
        impulse[0] = Complex16::new(16, -8);
        let mut bins = vec![Complex16::new(1, 1); len];

        // The inverse is unscaled, so an impulse spreads unchanged
        fft::ifft(&mut bins, len, &impulse).unwrap();
        assert!(bins.iter().all(|&bin| bin == Complex16::new(16, -8)), "{}", size);

        let zero = vec![Complex16::default(); len];
        fft::fft(&mut bins, len, &zero).unwrap();
        assert!(bins.iter().all(|&bin| bin == Complex16::default()), "{}", size);
    }
}

#[test]
fn test_in_place_matches_out_of_place() {
    let mut rng = StdRng::seed_from_u64(5);
    for len in [48, 256, 1152, 2048] {
        let input = random_symbol(&mut rng, len, 4000);
        let mut expected = vec![Complex16::default(); len];
        fft::fft(&mut expected, len, &input).unwrap();

        let mut buffer = input.clone();
        fft::fft_in_place(&mut buffer, len).unwrap();
        assert_eq!(buffer, expected);

        fft::ifft(&mut expected, len, &input).unwrap();
        buffer.copy_from_slice(&input);
        fft::ifft_in_place(&mut buffer, len).unwrap();
        assert_eq!(buffer, expected);
    }
}

#[test]
fn test_dynamic_size() {
    let input = vec![Complex16::new(3, 0); 128];
    let mut output = vec![Complex16::default(); 128];
    fft::fft_dynamic(&mut output, 128, &input).unwrap();
    assert_eq!(output[0], Complex16::new(3, 0));

    assert_eq!(
        fft::ifft_dynamic(&mut output, 127, &input),
        Err(KernelError::UnsupportedTransformSize { size: 127 })
    );
    assert_eq!(
        fft::ifft_dynamic(&mut output, -128, &input),
        Err(KernelError::UnsupportedTransformSize { size: 0 })
    );
}

#[test]
fn test_parallel_batch_matches_sequential() {
    const SIZE: usize = 64;
    const SYMBOLS: usize = 40;
    let mut rng = StdRng::seed_from_u64(99);
    let input = random_symbol(&mut rng, SIZE * SYMBOLS, 8000);

    let mut batched = vec![Complex16::default(); input.len()];
    fft::par_fft(&mut batched, SIZE, &input).unwrap();

    for (symbol_in, symbol_out) in input.chunks(SIZE).zip(batched.chunks(SIZE)) {
        let mut expected = vec![Complex16::default(); SIZE];
        fft::fft(&mut expected, SIZE, symbol_in).unwrap();
        assert_eq!(symbol_out, &expected[..]);
    }

    let mut restored = vec![Complex16::default(); input.len()];
    fft::par_ifft(&mut restored, SIZE, &batched).unwrap();
    let mut expected = vec![Complex16::default(); SIZE];
    fft::ifft(&mut expected, SIZE, &batched[..SIZE]).unwrap();
    assert_eq!(&restored[..SIZE], &expected[..]);
}

#[test]
fn test_catalog_conversions() {
    assert_eq!(TransformSize::ALL.len(), 42);
    assert_eq!(TransformSize::try_from(1152), Ok(TransformSize::N1152));
    assert_eq!(
        TransformSize::try_from(1536),
        Err(KernelError::UnsupportedTransformSize { size: 1536 })
    );
    assert_eq!(usize::from(TransformSize::N12), 12);
    assert!(TransformSize::try_from(4096).is_err());
    assert!(TransformSize::ALL.windows(2).all(|pair| pair[0].len() < pair[1].len()));
}
