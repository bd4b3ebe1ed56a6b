//! Fixed-catalog FFT and IFFT over `Complex16`.
//!
//! The size argument is checked against the catalog at runtime and
//! dispatched to the matching [`Transform`] instantiation. Unsupported sizes
//! are logged and rejected without touching the output buffer.
//!
//! # Scaling
//!
//! The forward transform divides by the radix at every stage (overall
//! `1/N`); the inverse is unscaled. `ifft(fft(x))` therefore reconstructs
//! `x` up to rounding, and an impulse of amplitude `A·N` at index 0
//! transforms to `A` in every bin.

mod size;
mod transform;
mod twiddle;

use rayon::prelude::*;

pub use size::TransformSize;
pub use transform::{RadixPlan, Transform};

use crate::{
    error::{ensure_len, validation_error, KernelError, Result},
    types::Complex16,
};
use transform::Direction;

fn lookup(size: usize) -> Result<TransformSize> {
    TransformSize::try_from(size).inspect_err(|_| {
        tracing::warn!(size, "FFT size not supported");
    })
}

fn run(direction: Direction, output: &mut [Complex16], size: usize, input: &[Complex16]) -> Result<()> {
    let transform = lookup(size)?;
    ensure_len("fft input", size, input.len())?;
    ensure_len("fft output", size, output.len())?;
    transform.run(direction, output, input)
}

fn run_in_place(direction: Direction, buffer: &mut [Complex16], size: usize) -> Result<()> {
    let transform = lookup(size)?;
    ensure_len("fft buffer", size, buffer.len())?;
    transform.run_in_place(direction, buffer)
}

/// Forward transform of `input` into `output`, scaled by `1/size`.
///
/// # Errors
///
/// - [`KernelError::UnsupportedTransformSize`] if `size` is not in the catalog
/// - [`KernelError::LengthMismatch`] unless both buffers hold exactly `size` samples
///
/// ```
/// use phy_kernels::{fft, Complex16};
///
/// let input = vec![Complex16::default(); 64];
/// let mut output = vec![Complex16::new(1, 1); 64];
/// fft::fft(&mut output, 64, &input).unwrap();
/// assert!(output.iter().all(|&bin| bin == Complex16::default()));
///
/// assert!(fft::fft(&mut output, 63, &input).is_err());
/// ```
pub fn fft(output: &mut [Complex16], size: usize, input: &[Complex16]) -> Result<()> {
    run(Direction::Forward, output, size, input)
}

/// Unscaled inverse transform of `input` into `output`.
pub fn ifft(output: &mut [Complex16], size: usize, input: &[Complex16]) -> Result<()> {
    run(Direction::Inverse, output, size, input)
}

/// Forward transform overwriting `buffer`.
pub fn fft_in_place(buffer: &mut [Complex16], size: usize) -> Result<()> {
    run_in_place(Direction::Forward, buffer, size)
}

/// Inverse transform overwriting `buffer`.
pub fn ifft_in_place(buffer: &mut [Complex16], size: usize) -> Result<()> {
    run_in_place(Direction::Inverse, buffer, size)
}

/// [`fft`] with the size passed as `i16`. Negative sizes are unsupported.
pub fn fft_dynamic(output: &mut [Complex16], size: i16, input: &[Complex16]) -> Result<()> {
    fft(output, dynamic_size(size)?, input)
}

/// [`ifft`] with the size passed as `i16`.
pub fn ifft_dynamic(output: &mut [Complex16], size: i16, input: &[Complex16]) -> Result<()> {
    ifft(output, dynamic_size(size)?, input)
}

fn dynamic_size(size: i16) -> Result<usize> {
    usize::try_from(size).map_err(|_| {
        tracing::warn!(size, "FFT size not supported");
        KernelError::UnsupportedTransformSize { size: 0 }
    })
}

fn run_batch(direction: Direction, output: &mut [Complex16], size: usize, input: &[Complex16]) -> Result<()> {
    let transform = lookup(size)?;
    ensure_len("fft batch", input.len(), output.len())?;
    if input.len() % size != 0 {
        return Err(validation_error(format!(
            "batch of {} samples is not a whole number of {}-point symbols",
            input.len(),
            size
        )));
    }

    output
        .par_chunks_mut(size)
        .zip(input.par_chunks(size))
        .try_for_each(|(symbol_out, symbol_in)| transform.run(direction, symbol_out, symbol_in))
}

/// Forward transform of back-to-back `size`-point symbols, spread across the
/// rayon thread pool.
///
/// # Errors
///
/// As [`fft`], plus [`KernelError::ValidationError`] if the buffer length is
/// not a multiple of `size`.
pub fn par_fft(output: &mut [Complex16], size: usize, input: &[Complex16]) -> Result<()> {
    run_batch(Direction::Forward, output, size, input)
}

/// Batched form of [`ifft`]; see [`par_fft`].
pub fn par_ifft(output: &mut [Complex16], size: usize, input: &[Complex16]) -> Result<()> {
    run_batch(Direction::Inverse, output, size, input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_size_leaves_output_untouched() {
        let input = vec![Complex16::new(5, 5); 100];
        let mut output = vec![Complex16::new(7, -7); 100];
        assert_eq!(
            fft(&mut output, 100, &input),
            Err(KernelError::UnsupportedTransformSize { size: 100 })
        );
        assert!(output.iter().all(|&v| v == Complex16::new(7, -7)));
    }

    #[test]
    fn test_wrong_buffer_length() {
        let input = vec![Complex16::default(); 64];
        let mut output = vec![Complex16::default(); 32];
        assert!(matches!(
            ifft(&mut output, 64, &input),
            Err(KernelError::LengthMismatch { expected: 64, actual: 32, .. })
        ));
    }

    #[test]
    fn test_dynamic_negative_size() {
        let input = vec![Complex16::default(); 64];
        let mut output = vec![Complex16::default(); 64];
        assert!(fft_dynamic(&mut output, -64, &input).is_err());
        assert!(fft_dynamic(&mut output, 64, &input).is_ok());
    }

    #[test]
    fn test_batch_requires_whole_symbols() {
        let input = vec![Complex16::default(); 100];
        let mut output = vec![Complex16::default(); 100];
        assert!(matches!(
            par_fft(&mut output, 16, &input),
            Err(KernelError::ValidationError { .. })
        ));
    }
}
