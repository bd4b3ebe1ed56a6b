//! Bitwise logic over bit-packed buffers.
//!
//! Buffers are sized in bits and processed over `ceil(bits / 8)` bytes. The
//! generic operations run through the same lane drivers as the arithmetic
//! kernels. [`or`] additionally dispatches the protocol field widths 48, 96,
//! 192 and 288 to word-wide fast paths; they produce the same bytes as the
//! generic loop.
//!
//! Bit order within a byte is LSB first, matching [`BitArray`].

use chrono::Utc;
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::{
    error::{ensure_capacity, validation_error, Result},
    simd::{
        kernels::{AndNotU8, AndU8, OrU8, XorU8},
        slice, Backend,
    },
};

/// Number of bytes holding `bits` bits.
#[inline(always)]
pub const fn byte_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

#[inline(always)]
fn checked_byte_len(operation: &'static str, output: &[u8], input1: &[u8], input2: &[u8], bits: usize) -> Result<usize> {
    let len = byte_len(bits);
    ensure_capacity(operation, len, output.len())?;
    ensure_capacity(operation, len, input1.len())?;
    ensure_capacity(operation, len, input2.len())?;
    Ok(len)
}

impl Backend {
    /// `output = input1 & input2` over `ceil(bits / 8)` bytes.
    pub fn and(self, output: &mut [u8], input1: &[u8], input2: &[u8], bits: usize) -> Result<()> {
        let len = checked_byte_len("and", output, input1, input2, bits)?;
        slice::binary(self, &AndU8, &mut output[..len], &input1[..len], &input2[..len]);
        Ok(())
    }

    /// `output = input1 | input2` over `ceil(bits / 8)` bytes, byte loop only.
    pub fn or(self, output: &mut [u8], input1: &[u8], input2: &[u8], bits: usize) -> Result<()> {
        let len = checked_byte_len("or", output, input1, input2, bits)?;
        slice::binary(self, &OrU8, &mut output[..len], &input1[..len], &input2[..len]);
        Ok(())
    }

    /// `output = input1 ^ input2` over `ceil(bits / 8)` bytes.
    pub fn xor(self, output: &mut [u8], input1: &[u8], input2: &[u8], bits: usize) -> Result<()> {
        let len = checked_byte_len("xor", output, input1, input2, bits)?;
        slice::binary(self, &XorU8, &mut output[..len], &input1[..len], &input2[..len]);
        Ok(())
    }

    /// `output = !input1 & input2` over `ceil(bits / 8)` bytes.
    pub fn andnot(self, output: &mut [u8], input1: &[u8], input2: &[u8], bits: usize) -> Result<()> {
        let len = checked_byte_len("andnot", output, input1, input2, bits)?;
        slice::binary(self, &AndNotU8, &mut output[..len], &input1[..len], &input2[..len]);
        Ok(())
    }
}

/// Bitwise AND of the first `ceil(bits / 8)` bytes.
///
/// # Errors
///
/// [`KernelError::LengthMismatch`](crate::error::KernelError::LengthMismatch) if any buffer is shorter than that.
pub fn and(output: &mut [u8], input1: &[u8], input2: &[u8], bits: usize) -> Result<()> {
    Backend::active().and(output, input1, input2, bits)
}

/// Bitwise OR of the first `ceil(bits / 8)` bytes, with fast paths for
/// exactly 48, 96, 192 and 288 bits.
pub fn or(output: &mut [u8], input1: &[u8], input2: &[u8], bits: usize) -> Result<()> {
    checked_byte_len("or", output, input1, input2, bits)?;

    let handled = match bits {
        48 => or_fixed(or_48, output, input1, input2),
        96 => or_fixed(or_96, output, input1, input2),
        192 => or_fixed(or_192, output, input1, input2),
        288 => or_fixed(or_288, output, input1, input2),
        _ => false,
    };

    if handled {
        Ok(())
    } else {
        Backend::active().or(output, input1, input2, bits)
    }
}

/// Bitwise XOR of the first `ceil(bits / 8)` bytes.
pub fn xor(output: &mut [u8], input1: &[u8], input2: &[u8], bits: usize) -> Result<()> {
    Backend::active().xor(output, input1, input2, bits)
}

/// `!input1 & input2` over the first `ceil(bits / 8)` bytes.
pub fn andnot(output: &mut [u8], input1: &[u8], input2: &[u8], bits: usize) -> Result<()> {
    Backend::active().andnot(output, input1, input2, bits)
}

fn or_fixed<const N: usize>(
    op: fn(&mut [u8; N], &[u8; N], &[u8; N]),
    output: &mut [u8],
    input1: &[u8],
    input2: &[u8],
) -> bool {
    match (output.first_chunk_mut::<N>(), input1.first_chunk::<N>(), input2.first_chunk::<N>()) {
        (Some(o), Some(a), Some(b)) => {
            op(o, a, b);
            true
        }
        _ => false,
    }
}

// ================================================================================================
// FIXED-WIDTH FAST PATHS
// ================================================================================================

#[inline(always)]
fn word64(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(bytes);
    u64::from_ne_bytes(word)
}

#[inline(always)]
fn word16(bytes: &[u8]) -> u16 {
    u16::from_ne_bytes([bytes[0], bytes[1]])
}

/// ORs `N` bytes as 64-bit words; the tail (always an even byte count for
/// the supported widths) goes through 16-bit words.
#[inline(always)]
fn or_words<const N: usize>(output: &mut [u8; N], input1: &[u8; N], input2: &[u8; N]) {
    let mut out_words = output.chunks_exact_mut(8);
    let a_words = input1.chunks_exact(8);
    let b_words = input2.chunks_exact(8);
    let (a_tail, b_tail) = (a_words.remainder(), b_words.remainder());

    for ((o, a), b) in (&mut out_words).zip(a_words).zip(b_words) {
        o.copy_from_slice(&(word64(a) | word64(b)).to_ne_bytes());
    }

    for ((o, a), b) in out_words
        .into_remainder()
        .chunks_exact_mut(2)
        .zip(a_tail.chunks_exact(2))
        .zip(b_tail.chunks_exact(2))
    {
        o.copy_from_slice(&(word16(a) | word16(b)).to_ne_bytes());
    }
}

/// OR of a 48-bit field.
pub fn or_48(output: &mut [u8; 6], input1: &[u8; 6], input2: &[u8; 6]) {
    or_words(output, input1, input2);
}

/// OR of a 96-bit field.
pub fn or_96(output: &mut [u8; 12], input1: &[u8; 12], input2: &[u8; 12]) {
    or_words(output, input1, input2);
}

/// OR of a 192-bit field.
pub fn or_192(output: &mut [u8; 24], input1: &[u8; 24], input2: &[u8; 24]) {
    or_words(output, input1, input2);
}

/// OR of a 288-bit field.
pub fn or_288(output: &mut [u8; 36], input1: &[u8; 36], input2: &[u8; 36]) {
    or_words(output, input1, input2);
}

// Single-byte forms; the array type fixes the length.

#[inline]
pub fn and8(output: &mut [u8; 1], input1: &[u8; 1], input2: &[u8; 1]) {
    output[0] = input1[0] & input2[0];
}

#[inline]
pub fn or8(output: &mut [u8; 1], input1: &[u8; 1], input2: &[u8; 1]) {
    output[0] = input1[0] | input2[0];
}

#[inline]
pub fn xor8(output: &mut [u8; 1], input1: &[u8; 1], input2: &[u8; 1]) {
    output[0] = input1[0] ^ input2[0];
}

#[inline]
pub fn andnot8(output: &mut [u8; 1], input1: &[u8; 1], input2: &[u8; 1]) {
    output[0] = !input1[0] & input2[0];
}

// ================================================================================================
// RANDOM BITS
// ================================================================================================

fn clock_seeded_rng() -> StdRng {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    StdRng::seed_from_u64(nanos as u64)
}

/// Fills `bit_count / 8` bytes of `buffer` from a PRNG seeded with the wall
/// clock. Not suitable for anything cryptographic.
///
/// # Errors
///
/// [`KernelError::LengthMismatch`](crate::error::KernelError::LengthMismatch) if `buffer` is shorter than `bit_count / 8`.
pub fn populate_random_bits(buffer: &mut [u8], bit_count: usize) -> Result<()> {
    let len = bit_count / 8;
    ensure_capacity("populate_random_bits", len, buffer.len())?;
    clock_seeded_rng().fill_bytes(&mut buffer[..len]);
    Ok(())
}

// ================================================================================================
// BIT ARRAY
// ================================================================================================

/// Packed bit buffer, LSB first within each byte.
///
/// The logical length is tracked separately from the `ceil(len / 8)` bytes
/// of storage; bits past the logical length in the last byte are kept zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct BitArray {
    bytes: Vec<u8>,
    bits: usize,
}

impl BitArray {
    /// All-zero array of `bits` bits.
    pub fn new(bits: usize) -> Self {
        Self {
            bytes: vec![0; byte_len(bits)],
            bits,
        }
    }

    /// Copies the first `ceil(bits / 8)` bytes of `bytes`.
    ///
    /// # Errors
    ///
    /// [`KernelError::LengthMismatch`](crate::error::KernelError::LengthMismatch) if `bytes` is too short.
    pub fn from_bytes(bytes: &[u8], bits: usize) -> Result<Self> {
        let len = byte_len(bits);
        ensure_capacity("BitArray::from_bytes", len, bytes.len())?;
        let mut array = Self {
            bytes: bytes[..len].to_vec(),
            bits,
        };
        array.clear_tail();
        Ok(array)
    }

    /// Logical length in bits.
    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.bits).then(|| (self.bytes[index / 8] >> (index % 8)) & 1 == 1)
    }

    /// Sets the bit at `index`.
    ///
    /// # Errors
    ///
    /// [`KernelError::ValidationError`](crate::error::KernelError::ValidationError) if `index` is past the end.
    pub fn set(&mut self, index: usize, bit: bool) -> Result<()> {
        if index >= self.bits {
            return Err(validation_error(format!(
                "bit index {} out of range for {} bits",
                index, self.bits
            )));
        }

        let mask = 1u8 << (index % 8);
        if bit {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw storage. Callers writing bits past the logical length get them
    /// back from `as_bytes` but never from `get`.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Fills every bit with clock-seeded pseudo-random data.
    pub fn randomize(&mut self) {
        clock_seeded_rng().fill_bytes(&mut self.bytes);
        self.clear_tail();
    }

    /// Iterator over the logical bits.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bits).map(move |i| (self.bytes[i / 8] >> (i % 8)) & 1 == 1)
    }

    fn clear_tail(&mut self) {
        let used = self.bits % 8;
        if used == 0 {
            return;
        }
        if let Some(last) = self.bytes.last_mut() {
            *last &= (1u8 << used) - 1;
        }
    }
}
