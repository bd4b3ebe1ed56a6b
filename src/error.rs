//! Error types for kernel operations.
//!
//! Every precondition a kernel relies on (buffer lengths, shift amounts,
//! transform sizes, decoder state) is checked up front and reported through
//! [`KernelError`] instead of reading out of bounds or silently doing nothing.

use std::fmt;

/// Errors that can occur during kernel operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// A buffer does not have the length the operation requires.
    LengthMismatch {
        /// Name of the operation that rejected the buffer.
        operation: &'static str,
        /// Required number of elements.
        expected: usize,
        /// Number of elements supplied.
        actual: usize,
    },
    /// Shift amount is not smaller than the lane width.
    InvalidShift {
        /// Requested shift.
        shift: u32,
        /// Lane width in bits.
        bits: u32,
    },
    /// Transform length outside the supported catalog.
    UnsupportedTransformSize {
        /// Requested length.
        size: usize,
    },
    /// Code rate identifier with no puncturing pattern.
    InvalidCodeRate {
        /// Raw identifier passed by the caller.
        code: i16,
    },
    /// `decode` was called before `init`.
    DecoderNotInitialized,
    /// The current frame has been fully decoded; the decoder needs `init`.
    FrameComplete {
        /// Frame length in decoded bits.
        frame_length: usize,
    },
    /// The chunk holds more trellis steps than are left in the frame.
    FrameOverrun {
        /// Trellis steps left in the frame.
        remaining: usize,
        /// Trellis steps the chunk would add.
        requested: usize,
    },
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch {
                operation,
                expected,
                actual,
            } => write!(
                f,
                "Length mismatch in {}: expected {} elements, got {}",
                operation, expected, actual
            ),
            KernelError::InvalidShift { shift, bits } => {
                write!(f, "Invalid shift: {} is not below the {}-bit lane width", shift, bits)
            }
            KernelError::UnsupportedTransformSize { size } => {
                write!(f, "Transform size {} not supported", size)
            }
            KernelError::InvalidCodeRate { code } => write!(f, "Invalid code rate identifier {}", code),
            KernelError::DecoderNotInitialized => write!(f, "Decoder used before init"),
            KernelError::FrameComplete { frame_length } => write!(
                f,
                "Frame of {} bits already decoded; call init before the next frame",
                frame_length
            ),
            KernelError::FrameOverrun {
                remaining,
                requested,
            } => write!(
                f,
                "Frame overrun: chunk needs {} trellis steps but only {} remain",
                requested, remaining
            ),
            KernelError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Result type alias for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;

/// Creates a length mismatch error.
pub fn length_mismatch(operation: &'static str, expected: usize, actual: usize) -> KernelError {
    KernelError::LengthMismatch {
        operation,
        expected,
        actual,
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> KernelError {
    KernelError::ValidationError {
        message: message.into(),
    }
}

/// Fails with [`KernelError::LengthMismatch`] unless `actual == expected`.
#[inline(always)]
pub(crate) fn ensure_len(operation: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(length_mismatch(operation, expected, actual))
    }
}

/// Fails with [`KernelError::LengthMismatch`] unless `actual >= expected`.
#[inline(always)]
pub(crate) fn ensure_capacity(operation: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual >= expected {
        Ok(())
    } else {
        Err(length_mismatch(operation, expected, actual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let error = length_mismatch("add", 16, 15);
        let display = format!("{}", error);
        assert!(display.contains("Length mismatch in add"));
        assert!(display.contains("expected 16"));
        assert!(display.contains("got 15"));
    }

    #[test]
    fn test_invalid_shift_display() {
        let error = KernelError::InvalidShift { shift: 16, bits: 16 };
        let display = format!("{}", error);
        assert!(display.contains("16-bit lane width"));
    }

    #[test]
    fn test_unsupported_size_display() {
        let error = KernelError::UnsupportedTransformSize { size: 100 };
        assert_eq!(format!("{}", error), "Transform size 100 not supported");
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("frame length must be a multiple of 3");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("multiple of 3"));
    }

    #[test]
    fn test_ensure_helpers() {
        assert!(ensure_len("sub", 4, 4).is_ok());
        assert_eq!(ensure_len("sub", 4, 3), Err(length_mismatch("sub", 4, 3)));
        assert!(ensure_capacity("or", 6, 8).is_ok());
        assert!(ensure_capacity("or", 6, 5).is_err());
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = KernelError::DecoderNotInitialized;
        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
