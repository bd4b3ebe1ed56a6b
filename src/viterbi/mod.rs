//! Viterbi decoding of the 802.11a convolutional code.
//!
//! The code has constraint length 7 and generators 133/171 (octal), with
//! puncturing to rates 2/3 and 3/4. Each [`ViterbiDecoder`] owns the full
//! state of one stream, so any number of frames can be decoded side by side.
//!
//! ```
//! use phy_kernels::viterbi::{to_soft, CodeRate, ConvolutionalEncoder, ViterbiDecoder};
//!
//! let bits: Vec<bool> = (0..48).map(|i| i % 3 == 0).collect();
//! let coded = ConvolutionalEncoder::new(CodeRate::Half).encode(&bits).unwrap();
//!
//! let mut decoder = ViterbiDecoder::new();
//! decoder.init(bits.len(), CodeRate::Half).unwrap();
//! let mut out = [0u8; 6];
//! let produced = decoder.decode(&to_soft(&coded, 64), &mut out).unwrap();
//!
//! assert_eq!(produced, 48);
//! assert!(bits.iter().enumerate().all(|(i, &b)| (out[i / 8] >> (i % 8)) & 1 == b as u8));
//! ```

mod decoder;
mod encoder;
mod trellis;

pub use decoder::{DecoderVariant, ViterbiDecoder, TRACEBACK_DEPTH};
pub use encoder::{to_soft, ConvolutionalEncoder};

use crate::error::KernelError;

/// Punctured code rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeRate {
    /// Unpunctured.
    Half,
    /// Keeps `A1 B1 A2` of every two steps.
    TwoThirds,
    /// Keeps `A1 B1 A2 B3` of every three steps.
    ThreeQuarters,
}

impl CodeRate {
    /// Keep mask over one puncturing period, as `(A, B)` pairs per step.
    pub(crate) const fn pattern(self) -> &'static [bool] {
        match self {
            CodeRate::Half => &[true, true],
            CodeRate::TwoThirds => &[true, true, true, false],
            CodeRate::ThreeQuarters => &[true, true, true, false, false, true],
        }
    }

    /// Trellis steps (data bits) per puncturing period.
    pub const fn period(self) -> usize {
        self.pattern().len() / 2
    }

    /// Coded symbols transmitted per puncturing period.
    pub const fn transmitted(self) -> usize {
        match self {
            CodeRate::Half => 2,
            CodeRate::TwoThirds => 3,
            CodeRate::ThreeQuarters => 4,
        }
    }
}

impl TryFrom<i16> for CodeRate {
    type Error = KernelError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CodeRate::Half),
            1 => Ok(CodeRate::TwoThirds),
            2 => Ok(CodeRate::ThreeQuarters),
            _ => Err(KernelError::InvalidCodeRate { code }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_counts() {
        for rate in [CodeRate::Half, CodeRate::TwoThirds, CodeRate::ThreeQuarters] {
            let kept = rate.pattern().iter().filter(|&&keep| keep).count();
            assert_eq!(kept, rate.transmitted());
        }
        assert_eq!(CodeRate::ThreeQuarters.period(), 3);
    }

    #[test]
    fn test_code_rate_from_raw() {
        assert_eq!(CodeRate::try_from(1), Ok(CodeRate::TwoThirds));
        assert_eq!(CodeRate::try_from(3), Err(KernelError::InvalidCodeRate { code: 3 }));
    }
}
