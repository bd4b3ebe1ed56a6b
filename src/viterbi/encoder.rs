use crate::{
    error::{validation_error, Result},
    viterbi::{trellis, CodeRate},
};

/// Punctured 802.11a convolutional encoder, the counterpart of
/// [`ViterbiDecoder`](crate::viterbi::ViterbiDecoder).
#[derive(Clone, Debug)]
pub struct ConvolutionalEncoder {
    rate: CodeRate,
    state: usize,
}

impl ConvolutionalEncoder {
    /// Encoder in the all-zero state.
    pub fn new(rate: CodeRate) -> Self {
        Self { rate, state: 0 }
    }

    pub fn rate(&self) -> CodeRate {
        self.rate
    }

    pub fn reset(&mut self) {
        self.state = 0;
    }

    /// Encodes `bits` and drops the punctured outputs. The register carries
    /// over between calls.
    ///
    /// # Errors
    ///
    /// [`KernelError::ValidationError`](crate::error::KernelError::ValidationError)
    /// if `bits` is not a whole number of puncturing periods.
    pub fn encode(&mut self, bits: &[bool]) -> Result<Vec<bool>> {
        let period = self.rate.period();
        if bits.len() % period != 0 {
            return Err(validation_error(format!(
                "{} bits is not a multiple of the {}-bit puncturing period",
                bits.len(),
                period
            )));
        }

        let pattern = self.rate.pattern();
        let mut coded = Vec::with_capacity(bits.len() / period * self.rate.transmitted());
        for chunk in bits.chunks_exact(period) {
            for (&bit, keep) in chunk.iter().zip(pattern.chunks_exact(2)) {
                let ((a, b), next) = trellis::encode_step(self.state, bit);
                self.state = next;
                if keep[0] {
                    coded.push(a);
                }
                if keep[1] {
                    coded.push(b);
                }
            }
        }
        Ok(coded)
    }
}

/// Maps coded bits to soft decoder input: `1` to `+amplitude`, `0` to
/// `-amplitude`.
pub fn to_soft(coded: &[bool], amplitude: i8) -> Vec<i8> {
    let magnitude = amplitude.saturating_abs();
    coded
        .iter()
        .map(|&bit| if bit { magnitude } else { -magnitude })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_lengths_per_rate() {
        let bits = vec![true; 12];
        for (rate, expected) in [
            (CodeRate::Half, 24),
            (CodeRate::TwoThirds, 18),
            (CodeRate::ThreeQuarters, 16),
        ] {
            let coded = ConvolutionalEncoder::new(rate).encode(&bits).unwrap();
            assert_eq!(coded.len(), expected, "{:?}", rate);
        }
    }

    #[test]
    fn test_partial_period_rejected() {
        let mut encoder = ConvolutionalEncoder::new(CodeRate::ThreeQuarters);
        assert!(encoder.encode(&[true; 4]).is_err());
    }

    #[test]
    fn test_to_soft() {
        assert_eq!(to_soft(&[true, false], 64), vec![64, -64]);
        assert_eq!(to_soft(&[true, false], i8::MIN), vec![127, -127]);
    }
}
