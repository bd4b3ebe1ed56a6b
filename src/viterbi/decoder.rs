use tracing::debug;

use crate::{
    bits::byte_len,
    error::{ensure_capacity, length_mismatch, validation_error, KernelError, Result},
    viterbi::{
        trellis::{self, PathMetrics},
        CodeRate,
    },
};

/// Decisions kept behind the newest step before a bit is released.
pub const TRACEBACK_DEPTH: usize = 64;

/// How a frame is traced back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecoderVariant {
    /// Releases bits while decoding and ends on the best state.
    Generic,
    /// Rate 1/2, zero-terminated trellis; everything is released at the end
    /// of the frame, traced back from state 0.
    SignalField,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    length: usize,
    rate: CodeRate,
    variant: DecoderVariant,
    consumed: usize,
    released: usize,
}

impl Frame {
    fn is_complete(&self) -> bool {
        self.consumed == self.length
    }

    /// Bits that can be released once `consumed` steps have been decoded.
    fn releasable(&self, consumed: usize) -> usize {
        if consumed == self.length {
            return self.length - self.released;
        }
        match self.variant {
            DecoderVariant::Generic => {
                let settled = consumed.saturating_sub(TRACEBACK_DEPTH);
                settled.saturating_sub(self.released) / 8 * 8
            }
            DecoderVariant::SignalField => 0,
        }
    }
}

/// Decoder for one stream of frames.
///
/// ```text
/// new() ──► uninitialized ──init()──► decoding ──decode()*──► complete
///                                        ▲                       │
///                                        └────────init()─────────┘
/// ```
///
/// Soft input is one `i8` per transmitted coded bit: positive means 1,
/// negative means 0 and zero carries no information (the punctured
/// positions are filled with zero internally).
#[derive(Clone, Debug)]
pub struct ViterbiDecoder {
    frame: Option<Frame>,
    metrics: PathMetrics,
    /// Survivor decisions of the steps not yet released, oldest first.
    decisions: Vec<u64>,
    scratch: Vec<bool>,
}

impl Default for ViterbiDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ViterbiDecoder {
    /// Uninitialized decoder; call [`init`](Self::init) before decoding.
    pub fn new() -> Self {
        Self {
            frame: None,
            metrics: PathMetrics::new(),
            decisions: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Starts a frame of `frame_length` data bits.
    ///
    /// # Errors
    ///
    /// [`KernelError::ValidationError`] if the frame is empty or not a whole
    /// number of puncturing periods.
    pub fn init(&mut self, frame_length: usize, code_rate: CodeRate) -> Result<()> {
        self.start(frame_length, code_rate, DecoderVariant::Generic)
    }

    /// Starts a zero-terminated signal field of `frame_length` data bits.
    ///
    /// # Errors
    ///
    /// As [`init`](Self::init), and [`KernelError::ValidationError`] for any
    /// rate other than 1/2.
    pub fn init_signal(&mut self, frame_length: usize, code_rate: CodeRate) -> Result<()> {
        if code_rate != CodeRate::Half {
            return Err(validation_error(format!(
                "signal field decoding needs rate 1/2, got {:?}",
                code_rate
            )));
        }
        self.start(frame_length, code_rate, DecoderVariant::SignalField)
    }

    fn start(&mut self, frame_length: usize, rate: CodeRate, variant: DecoderVariant) -> Result<()> {
        if frame_length == 0 || frame_length % rate.period() != 0 {
            return Err(validation_error(format!(
                "frame length {} must be a positive multiple of {}",
                frame_length,
                rate.period()
            )));
        }

        self.frame = Some(Frame {
            length: frame_length,
            rate,
            variant,
            consumed: 0,
            released: 0,
        });
        self.metrics = PathMetrics::new();
        self.decisions.clear();
        self.decisions.reserve(frame_length.min(TRACEBACK_DEPTH * 4));

        debug!(frame_length, ?rate, ?variant, "viterbi frame started");
        Ok(())
    }

    /// Decodes one chunk of soft symbols and writes the released bits to
    /// `output`, LSB first from `output[0]`. Returns the number of bits
    /// written, which is a multiple of 8 until the frame's last chunk.
    ///
    /// # Errors
    ///
    /// - [`KernelError::DecoderNotInitialized`] before the first `init`
    /// - [`KernelError::FrameComplete`] once the whole frame was decoded
    /// - [`KernelError::LengthMismatch`] if `input` is not a whole number of
    ///   puncturing periods or `output` cannot hold the released bits
    /// - [`KernelError::FrameOverrun`] if `input` runs past the frame
    ///
    /// The decoder state is unchanged when an error is returned.
    pub fn decode(&mut self, input: &[i8], output: &mut [u8]) -> Result<usize> {
        let mut frame = self.frame.ok_or(KernelError::DecoderNotInitialized)?;
        if frame.is_complete() {
            return Err(KernelError::FrameComplete {
                frame_length: frame.length,
            });
        }

        let transmitted = frame.rate.transmitted();
        if input.len() % transmitted != 0 {
            return Err(length_mismatch(
                "viterbi input",
                input.len() - input.len() % transmitted,
                input.len(),
            ));
        }

        let steps = input.len() / transmitted * frame.rate.period();
        let remaining = frame.length - frame.consumed;
        if steps > remaining {
            return Err(KernelError::FrameOverrun {
                remaining,
                requested: steps,
            });
        }

        let consumed = frame.consumed + steps;
        let release = frame.releasable(consumed);
        ensure_capacity("viterbi output", byte_len(release), output.len())?;

        let pattern = frame.rate.pattern();
        for period in input.chunks_exact(transmitted) {
            let mut symbols = period.iter().copied();
            for keep in pattern.chunks_exact(2) {
                let soft_a = if keep[0] { symbols.next().unwrap_or(0) } else { 0 };
                let soft_b = if keep[1] { symbols.next().unwrap_or(0) } else { 0 };
                self.decisions.push(self.metrics.step(soft_a, soft_b));
            }
        }
        frame.consumed = consumed;

        if release > 0 {
            let end_state = match (frame.is_complete(), frame.variant) {
                (true, DecoderVariant::SignalField) => 0,
                _ => self.metrics.best_state(),
            };
            self.scratch.clear();
            self.scratch.resize(self.decisions.len(), false);
            trellis::traceback(&self.decisions, end_state, &mut self.scratch);

            write_bits(&mut output[..byte_len(release)], &self.scratch[..release]);
            self.decisions.drain(..release);
            frame.released += release;
        }

        if frame.is_complete() {
            debug!(frame_length = frame.length, "viterbi frame complete");
        }
        self.frame = Some(frame);
        Ok(release)
    }

    /// Frame length in data bits, once initialized.
    pub fn frame_length(&self) -> Option<usize> {
        self.frame.map(|frame| frame.length)
    }

    pub fn code_rate(&self) -> Option<CodeRate> {
        self.frame.map(|frame| frame.rate)
    }

    pub fn variant(&self) -> Option<DecoderVariant> {
        self.frame.map(|frame| frame.variant)
    }

    /// Data bits (trellis steps) consumed in the current frame.
    pub fn bits_consumed(&self) -> usize {
        self.frame.map_or(0, |frame| frame.consumed)
    }

    /// True once the current frame has been fully decoded.
    pub fn is_complete(&self) -> bool {
        self.frame.is_some_and(|frame| frame.is_complete())
    }
}

fn write_bits(output: &mut [u8], bits: &[bool]) {
    output.fill(0);
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            output[i / 8] |= 1 << (i % 8);
        }
    }
}
