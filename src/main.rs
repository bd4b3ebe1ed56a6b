use phy_kernels::{
    bits::{self, BitArray},
    fft, timing::Stopwatch, trig,
    viterbi::{to_soft, CodeRate, ConvolutionalEncoder, ViterbiDecoder},
    Backend, Complex16, KernelError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SYMBOL: usize = 64;
const FRAME_BITS: usize = 288;

fn main() -> Result<(), KernelError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let backend = Backend::active();
    info!(?backend, instruction_set = Backend::instruction_set(), "kernels ready");

    // A tone on subcarrier 5, back through the forward transform
    let tone: Vec<Complex16> = (0..SYMBOL)
        .map(|i| {
            let angle = (i * 5 * (trig::FULL_TURN as usize / SYMBOL)) as u16 as i16;
            Complex16::new(trig::cos_i16(angle) / 8, trig::sin_i16(angle) / 8)
        })
        .collect();
    let mut bins = vec![Complex16::default(); SYMBOL];
    let watch = Stopwatch::start("fft");
    fft::fft(&mut bins, SYMBOL, &tone)?;
    let elapsed = watch.stop();
    let peak = (0..SYMBOL)
        .max_by_key(|&k| power(bins[k]))
        .unwrap_or(0);
    info!(peak, value = ?bins[peak], elapsed_ns = elapsed, "64-point transform");

    // Random frame through the rate 3/4 code
    let mut frame = BitArray::new(FRAME_BITS);
    frame.randomize();
    let data: Vec<bool> = frame.iter().collect();
    let coded = ConvolutionalEncoder::new(CodeRate::ThreeQuarters).encode(&data)?;

    let mut decoder = ViterbiDecoder::new();
    decoder.init(FRAME_BITS, CodeRate::ThreeQuarters)?;
    let mut decoded = vec![0u8; bits::byte_len(FRAME_BITS)];
    decoder.decode(&to_soft(&coded, 32), &mut decoded)?;

    let mut errors = vec![0u8; decoded.len()];
    bits::xor(&mut errors, &decoded, frame.as_bytes(), FRAME_BITS)?;
    let bit_errors: u32 = errors.iter().map(|byte| byte.count_ones()).sum();
    info!(bits = FRAME_BITS, bit_errors, "viterbi round trip");

    Ok(())
}

fn power(sample: Complex16) -> i32 {
    let (re, im) = (sample.re as i32, sample.im as i32);
    re * re + im * im
}
