//! K = 7 trellis of the 802.11a convolutional code.
//!
//! The encoder register is `input << 6 | state`, where `state` holds the
//! six previous input bits with the most recent one in bit 5. Shifting the
//! register right by one gives the next state, so state `s` is reached from
//! `(s << 1) & 63` and `((s << 1) & 63) | 1`, both with input bit `s >> 5`.

pub(crate) const STATES: usize = 64;

/// Generator A, 133 octal.
pub(crate) const POLY_A: u32 = 0o133;
/// Generator B, 171 octal.
pub(crate) const POLY_B: u32 = 0o171;

const STATE_MASK: usize = STATES - 1;

// Start-up value for states the encoder cannot be in yet
const UNREACHABLE: i32 = i32::MIN / 4;

/// Coded pair of every register value: bit 0 is output A, bit 1 output B.
const BRANCH_OUTPUTS: [u8; 2 * STATES] = branch_outputs();

const fn branch_outputs() -> [u8; 2 * STATES] {
    let mut table = [0u8; 2 * STATES];
    let mut reg = 0;
    while reg < table.len() {
        let a = (reg as u32 & POLY_A).count_ones() & 1;
        let b = (reg as u32 & POLY_B).count_ones() & 1;
        table[reg] = (a | (b << 1)) as u8;
        reg += 1;
    }
    table
}

/// Coded bits and next state for one input bit.
#[inline(always)]
pub(crate) fn encode_step(state: usize, bit: bool) -> ((bool, bool), usize) {
    let reg = ((bit as usize) << 6) | state;
    let coded = BRANCH_OUTPUTS[reg];
    ((coded & 1 == 1, coded & 2 == 2), reg >> 1)
}

/// Correlation of the soft pair with the branch's coded bits. Positive soft
/// values vote for 1, negative for 0, zero abstains.
#[inline(always)]
fn branch_metric(reg: usize, soft_a: i8, soft_b: i8) -> i32 {
    let coded = BRANCH_OUTPUTS[reg];
    let a = if coded & 1 == 1 { soft_a as i32 } else { -(soft_a as i32) };
    let b = if coded & 2 == 2 { soft_b as i32 } else { -(soft_b as i32) };
    a + b
}

/// Path metrics of all states. Larger is better.
#[derive(Clone, Debug)]
pub(crate) struct PathMetrics {
    metrics: [i32; STATES],
}

impl PathMetrics {
    pub(crate) fn new() -> Self {
        let mut metrics = [UNREACHABLE; STATES];
        metrics[0] = 0;
        Self { metrics }
    }

    /// One add-compare-select step. Bit `s` of the returned mask is set when
    /// state `s` survives through the odd predecessor.
    pub(crate) fn step(&mut self, soft_a: i8, soft_b: i8) -> u64 {
        let mut next = [0i32; STATES];
        let mut decisions = 0u64;

        for (state, metric) in next.iter_mut().enumerate() {
            let input = (state >> 5) << 6;
            let even = (state << 1) & STATE_MASK;
            let odd = even | 1;

            let via_even = self.metrics[even] + branch_metric(input | even, soft_a, soft_b);
            let via_odd = self.metrics[odd] + branch_metric(input | odd, soft_a, soft_b);

            if via_odd > via_even {
                *metric = via_odd;
                decisions |= 1 << state;
            } else {
                *metric = via_even;
            }
        }

        // Normalize so the best state sits at zero
        let best = next.iter().copied().max().unwrap_or(0);
        for metric in next.iter_mut() {
            *metric -= best;
        }

        self.metrics = next;
        decisions
    }

    /// State with the largest metric; the lowest index wins ties.
    pub(crate) fn best_state(&self) -> usize {
        let mut best = 0;
        for (state, &metric) in self.metrics.iter().enumerate() {
            if metric > self.metrics[best] {
                best = state;
            }
        }
        best
    }
}

/// Traces the survivor path ending in `state` after the last decision and
/// writes one decoded bit per decision into `bits`.
pub(crate) fn traceback(decisions: &[u64], mut state: usize, bits: &mut [bool]) {
    debug_assert_eq!(decisions.len(), bits.len());

    for (bit, &mask) in bits.iter_mut().zip(decisions).rev() {
        *bit = state >> 5 == 1;
        let odd = ((mask >> state) & 1) as usize;
        state = ((state << 1) & STATE_MASK) | odd;
    }
}
