//! Table backend: a 1024-step sine table and a 1024-step arctangent table
//! over `[0, 1]`, both read with linear interpolation.
//!
//! The tables are built once with `f64`; lookups are integer-only.

use std::{
    f64::consts::{PI, TAU},
    sync::OnceLock,
};

use super::{wrap_turn, AMPLITUDE, QUARTER_TURN};

const SINE_STEPS: usize = 1024;
// Angle bits below the table index
const SINE_FRACTION_BITS: u32 = 16 - SINE_STEPS.trailing_zeros();

const ATAN_STEPS: usize = 1024;
// The y/x ratio is taken in Q16 before indexing
const RATIO_BITS: u32 = 16;
const ATAN_FRACTION_BITS: u32 = RATIO_BITS - ATAN_STEPS.trailing_zeros();

static SINE: OnceLock<Box<[i16]>> = OnceLock::new();
static ATAN: OnceLock<Box<[i32]>> = OnceLock::new();

/// One full turn plus the wrap-around entry.
fn sine_table() -> &'static [i16] {
    SINE.get_or_init(|| {
        (0..=SINE_STEPS)
            .map(|i| (AMPLITUDE as f64 * (TAU * i as f64 / SINE_STEPS as f64).sin()).round() as i16)
            .collect()
    })
}

/// `atan(i / ATAN_STEPS)` in binary angle units, `i` in `0..=ATAN_STEPS`.
fn atan_table() -> &'static [i32] {
    ATAN.get_or_init(|| {
        let units_per_radian = 32768.0 / PI;
        (0..=ATAN_STEPS)
            .map(|i| ((i as f64 / ATAN_STEPS as f64).atan() * units_per_radian).round() as i32)
            .collect()
    })
}

#[inline(always)]
fn lerp(low: i32, high: i32, fraction: i32, bits: u32) -> i32 {
    low + (((high - low) * fraction + (1 << (bits - 1))) >> bits)
}

pub fn sin_i16(angle: i16) -> i16 {
    let table = sine_table();
    let turn = angle as u16 as usize;
    let index = turn >> SINE_FRACTION_BITS;
    let fraction = (turn & ((1 << SINE_FRACTION_BITS) - 1)) as i32;
    lerp(table[index] as i32, table[index + 1] as i32, fraction, SINE_FRACTION_BITS) as i16
}

pub fn cos_i16(angle: i16) -> i16 {
    sin_i16(angle.wrapping_add(QUARTER_TURN))
}

/// `(sin, cos)` of `angle`.
pub fn sin_cos(angle: i16) -> (i16, i16) {
    (sin_i16(angle), cos_i16(angle))
}

/// Arctangent of `small / large` for `small <= large`, `large > 0`.
fn atan_ratio(small: u64, large: u64) -> i32 {
    let table = atan_table();
    let ratio = ((small << RATIO_BITS) / large) as usize;
    let index = (ratio >> ATAN_FRACTION_BITS).min(ATAN_STEPS - 1);
    let fraction = (ratio - (index << ATAN_FRACTION_BITS)) as i32;
    lerp(table[index], table[index + 1], fraction, ATAN_FRACTION_BITS)
}

pub fn atan2_i32(y: i32, x: i32) -> i32 {
    let (ax, ay) = (x.unsigned_abs() as u64, y.unsigned_abs() as u64);
    if ax == 0 && ay == 0 {
        return 0;
    }

    let quarter = QUARTER_TURN as i32;
    let mut angle = if ay <= ax {
        atan_ratio(ay, ax)
    } else {
        quarter - atan_ratio(ax, ay)
    };
    if x < 0 {
        angle = 2 * quarter - angle;
    }
    if y < 0 {
        angle = -angle;
    }
    wrap_turn(angle)
}

pub fn atan2_i16(y: i16, x: i16) -> i16 {
    atan2_i32(y as i32, x as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_endpoints() {
        let sine = sine_table();
        assert_eq!(sine.len(), SINE_STEPS + 1);
        assert_eq!(sine[0], 0);
        assert_eq!(sine[SINE_STEPS / 4], AMPLITUDE);
        assert_eq!(sine[SINE_STEPS], 0);

        let atan = atan_table();
        assert_eq!(atan[0], 0);
        assert_eq!(atan[ATAN_STEPS], 8192);
    }

    #[test]
    fn test_interpolation_accuracy() {
        for angle in i16::MIN..=i16::MAX {
            let exact = AMPLITUDE as f64 * (angle as f64 * PI / 32768.0).sin();
            assert!((sin_i16(angle) as f64 - exact).abs() <= 1.1, "angle {}", angle);
        }
    }

    #[test]
    fn test_atan2_octants() {
        // atan2(1000, 1732) is 5461.47 units
        assert_eq!(atan2_i32(1000, 1732), 5462);
        assert_eq!(atan2_i32(1732, 1000), 10922);
        assert_eq!(atan2_i32(1732, -1000), 21846);
        assert_eq!(atan2_i32(-1000, -1732), -27306);
        assert_eq!(atan2_i32(i32::MIN, i32::MIN), -24576);
    }
}
