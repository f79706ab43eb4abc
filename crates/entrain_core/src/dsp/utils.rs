use crate::dsp::consts::TWO_POW_32;

/// Map a normalized knob position onto `[lo, hi]`.
#[inline]
pub fn linear(pot: f32, lo: f32, hi: f32) -> f32 {
    lo + pot * (hi - lo)
}

/// Fraction of a turn represented by a raw phase, in `[0, 1)`.
///
/// Only the top 24 bits are kept so the result is exactly representable
/// and can never round up to 1.0.
#[inline(always)]
pub fn u32_to_fraction(phase: u32) -> f32 {
    (phase >> 8) as f32 * (1.0 / 16_777_216.0)
}

/// Per-sample phase increment for a frequency: `round(f / fs * 2^32)`.
///
/// Saturates to `[0, u32::MAX]`; callers are expected to keep `f` between
/// zero and Nyquist.
pub fn frequency_to_increment(frequency_hz: f32, sample_rate: f32) -> u32 {
    let increment = (frequency_hz as f64 / sample_rate as f64 * TWO_POW_32).round();
    increment.clamp(0.0, u32::MAX as f64) as u32
}

/// Inverse of [`frequency_to_increment`].
pub fn increment_to_frequency(increment: u32, sample_rate: f32) -> f32 {
    (increment as f64 / TWO_POW_32 * sample_rate as f64) as f32
}

/// Raw phase for a position expressed in turns. Whole turns are discarded.
pub fn turns_to_phase(turns: f32) -> u32 {
    let frac = (turns as f64).rem_euclid(1.0);
    (frac * TWO_POW_32) as u64 as u32
}
