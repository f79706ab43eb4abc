//! Table-driven sine and cosine of a raw `u32` phase.
//!
//! Only the first quadrant of the sine is stored. The top two bits of the
//! phase pick the quadrant: odd quadrants read the table backwards and the
//! second half of the turn negates the result. The remaining bits index the
//! table and the bits below the index drive linear interpolation.
//!
//! Worst-case absolute error against `f64::sin` is a few parts in 10^6,
//! well inside the 1e-4 the oscillator engine promises.

use crate::dsp::consts::{LUT_QUARTER_SINE, QUARTER_SINE_STEP_SHIFT, QUARTER_TURN};
use crate::dsp::utils::u32_to_fraction;

/// `sin(phase / 2^32 * 2pi)` without calling a transcendental function.
#[inline]
pub fn phase_sin(phase: u32) -> f32 {
    let quarter = phase >> 30;
    let mut within = phase << 2;

    if quarter & 1 != 0 {
        within = !within;
    }

    let idx = (within >> (32 - QUARTER_SINE_STEP_SHIFT)) as usize;
    let a = LUT_QUARTER_SINE[idx];
    let b = LUT_QUARTER_SINE[idx + 1];

    let frac = u32_to_fraction(within << QUARTER_SINE_STEP_SHIFT);
    let val = a + (b - a) * frac;

    if quarter & 2 != 0 { -val } else { val }
}

/// `cos(phase)` as `sin(phase + quarter turn)`.
#[inline]
pub fn phase_cos(phase: u32) -> f32 {
    phase_sin(phase.wrapping_add(QUARTER_TURN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::consts::TWO_POW_32;
    use std::f64::consts::PI;

    fn exact_sin(phase: u32) -> f64 {
        (phase as f64 / TWO_POW_32 * 2.0 * PI).sin()
    }

    #[test]
    fn cardinal_points_are_exact() {
        assert_eq!(phase_sin(0), 0.0);
        assert_eq!(phase_sin(1 << 30), 1.0);
        assert_eq!(phase_sin(1 << 31), 0.0);
        assert_eq!(phase_sin(3 << 30), -1.0);
        assert_eq!(phase_cos(0), 1.0);
    }

    #[test]
    fn odd_symmetry() {
        for phase in [1u32, 12_345, 1 << 29, 0x9000_0000, u32::MAX - 7] {
            let pos = phase_sin(phase);
            let neg = phase_sin(phase.wrapping_neg());
            assert!((pos + neg).abs() < 1e-6, "sin(-x) != -sin(x) at {phase}: {pos} vs {neg}");
        }
    }

    #[test]
    fn quadrant_boundaries_are_continuous() {
        for quarter in 0..4u32 {
            let edge = quarter << 30;
            let before = phase_sin(edge.wrapping_sub(1));
            let after = phase_sin(edge);
            assert!(
                (before - after).abs() < 1e-5,
                "discontinuity at quadrant {quarter}: {before} -> {after}"
            );
        }
    }

    #[test]
    fn dense_sweep_error_bound() {
        let mut max_err = 0.0f64;
        let mut phase = 0u32;
        for _ in 0..65_536 {
            let err = (phase_sin(phase) as f64 - exact_sin(phase)).abs();
            max_err = max_err.max(err);
            phase = phase.wrapping_add(65_537);
        }
        assert!(max_err < 1e-5, "max error {max_err}");
    }
}
