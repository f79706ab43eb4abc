//! Phase-accumulator LFO.
//!
//! The phase is a wrapping `u32` where the full range maps onto one turn.
//! Because the arithmetic is modulo 2^32, subtracting two phases yields the
//! shortest signed circular distance once reinterpreted as `i32`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dsp::trig::phase_sin;
use crate::dsp::utils::{frequency_to_increment, increment_to_frequency, u32_to_fraction};

/// Readout shape of an oscillator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    /// Table sine in `[-1, 1]`.
    #[default]
    Sine,
    /// Triangle in phase with the sine, in `[-1, 1]`.
    Triangle,
    /// Rising ramp over one period, in `[0, 1)`.
    Sawtooth,
}

impl Waveform {
    pub const ALL: [Waveform; 3] = [Waveform::Sine, Waveform::Triangle, Waveform::Sawtooth];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
        }
    }
}

impl std::fmt::Display for Waveform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Waveform::Sine),
            "triangle" | "tri" => Ok(Waveform::Triangle),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            other => Err(format!("unknown waveform '{other}' (expected sine, triangle or sawtooth)")),
        }
    }
}

/// A single wrapping phase counter and its per-sample increment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhaseOscillator {
    phase: u32,
    increment: u32,
}

impl PhaseOscillator {
    /// Zero phase, zero frequency.
    pub const fn new() -> Self {
        Self {
            phase: 0,
            increment: 0,
        }
    }

    pub fn with_frequency(frequency_hz: f32, sample_rate: f32) -> Self {
        let mut osc = Self::new();
        osc.set_frequency(frequency_hz, sample_rate);
        osc
    }

    /// Re-seed the increment for a new target frequency. The phase is kept.
    pub fn set_frequency(&mut self, frequency_hz: f32, sample_rate: f32) {
        self.increment = frequency_to_increment(frequency_hz, sample_rate);
    }

    pub fn frequency(&self, sample_rate: f32) -> f32 {
        increment_to_frequency(self.increment, sample_rate)
    }

    #[inline]
    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn set_phase(&mut self, phase: u32) {
        self.phase = phase;
    }

    #[inline]
    pub fn increment(&self) -> u32 {
        self.increment
    }

    pub fn set_increment(&mut self, increment: u32) {
        self.increment = increment;
    }

    /// Move the phase by one sample.
    #[inline(always)]
    pub fn advance(&mut self) {
        self.phase = self.phase.wrapping_add(self.increment);
    }

    /// Shift the phase by a two's-complement amount modulo 2^32 without
    /// touching the increment.
    #[inline(always)]
    pub(crate) fn nudge(&mut self, delta: u32) {
        self.phase = self.phase.wrapping_add(delta);
    }

    /// Sample the waveform at the current phase.
    #[inline]
    pub fn readout(&self, waveform: Waveform) -> f32 {
        match waveform {
            Waveform::Sine => phase_sin(self.phase),
            Waveform::Triangle => triangle(self.phase),
            Waveform::Sawtooth => u32_to_fraction(self.phase),
        }
    }

    /// Advance one sample and read the new position.
    #[inline]
    pub fn step(&mut self, waveform: Waveform) -> f32 {
        self.advance();
        self.readout(waveform)
    }
}

/// Triangle that starts at zero and peaks a quarter turn later, like the sine.
#[inline(always)]
fn triangle(phase: u32) -> f32 {
    let ramp = u32_to_fraction(phase) * 4.0;
    if ramp < 1.0 {
        ramp
    } else if ramp < 3.0 {
        2.0 - ramp
    } else {
        ramp - 4.0
    }
}
