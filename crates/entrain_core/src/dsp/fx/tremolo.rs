//! Amplitude modulation from a single free-running LFO.

use crate::dsp::oscillators::lfo::{PhaseOscillator, Waveform};
use crate::dsp::utils::linear;
use crate::types::Pots;

/// Classic amp tremolo.
///
/// - pot 0: rate, 0.5 to 15 Hz
/// - pot 1: depth, 0 to 1
/// - pot 2: waveform, below 0.5 is sine, otherwise triangle
#[derive(Debug, Clone)]
pub struct Tremolo {
    lfo: PhaseOscillator,
    rate: f32,
    depth: f32,
    wave: Waveform,
}

impl Tremolo {
    pub fn new(pots: &Pots, sample_rate: f32) -> Self {
        let rate = linear(pots[0], 0.5, 15.0);
        Self {
            lfo: PhaseOscillator::with_frequency(rate, sample_rate),
            rate,
            depth: pots[1],
            wave: if pots[2] < 0.5 {
                Waveform::Sine
            } else {
                Waveform::Triangle
            },
        }
    }

    pub fn describe(&self) -> String {
        format!("rate={} Hz depth={} wave={}", self.rate, self.depth, self.wave)
    }

    /// Gain runs from 1 at the LFO peak down to `1 - depth` at the trough.
    #[inline]
    pub fn step(&mut self, input: f32) -> f32 {
        let lfo = self.lfo.step(self.wave);
        let gain = 1.0 - self.depth * (1.0 - lfo) * 0.5;
        input * gain
    }
}
