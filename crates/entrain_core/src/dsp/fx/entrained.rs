//! Multi-voice chorus whose modulation sources are Kuramoto-coupled.
//!
//! At `K = 0` the voices drift independently and the result is an ordinary
//! shimmery chorus. As `K` rises the LFOs entrain and the modulation turns
//! coherent and pulsing.

use crate::dsp::delay::DelayLine;
use crate::dsp::oscillators::coupled::CoupledGroup;
use crate::dsp::oscillators::lfo::{PhaseOscillator, Waveform};
use crate::dsp::utils::linear;
use crate::error::{EngineError, EngineResult};
use crate::types::Pots;

pub const ENTRAINED_VOICES: usize = 3;

/// Centre delay of every voice.
pub const ENTRAINED_DELAY_MS: f32 = 15.0;

/// Voices are spread by this fraction of the base rate.
const VOICE_DETUNE: f32 = 0.15;

/// Holds the deepest sweep (`1.5 ×` the centre delay) up to 192 kHz.
const DELAY_LENGTH: usize = 8192;

/// Entrained chorus.
///
/// - pot 0: coupling K (0 = free chorus, 1 = locked unison)
/// - pot 1: base rate, 0.2 to 5 Hz
/// - pot 2: depth, 0 to 1
/// - pot 3: mix (0 = dry, 1 = wet)
#[derive(Debug, Clone)]
pub struct Entrained {
    group: CoupledGroup,
    delay: DelayLine<DELAY_LENGTH>,
    rate: f32,
    delay_base: f32,
    depth: f32,
    mix: f32,
}

impl Entrained {
    /// Fails with [`EngineError::InvalidSampleRate`] if the sample rate is
    /// not positive or the deepest sweep would not fit in the delay line.
    pub fn new(pots: &Pots, sample_rate: f32) -> EngineResult<Self> {
        let delay: DelayLine<DELAY_LENGTH> = DelayLine::new();
        let delay_base = ENTRAINED_DELAY_MS * sample_rate / 1000.0;
        if !(delay_base > 0.0 && delay_base * 1.5 <= delay.capacity() as f32) {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }

        let rate = linear(pots[1], 0.2, 5.0);

        let mut group = CoupledGroup::new(pots[0]);
        for i in 0..ENTRAINED_VOICES {
            let detune = 1.0 + (i as f32 - (ENTRAINED_VOICES / 2) as f32) * VOICE_DETUNE;
            group.push(PhaseOscillator::with_frequency(rate * detune, sample_rate))?;
        }

        let effect = Self {
            group,
            delay,
            rate,
            delay_base,
            depth: pots[2],
            mix: pots[3],
        };
        tracing::debug!(
            coupling = pots[0],
            rate,
            delay_base = effect.delay_base,
            "entrained chorus initialised"
        );
        Ok(effect)
    }

    pub fn describe(&self) -> String {
        format!(
            "K={} rate={} Hz depth={} mix={}",
            self.group.coupling(),
            self.rate,
            self.depth,
            self.mix
        )
    }

    pub fn group(&self) -> &CoupledGroup {
        &self.group
    }

    /// Synchronization of the voice LFOs, for metering.
    pub fn order_parameter(&self) -> f32 {
        self.group.order_parameter()
    }

    #[inline]
    pub fn step(&mut self, input: f32) -> f32 {
        let mut wet = 0.0;
        for voice in 0..ENTRAINED_VOICES {
            let lfo = self.group.coupled_step(voice, Waveform::Sine);
            let d = (self.delay_base * (1.0 + lfo * self.depth * 0.5)).max(1.0);
            wet += self.delay.read(d);
        }
        wet /= ENTRAINED_VOICES as f32;

        self.delay.write(input);

        input * (1.0 - self.mix) + wet * self.mix
    }
}
