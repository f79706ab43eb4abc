//! Serializable configuration for oscillator groups and effects.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dsp::consts::DEFAULT_SAMPLE_RATE;
use crate::dsp::oscillators::coupled::MAX_COUPLED_OSCILLATORS;
use crate::error::{EngineError, EngineResult};

/// Four normalized knob positions, each nominally in `[0, 1]`.
pub type Pots = [f32; 4];

pub const DEFAULT_POTS: Pots = [0.5, 0.5, 0.5, 0.5];

/// One member of a coupled group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct OscillatorConfig {
    /// natural frequency in Hz
    pub frequency: f32,
    /// initial phase in turns (0.25 = a quarter turn ahead)
    pub phase: f32,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            phase: 0.0,
        }
    }
}

impl OscillatorConfig {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            ..Default::default()
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }
}

/// A coupled group as it appears in a JSON preset file.
///
/// ```json
/// { "sampleRate": 48000, "coupling": 0.3,
///   "oscillators": [{ "frequency": 2.0 }, { "frequency": 2.0, "phase": 0.25 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupConfig {
    /// host sample rate in Hz
    pub sample_rate: f32,
    /// Kuramoto coupling strength K (0 = independent)
    pub coupling: f32,
    /// at most eight oscillators
    pub oscillators: Vec<OscillatorConfig>,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            coupling: 0.0,
            oscillators: Vec::new(),
        }
    }
}

impl GroupConfig {
    pub fn from_frequencies(frequencies: &[f32], coupling: f32) -> Self {
        Self {
            coupling,
            oscillators: frequencies.iter().copied().map(OscillatorConfig::new).collect(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: GroupConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn nyquist(&self) -> f32 {
        self.sample_rate * 0.5
    }

    /// Check every field against the limits the engine relies on.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(EngineError::InvalidSampleRate(self.sample_rate));
        }
        if !self.coupling.is_finite() {
            return Err(EngineError::InvalidCoupling(self.coupling));
        }
        if self.oscillators.len() > MAX_COUPLED_OSCILLATORS {
            return Err(EngineError::group_full());
        }
        let nyquist = self.nyquist();
        for (index, osc) in self.oscillators.iter().enumerate() {
            if !osc.frequency.is_finite() || osc.frequency < 0.0 || osc.frequency > nyquist {
                return Err(EngineError::InvalidFrequency {
                    index,
                    frequency: osc.frequency,
                    nyquist,
                });
            }
            if !osc.phase.is_finite() {
                return Err(EngineError::InvalidPhase {
                    index,
                    phase: osc.phase,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: GroupConfig =
            serde_json::from_value(json!({ "oscillators": [{ "frequency": 2.0 }, {}] })).unwrap();
        assert_eq!(config.sample_rate, 48000.0);
        assert_eq!(config.coupling, 0.0);
        assert_eq!(config.oscillators[0], OscillatorConfig::new(2.0));
        assert_eq!(config.oscillators[1], OscillatorConfig::default());
    }

    #[test]
    fn test_camel_case_keys() {
        let config = GroupConfig::from_json(
            r#"{ "sampleRate": 44100, "coupling": 0.5, "oscillators": [{ "frequency": 1.0, "phase": 0.25 }] }"#,
        )
        .unwrap();
        assert_eq!(config.sample_rate, 44100.0);
        assert_eq!(config.oscillators[0].phase, 0.25);
    }

    #[test]
    fn test_rejects_too_many_oscillators() {
        let config = GroupConfig::from_frequencies(&[1.0; 9], 0.1);
        assert!(matches!(
            config.validate(),
            Err(EngineError::GroupFull { capacity: 8 })
        ));
    }

    #[test]
    fn test_rejects_bad_frequency() {
        let config = GroupConfig::from_frequencies(&[1.0, -2.0], 0.1);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidFrequency { index: 1, .. })
        ));

        let config = GroupConfig::from_frequencies(&[30000.0], 0.1);
        assert!(config.validate().is_err(), "above nyquist must be rejected");
    }

    #[test]
    fn test_rejects_bad_sample_rate_and_coupling() {
        let mut config = GroupConfig::from_frequencies(&[1.0], 0.1);
        config.sample_rate = 0.0;
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidSampleRate(_))
        ));

        let config = GroupConfig::from_frequencies(&[1.0], f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidCoupling(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GroupConfig::from_frequencies(&[1.0, 1.2, 0.8], 0.3);
        let text = config.to_json_pretty().unwrap();
        assert_eq!(GroupConfig::from_json(&text).unwrap(), config);
    }
}
