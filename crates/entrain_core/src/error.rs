//! Configuration-time errors.
//!
//! Nothing on the per-sample path returns an error; these only surface while
//! a group or effect is being built from user input.

use thiserror::Error;

use crate::dsp::oscillators::coupled::MAX_COUPLED_OSCILLATORS;

/// Errors that can occur while configuring the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Adding another oscillator would exceed the fixed group capacity.
    #[error("Group is full: capacity is {capacity} oscillators")]
    GroupFull { capacity: usize },

    /// Sample rate must be finite and positive.
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    /// Coupling must be finite.
    #[error("Invalid coupling strength: {0}")]
    InvalidCoupling(f32),

    /// Frequency must be finite and within `[0, nyquist]`.
    #[error("Invalid frequency for oscillator {index}: {frequency} Hz (nyquist is {nyquist} Hz)")]
    InvalidFrequency {
        index: usize,
        frequency: f32,
        nyquist: f32,
    },

    /// Initial phase must be finite.
    #[error("Invalid phase for oscillator {index}: {phase}")]
    InvalidPhase { index: usize, phase: f32 },

    /// No effect is registered under this name.
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    /// JSON configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl EngineError {
    pub fn group_full() -> Self {
        Self::GroupFull {
            capacity: MAX_COUPLED_OSCILLATORS,
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
