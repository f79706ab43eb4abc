//! Coupled LFO engine
//!
//! Low-frequency oscillators for modulating audio effects, grouped so that
//! they can partially or fully phase-lock under the Kuramoto model. This is
//! a pure library with no I/O; hosts own the audio callback and buffers.
//!
//! Everything reachable from the per-sample path is fixed-size, allocation
//! free and infallible. Errors only arise while building groups and effects
//! from configuration.

pub mod dsp;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use dsp::consts::DEFAULT_SAMPLE_RATE;
pub use dsp::fx::Effect;
pub use dsp::oscillators::{CoupledGroup, MAX_COUPLED_OSCILLATORS, PhaseOscillator, Waveform};
pub use dsp::trig::{phase_cos, phase_sin};
pub use error::{EngineError, EngineResult};
pub use types::{GroupConfig, OscillatorConfig, Pots};
