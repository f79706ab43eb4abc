//! Oscillator primitives.
//!
//! `lfo` is the single phase accumulator; `coupled` groups several of them
//! under Kuramoto coupling.

pub mod coupled;
pub mod lfo;

pub use coupled::{CoupledGroup, MAX_COUPLED_OSCILLATORS};
pub use lfo::{PhaseOscillator, Waveform};
