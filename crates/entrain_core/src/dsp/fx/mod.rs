//! Effects that consume LFO output.
//!
//! The set is closed, so dispatch is a plain enum rather than a trait object.

pub mod entrained;
pub mod tremolo;

use crate::error::{EngineError, EngineResult};
use crate::types::Pots;

pub use entrained::Entrained;
pub use tremolo::Tremolo;

/// One of the built-in effects, selected by name.
pub enum Effect {
    Entrained(Box<Entrained>),
    Tremolo(Tremolo),
}

impl Effect {
    /// Every selectable effect name.
    pub const NAMES: [&'static str; 2] = ["entrained", "tremolo"];

    /// Build an effect by name from four knob positions.
    pub fn new(name: &str, pots: &Pots, sample_rate: f32) -> EngineResult<Self> {
        let effect = match name {
            "entrained" => Effect::Entrained(Box::new(Entrained::new(pots, sample_rate)?)),
            "tremolo" => Effect::Tremolo(Tremolo::new(pots, sample_rate)),
            other => return Err(EngineError::UnknownEffect(other.to_string())),
        };
        tracing::info!(effect = effect.name(), "{}", effect.describe());
        Ok(effect)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Effect::Entrained(_) => "entrained",
            Effect::Tremolo(_) => "tremolo",
        }
    }

    /// One-line summary of the mapped parameters.
    pub fn describe(&self) -> String {
        match self {
            Effect::Entrained(fx) => fx.describe(),
            Effect::Tremolo(fx) => fx.describe(),
        }
    }

    #[inline]
    pub fn step(&mut self, input: f32) -> f32 {
        match self {
            Effect::Entrained(fx) => fx.step(input),
            Effect::Tremolo(fx) => fx.step(input),
        }
    }

    /// Run the effect over a buffer in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        profiling::scope!("effect_block");
        for sample in buffer.iter_mut() {
            *sample = self.step(*sample);
        }
    }

    /// Order parameter of the effect's coupled group, if it has one.
    pub fn order_parameter(&self) -> Option<f32> {
        match self {
            Effect::Entrained(fx) => Some(fx.order_parameter()),
            Effect::Tremolo(_) => None,
        }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({}: {})", self.name(), self.describe())
    }
}
