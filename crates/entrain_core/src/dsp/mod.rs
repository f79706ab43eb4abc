//! DSP building blocks: the phase-accumulator LFO, its lookup-table
//! trigonometry, Kuramoto-coupled groups and the effects built on them.

pub mod consts;
pub mod delay;
pub mod fx;
pub mod oscillators;
pub mod trig;
pub mod utils;
