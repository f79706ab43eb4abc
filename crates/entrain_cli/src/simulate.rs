//! Offline run of a coupled group, sampling the order parameter over time.

use chrono::{DateTime, Utc};
use entrain_core::dsp::consts::TWO_POW_32;
use entrain_core::{CoupledGroup, EngineResult, GroupConfig, MAX_COUPLED_OSCILLATORS, Waveform};
use serde::Serialize;

/// Order parameter at one point in simulated time.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub seconds: f64,
    pub order_parameter: f32,
}

/// Natural versus observed rate of one member over the whole run.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OscillatorSummary {
    pub natural_hz: f32,
    pub effective_hz: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub config: GroupConfig,
    pub waveform: Waveform,
    pub seconds: f64,
    pub trajectory: Vec<TrajectoryPoint>,
    pub oscillators: Vec<OscillatorSummary>,
}

impl SimulationReport {
    pub fn final_order_parameter(&self) -> Option<f32> {
        self.trajectory.last().map(|p| p.order_parameter)
    }
}

/// Step `config` for `seconds`, recording `r` every `interval` seconds
/// (and once before the first sample).
pub fn simulate(
    config: &GroupConfig,
    seconds: f64,
    interval: f64,
    waveform: Waveform,
) -> EngineResult<SimulationReport> {
    let mut group = CoupledGroup::from_config(config)?;
    let sample_rate = config.sample_rate as f64;
    let total_samples = (seconds * sample_rate).round() as u64;
    let report_every = ((interval * sample_rate).round() as u64).max(1);

    tracing::info!(
        oscillators = group.len(),
        coupling = group.coupling(),
        total_samples,
        "simulating"
    );

    let mut trajectory = vec![TrajectoryPoint {
        seconds: 0.0,
        order_parameter: group.order_parameter(),
    }];
    let mut advanced = [0.0f64; MAX_COUPLED_OSCILLATORS];

    for n in 1..=total_samples {
        for j in 0..group.len() {
            let before = group.oscillator(j).phase();
            group.coupled_step(j, waveform);
            // signed circular step: repulsive coupling can move a phase backwards
            advanced[j] += group.oscillator(j).phase().wrapping_sub(before) as i32 as f64;
        }
        if n % report_every == 0 || n == total_samples {
            trajectory.push(TrajectoryPoint {
                seconds: n as f64 / sample_rate,
                order_parameter: group.order_parameter(),
            });
        }
    }

    let elapsed = total_samples as f64 / sample_rate;
    let oscillators = config
        .oscillators
        .iter()
        .zip(advanced.iter())
        .map(|(osc, &turns_raw)| OscillatorSummary {
            natural_hz: osc.frequency,
            effective_hz: if elapsed > 0.0 {
                turns_raw / TWO_POW_32 / elapsed
            } else {
                0.0
            },
        })
        .collect();

    Ok(SimulationReport {
        generated_at: Utc::now(),
        config: config.clone(),
        waveform,
        seconds: elapsed,
        trajectory,
        oscillators,
    })
}
