//! Kuramoto-coupled LFO groups.
//!
//! Each member follows
//!
//! ```text
//! dθᵢ/dt = ωᵢ + (K/N) Σⱼ sin(θⱼ - θᵢ)
//! ```
//!
//! with the coupling term scaled by the member's own increment, so `K = 1`
//! can shift the instantaneous frequency by at most ±100% of its natural
//! rate and `K = 0.1` by ±10%. At `K = 0` every member behaves exactly like
//! a standalone [`PhaseOscillator`].
//!
//! Usage contract: within one sample, step every member once (see
//! [`CoupledGroup::step_all`]) before any of them is stepped for the next
//! sample, otherwise the coupling sums mix phases from different instants.

use arrayvec::ArrayVec;

use crate::dsp::oscillators::lfo::{PhaseOscillator, Waveform};
use crate::dsp::trig::{phase_cos, phase_sin};
use crate::dsp::utils::turns_to_phase;
use crate::error::{EngineError, EngineResult};
use crate::types::GroupConfig;

/// Largest number of oscillators one group can hold.
pub const MAX_COUPLED_OSCILLATORS: usize = 8;

/// Fixed-capacity, fully connected group of phase oscillators.
#[derive(Debug, Default, Clone)]
pub struct CoupledGroup {
    oscillators: ArrayVec<PhaseOscillator, MAX_COUPLED_OSCILLATORS>,
    coupling: f32,
}

impl CoupledGroup {
    /// Empty group with the given coupling strength.
    pub fn new(coupling: f32) -> Self {
        Self {
            oscillators: ArrayVec::new(),
            coupling,
        }
    }

    /// Group of zero-phase oscillators at the given natural frequencies.
    pub fn with_frequencies(
        frequencies: &[f32],
        coupling: f32,
        sample_rate: f32,
    ) -> EngineResult<Self> {
        let mut group = Self::new(coupling);
        for &freq in frequencies {
            group.push(PhaseOscillator::with_frequency(freq, sample_rate))?;
        }
        Ok(group)
    }

    /// Build a group from a validated preset.
    pub fn from_config(config: &GroupConfig) -> EngineResult<Self> {
        config.validate()?;

        let mut group = Self::new(config.coupling);
        for osc in &config.oscillators {
            let mut lfo = PhaseOscillator::with_frequency(osc.frequency, config.sample_rate);
            lfo.set_phase(turns_to_phase(osc.phase));
            group.push(lfo)?;
        }

        tracing::debug!(
            count = group.len(),
            coupling = group.coupling,
            sample_rate = config.sample_rate,
            "configured coupled group"
        );
        Ok(group)
    }

    /// Append an oscillator, returning its index.
    pub fn push(&mut self, oscillator: PhaseOscillator) -> EngineResult<usize> {
        self.oscillators
            .try_push(oscillator)
            .map_err(|_| EngineError::group_full())?;
        Ok(self.oscillators.len() - 1)
    }

    /// Number of active oscillators.
    #[inline]
    pub fn len(&self) -> usize {
        self.oscillators.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.oscillators.is_empty()
    }

    #[inline]
    pub fn coupling(&self) -> f32 {
        self.coupling
    }

    pub fn set_coupling(&mut self, coupling: f32) {
        self.coupling = coupling;
    }

    pub fn oscillators(&self) -> &[PhaseOscillator] {
        &self.oscillators
    }

    /// Panics if `index` is not an active slot.
    pub fn oscillator(&self, index: usize) -> &PhaseOscillator {
        self.check_index(index);
        &self.oscillators[index]
    }

    /// Panics if `index` is not an active slot.
    pub fn oscillator_mut(&mut self, index: usize) -> &mut PhaseOscillator {
        self.check_index(index);
        &mut self.oscillators[index]
    }

    /// Change one member's natural frequency, keeping its phase.
    pub fn retune(&mut self, index: usize, frequency_hz: f32, sample_rate: f32) {
        self.oscillator_mut(index)
            .set_frequency(frequency_hz, sample_rate);
    }

    /// Step the oscillator at `index` by one sample and read it out.
    ///
    /// With zero coupling or fewer than two members this is exactly
    /// [`PhaseOscillator::step`]. Otherwise the phase is first pulled by
    /// `round(K * Σⱼ sin(θⱼ - θᵢ) / N * incrementᵢ)` and then advanced
    /// as usual.
    ///
    /// # Panics
    ///
    /// If `index >= self.len()`.
    #[inline]
    pub fn coupled_step(&mut self, index: usize, waveform: Waveform) -> f32 {
        self.check_index(index);
        let count = self.oscillators.len();

        if self.coupling != 0.0 && count > 1 {
            let own = self.oscillators[index].phase();
            let mut sum = 0.0f32;
            for (j, other) in self.oscillators.iter().enumerate() {
                if j == index {
                    continue;
                }
                sum += phase_sin(other.phase().wrapping_sub(own));
            }
            let adjustment = self.coupling * sum / count as f32;
            let lfo = &mut self.oscillators[index];
            // may exceed i32 for large K; wraps modulo 2^32 like the phase
            let nudge = (adjustment * lfo.increment() as f32).round() as i64;
            lfo.nudge(nudge as u32);
        }

        self.oscillators[index].step(waveform)
    }

    /// Step every member once, in index order, writing readouts into `out`.
    ///
    /// Only the first `min(out.len(), self.len())` readouts are stored; every
    /// member is stepped regardless.
    pub fn step_all(&mut self, waveform: Waveform, out: &mut [f32]) {
        for index in 0..self.oscillators.len() {
            let value = self.coupled_step(index, waveform);
            if let Some(slot) = out.get_mut(index) {
                *slot = value;
            }
        }
    }

    /// Mean of the members' unit phase vectors as `(cos, sin)`.
    ///
    /// Returns `(0, 0)` for an empty group.
    pub fn mean_field(&self) -> (f32, f32) {
        if self.oscillators.is_empty() {
            return (0.0, 0.0);
        }

        let (mut cs, mut sn) = (0.0f32, 0.0f32);
        for lfo in &self.oscillators {
            cs += phase_cos(lfo.phase());
            sn += phase_sin(lfo.phase());
        }
        let n = self.oscillators.len() as f32;
        (cs / n, sn / n)
    }

    /// Kuramoto order parameter `r = |(1/N) Σⱼ e^(iθⱼ)|` in `[0, 1]`.
    ///
    /// `r → 1` when every member is in phase and `r → 0` when the phases are
    /// spread evenly. An empty group reports exactly zero. Pure read; safe
    /// to poll at any cadence.
    pub fn order_parameter(&self) -> f32 {
        if self.oscillators.is_empty() {
            return 0.0;
        }
        let (cs, sn) = self.mean_field();
        (cs * cs + sn * sn).sqrt().min(1.0)
    }

    #[inline(always)]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.oscillators.len(),
            "oscillator index {index} out of range for group of {}",
            self.oscillators.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::consts::QUARTER_TURN;

    const SAMPLE_RATE: f32 = 48000.0;

    #[test]
    fn push_stops_at_capacity() {
        let mut group = CoupledGroup::new(0.5);
        for i in 0..MAX_COUPLED_OSCILLATORS {
            assert_eq!(group.push(PhaseOscillator::new()).unwrap(), i);
        }
        assert!(matches!(
            group.push(PhaseOscillator::new()),
            Err(EngineError::GroupFull { .. })
        ));
        assert_eq!(group.len(), MAX_COUPLED_OSCILLATORS);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn stepping_inactive_slot_panics() {
        let mut group = CoupledGroup::with_frequencies(&[1.0, 2.0], 0.3, SAMPLE_RATE).unwrap();
        group.coupled_step(2, Waveform::Sine);
    }

    #[test]
    fn coupling_pulls_toward_leader() {
        // Oscillator 1 sits a quarter turn ahead; oscillator 0 should get an
        // extra push forward on top of its own increment.
        let mut group = CoupledGroup::with_frequencies(&[2.0, 2.0], 0.5, SAMPLE_RATE).unwrap();
        group.oscillator_mut(1).set_phase(QUARTER_TURN);
        let inc = group.oscillator(0).increment();

        group.coupled_step(0, Waveform::Sine);

        // adjustment = 0.5 * sin(90°) / 2 = 0.25
        let expected = inc + (0.25 * inc as f32).round() as u32;
        assert_eq!(group.oscillator(0).phase(), expected);
    }

    #[test]
    fn negative_coupling_pushes_apart() {
        let mut group = CoupledGroup::with_frequencies(&[2.0, 2.0], -0.5, SAMPLE_RATE).unwrap();
        group.oscillator_mut(1).set_phase(QUARTER_TURN);
        let inc = group.oscillator(0).increment();

        group.coupled_step(0, Waveform::Sine);
        assert!(group.oscillator(0).phase() < inc);
    }

    #[test]
    fn single_member_ignores_coupling() {
        let mut group = CoupledGroup::with_frequencies(&[3.0], 1.0, SAMPLE_RATE).unwrap();
        let mut solo = PhaseOscillator::with_frequency(3.0, SAMPLE_RATE);
        for _ in 0..1000 {
            assert_eq!(group.coupled_step(0, Waveform::Triangle), solo.step(Waveform::Triangle));
        }
    }

    #[test]
    fn step_all_writes_each_readout() {
        let mut group =
            CoupledGroup::with_frequencies(&[1.0, 2.0, 3.0], 0.0, SAMPLE_RATE).unwrap();
        let mut out = [f32::NAN; 2];
        group.step_all(Waveform::Sawtooth, &mut out);
        assert!(out.iter().all(|v| v.is_finite()));
        // the third member still advanced
        assert_eq!(group.oscillator(2).phase(), group.oscillator(2).increment());
    }

    #[test]
    fn order_parameter_of_opposed_pair_is_zero() {
        let mut group = CoupledGroup::with_frequencies(&[1.0, 1.0], 0.0, SAMPLE_RATE).unwrap();
        group.oscillator_mut(1).set_phase(1 << 31);
        assert!(group.order_parameter() < 1e-6);
    }

    #[test]
    fn order_parameter_does_not_mutate() {
        let group = CoupledGroup::with_frequencies(&[1.0, 1.3], 0.4, SAMPLE_RATE).unwrap();
        let before: Vec<_> = group.oscillators().to_vec();
        let _ = group.order_parameter();
        let _ = group.mean_field();
        assert_eq!(group.oscillators(), &before[..]);
    }

    #[test]
    fn from_config_applies_initial_phase() {
        let mut config = GroupConfig::from_frequencies(&[2.0, 2.0], 0.3);
        config.oscillators[1].phase = 0.25;
        let group = CoupledGroup::from_config(&config).unwrap();
        assert_eq!(group.oscillator(1).phase(), QUARTER_TURN);
        assert_eq!(group.coupling(), 0.3);
    }

    #[test]
    fn large_nudge_wraps_modulo_full_turn() {
        // K * S / N = 3 * 1 / 2 = 1.5, so the nudge is 1.5 * 0x7000_0000,
        // which does not fit in an i32.
        let mut group = CoupledGroup::new(3.0);
        let mut lead = PhaseOscillator::new();
        lead.set_increment(0x7000_0000);
        group.push(lead).unwrap();
        let mut partner = PhaseOscillator::new();
        partner.set_phase(QUARTER_TURN);
        group.push(partner).unwrap();

        group.coupled_step(0, Waveform::Sine);

        let expected = ((0x7000_0000u64 * 3 / 2 + 0x7000_0000) % (1u64 << 32)) as u32;
        assert_eq!(group.oscillator(0).phase(), expected);
        assert_eq!(expected, 402_653_184);
    }

    #[test]
    fn retune_keeps_phase_and_reseeds_increment() {
        let mut group = CoupledGroup::with_frequencies(&[1.0, 2.0], 0.3, SAMPLE_RATE).unwrap();
        let mut out = [0.0f32; 2];
        for _ in 0..100 {
            group.step_all(Waveform::Sine, &mut out);
        }
        let phase = group.oscillator(1).phase();

        group.retune(1, 5.0, SAMPLE_RATE);

        assert_eq!(group.oscillator(1).phase(), phase);
        // round(5 / 48000 * 2^32) = round(447392.43)
        assert_eq!(group.oscillator(1).increment(), 447_392);
        assert_eq!(group.oscillator(0).increment(), 89_478);
    }

    #[test]
    fn zeroing_coupling_restores_standalone_stepping() {
        let mut group =
            CoupledGroup::with_frequencies(&[1.0, 1.3, 2.1], 0.5, SAMPLE_RATE).unwrap();
        let mut out = [0.0f32; 3];
        for _ in 0..1000 {
            group.step_all(Waveform::Sine, &mut out);
        }

        group.set_coupling(0.0);
        let mut solo: Vec<PhaseOscillator> = group.oscillators().to_vec();
        for _ in 0..1000 {
            for (i, lfo) in solo.iter_mut().enumerate() {
                let expected = lfo.step(Waveform::Triangle);
                assert_eq!(group.coupled_step(i, Waveform::Triangle), expected);
                assert_eq!(group.oscillator(i).phase(), lfo.phase());
            }
        }
    }

    #[test]
    fn changing_coupling_mid_run_changes_dynamics() {
        let mut config = GroupConfig::from_frequencies(&[1.0, 1.0], 0.3);
        config.oscillators[1].phase = 0.25;
        let mut weak = CoupledGroup::from_config(&config).unwrap();
        let mut strong = weak.clone();
        let mut out = [0.0f32; 2];

        for _ in 0..1000 {
            weak.step_all(Waveform::Sine, &mut out);
            strong.step_all(Waveform::Sine, &mut out);
        }
        assert_eq!(weak.oscillators(), strong.oscillators());

        strong.set_coupling(1.0);
        for _ in 0..4800 {
            weak.step_all(Waveform::Sine, &mut out);
            strong.step_all(Waveform::Sine, &mut out);
        }
        assert_ne!(weak.oscillators(), strong.oscillators());
        assert!(
            strong.order_parameter() > weak.order_parameter(),
            "strong r = {}, weak r = {}",
            strong.order_parameter(),
            weak.order_parameter()
        );
    }
}
