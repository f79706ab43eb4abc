//! Fixed-size ring buffer with fractional-delay reads.

/// Delay line holding the last `N` samples. `N` must be a power of two.
#[derive(Debug, Clone)]
pub struct DelayLine<const N: usize> {
    buffer: [f32; N],
    write_pos: usize,
}

impl<const N: usize> Default for DelayLine<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DelayLine<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "delay line length must be a power of two");
        N - 1
    };

    pub const fn new() -> Self {
        Self {
            buffer: [0.0; N],
            write_pos: 0,
        }
    }

    /// Maximum usable delay in samples.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Write a sample and advance the write head.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) & Self::MASK;
    }

    /// Read `delay` samples behind the most recent write, interpolating
    /// linearly between neighbours. The delay is clamped to `[1, N - 1]`.
    #[inline]
    pub fn read(&self, delay: f32) -> f32 {
        let delay = delay.clamp(1.0, (N - 1) as f32);
        let whole = delay as usize;
        let frac = delay - whole as f32;

        let newer = self.buffer[(self.write_pos + N - whole) & Self::MASK];
        let older = self.buffer[(self.write_pos + N - whole - 1) & Self::MASK];
        newer + (older - newer) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_delay_returns_past_sample() {
        let mut line = DelayLine::<8>::new();
        for i in 1..=5 {
            line.write(i as f32);
        }
        assert_eq!(line.read(1.0), 5.0);
        assert_eq!(line.read(3.0), 3.0);
    }

    #[test]
    fn fractional_delay_interpolates() {
        let mut line = DelayLine::<8>::new();
        line.write(0.0);
        line.write(1.0);
        assert!((line.read(1.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn delay_is_clamped() {
        let mut line = DelayLine::<4>::new();
        for i in 0..10 {
            line.write(i as f32);
        }
        assert_eq!(line.read(0.0), 9.0);
        assert_eq!(line.read(100.0), line.read(3.0));
    }
}
