use std::f64::consts::PI;

/// A sine oscillator sampled at a fixed sample rate.
///
/// The phase is derived from the sample index rather than accumulated,
/// so sample `i` is exactly `sin(2π · frequency · i / sample_rate)`.
#[derive(Debug, Clone)]
pub struct Oscillator {
    sample_rate: f64,
    frequency: f64,
    index: usize,
}

impl Oscillator {
    pub fn new(sample_rate: f64, frequency: f64) -> Self {
        Self {
            sample_rate,
            frequency,
            index: 0,
        }
    }

    /// Evaluate the wave at an arbitrary sample index.
    pub fn sample_at(&self, index: usize) -> f64 {
        (2.0 * PI * self.frequency * index as f64 / self.sample_rate).sin()
    }

    pub fn next_sample(&mut self) -> f64 {
        let sample = self.sample_at(self.index);
        self.index += 1;
        sample
    }
}

impl Iterator for Oscillator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_sample())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quarter_period() {
        // 1 Hz at 4 samples per second hits the peaks exactly
        let osc = Oscillator::new(4.0, 1.0);
        let samples: Vec<f64> = osc.take(4).collect();
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 1.0).abs() < 1e-12);
        assert!(samples[2].abs() < 1e-12);
        assert!((samples[3] + 1.0).abs() < 1e-12);
    }
}
