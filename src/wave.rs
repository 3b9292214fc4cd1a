//! This is the namespace for all parts dealing with data in sampled waves.

use crate::synth::Tone;
use crate::util::seconds_to_samples;

/// A mono audio signal assembled from consecutive tones and rests.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Number of samples per second.
    sample_rate: u32,
    samples: Vec<f64>,
}

impl Signal {
    pub fn new(sample_rate: u32) -> Self {
        Signal {
            sample_rate,
            samples: Vec::new(),
        }
    }

    pub fn from_samples(sample_rate: u32, samples: Vec<f64>) -> Self {
        Signal {
            sample_rate,
            samples,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length of the signal in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Append a tone at the end of the signal.
    pub fn push_tone(&mut self, tone: Tone) {
        self.samples.extend(tone.into_samples());
    }

    /// Append silence lasting `seconds`, rounded down to whole samples.
    /// Returns the number of samples added.
    ///
    /// # Examples
    ///
    /// ```
    /// use emotune::wave::Signal;
    ///
    /// let mut signal = Signal::new(44100);
    /// assert_eq!(signal.push_silence(0.05), 2205);
    /// assert!(signal.samples().iter().all(|&s| s == 0.0));
    /// ```
    pub fn push_silence(&mut self, seconds: f64) -> usize {
        let count = seconds_to_samples(seconds, self.sample_rate);
        self.samples.resize(self.samples.len() + count, 0.0);
        count
    }
}
