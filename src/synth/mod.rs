//! This namespace contains all the parts converting from note data to wave data.

pub mod envelope;
pub mod oscillator;
pub mod tuning;

use envelope::Fade;
use oscillator::Oscillator;

use crate::util::seconds_to_samples;

/// Sample rate used when nothing else is configured.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// The sampled waveform of a single note, envelope included.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tone {
    samples: Vec<f64>,
}

#[allow(clippy::len_without_is_empty)]
impl Tone {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

/// Turns frequencies into enveloped sine tones.
#[derive(Debug, Clone)]
pub struct SineSynth {
    /// Samples per second rate of the generated audio signal.
    pub sample_rate: u32,
    /// Fade applied to each tone.
    pub envelope: Fade,
}

impl SineSynth {
    pub fn new(sample_rate: u32) -> Self {
        SineSynth {
            sample_rate,
            envelope: Fade::default(),
        }
    }

    /// Synthesize a tone of the given frequency lasting `duration` seconds.
    ///
    /// The tone has `floor(duration * sample_rate)` samples;
    /// a zero or negative duration gives an empty tone.
    pub fn tone(&self, frequency: f64, duration: f64) -> Tone {
        let count = seconds_to_samples(duration, self.sample_rate);
        let osc = Oscillator::new(self.sample_rate as f64, frequency);
        let samples = osc
            .take(count)
            .enumerate()
            .map(|(i, wave)| wave * self.envelope.eval(i, count))
            .collect();
        Tone { samples }
    }
}

impl Default for SineSynth {
    fn default() -> Self {
        SineSynth::new(DEFAULT_SAMPLE_RATE)
    }
}

/// Synthesize a single faded sine tone.
///
/// # Examples
///
/// ```
/// use emotune::synth::*;
///
/// let tone = synthesize(440.0, 0.5, 44100);
/// assert_eq!(tone.len(), 22050);
/// assert_eq!(tone.samples()[0], 0.0);
/// assert_eq!(synthesize(440.0, 0.0, 44100).len(), 0);
/// ```
pub fn synthesize(frequency: f64, duration: f64, sample_rate: u32) -> Tone {
    SineSynth::new(sample_rate).tone(frequency, duration)
}
