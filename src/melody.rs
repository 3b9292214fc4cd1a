//! Composing random melodies from the material of an emotion.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::emotion::{EmotionTable, UnsupportedEmotion};
use crate::rational::Rational;
use crate::synth::tuning::Tuning;
use crate::synth::{SineSynth, DEFAULT_SAMPLE_RATE};
use crate::wave::Signal;

/// Number of notes in a melody unless asked otherwise.
pub const DEFAULT_NOTE_COUNT: usize = 16;

/// Rest inserted after every note, in seconds.
pub const DEFAULT_GAP: f64 = 0.05;

/// A note as it was drawn and rendered into a melody.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedNote {
    /// The note name as written in the emotion table
    pub name: String,
    pub frequency: f64,
    /// Length in beats
    pub beats: Rational,
    /// Length in seconds at the tempo of the emotion
    pub seconds: f64,
    /// Length of the synthesized tone in samples
    pub samples: usize,
}

/// The signal of a composed melody together with the notes it was made of.
#[derive(Debug, Clone, PartialEq)]
pub struct Melody {
    pub signal: Signal,
    pub notes: Vec<PlayedNote>,
}

impl Melody {
    /// Total length of the notes in beats, not counting the rests between them.
    pub fn total_beats(&self) -> Rational {
        self.notes.iter().map(|note| note.beats).sum()
    }

    /// Total length of the notes in seconds, not counting the rests between them.
    pub fn tone_seconds(&self) -> f64 {
        self.notes.iter().map(|note| note.seconds).sum()
    }
}

/// Draws notes and rhythms for an emotion and renders them into a signal.
///
/// The random source is injected, so a seeded generator reproduces the same melody.
///
/// # Examples
///
/// ```
/// use emotune::melody::Composer;
///
/// let mut composer = Composer::seeded(7);
/// let melody = composer.compose_melody("happy", 4).unwrap();
/// assert_eq!(melody.notes.len(), 4);
/// assert!(composer.compose("furious", 4).is_err());
/// ```
pub struct Composer<R> {
    table: EmotionTable,
    tuning: Tuning,
    synth: SineSynth,
    /// Rest after each note in seconds.
    gap: f64,
    rng: R,
}

impl Composer<StdRng> {
    /// A composer over the built-in emotions with a reproducible random source.
    pub fn seeded(seed: u64) -> Self {
        Composer::new(EmotionTable::builtin(), StdRng::seed_from_u64(seed))
    }

    /// A composer over the built-in emotions that never repeats itself.
    pub fn from_entropy() -> Self {
        Composer::new(EmotionTable::builtin(), StdRng::from_entropy())
    }
}

impl<R: Rng> Composer<R> {
    pub fn new(table: EmotionTable, rng: R) -> Self {
        Composer {
            table,
            tuning: Tuning::default(),
            synth: SineSynth::new(DEFAULT_SAMPLE_RATE),
            gap: DEFAULT_GAP,
            rng,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.synth.sample_rate = sample_rate;
        self
    }

    pub fn with_gap(mut self, seconds: f64) -> Self {
        self.gap = seconds;
        self
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn table(&self) -> &EmotionTable {
        &self.table
    }

    pub fn sample_rate(&self) -> u32 {
        self.synth.sample_rate
    }

    /// Compose `note_count` random notes for the emotion into one signal.
    pub fn compose(
        &mut self,
        emotion: &str,
        note_count: usize,
    ) -> Result<Signal, UnsupportedEmotion> {
        self.compose_melody(emotion, note_count)
            .map(|melody| melody.signal)
    }

    /// Like [`Composer::compose`], but also reporting which notes were drawn.
    ///
    /// Each note is followed by a rest, including the last one.
    pub fn compose_melody(
        &mut self,
        emotion: &str,
        note_count: usize,
    ) -> Result<Melody, UnsupportedEmotion> {
        let profile = self.table.lookup(emotion)?;
        let beat_seconds = profile.beat_seconds();
        debug!(
            "composing {} notes for {:?} at {} bpm",
            note_count,
            profile.id(),
            profile.tempo()
        );

        debug_assert!(
            !profile.notes().is_empty() && !profile.rhythms().is_empty(),
            "profiles are validated to have notes and rhythms"
        );

        let mut signal = Signal::new(self.synth.sample_rate);
        let mut notes = Vec::with_capacity(note_count);
        for _ in 0..note_count {
            let name = profile.notes().choose(&mut self.rng);
            let beats = profile.rhythms().choose(&mut self.rng);
            let (name, beats) = match (name, beats) {
                (Some(name), Some(&beats)) => (name, beats),
                _ => break,
            };

            let seconds = beats.to_f64() * beat_seconds;
            let frequency = self.tuning.resolve(name);
            let tone = self.synth.tone(frequency, seconds);
            trace!(
                "{:>3} for {} beats at {:.2} Hz, {} samples",
                name,
                beats,
                frequency,
                tone.len()
            );

            notes.push(PlayedNote {
                name: name.clone(),
                frequency,
                beats,
                seconds,
                samples: tone.len(),
            });
            signal.push_tone(tone);
            signal.push_silence(self.gap);
        }

        Ok(Melody { signal, notes })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::seconds_to_samples;

    #[test]
    fn unsupported_emotion() {
        let mut composer = Composer::seeded(1);
        assert_eq!(
            composer.compose("furious", 16),
            Err(UnsupportedEmotion {
                emotion: "furious".to_string()
            })
        );
    }

    #[test]
    fn length_is_tones_plus_rests() {
        let mut composer = Composer::seeded(42);
        for emotion in &["happy", "sad", "excited", "calm"] {
            let n = 16;
            let melody = composer.compose_melody(emotion, n).unwrap();
            let gap_samples = seconds_to_samples(DEFAULT_GAP, 44100);
            let tone_samples: usize = melody.notes.iter().map(|note| note.samples).sum();
            assert_eq!(melody.signal.len(), tone_samples + n * gap_samples);

            // each tone loses less than one sample to rounding
            let expected = melody.tone_seconds() + n as f64 * DEFAULT_GAP;
            let tolerance = n as f64 / 44100.0;
            assert!((melody.signal.duration() - expected).abs() <= tolerance);
        }
    }

    #[test]
    fn draws_come_from_the_profile() {
        let mut composer = Composer::seeded(3);
        let melody = composer.compose_melody("excited", 32).unwrap();
        let profile = composer.table().lookup("excited").unwrap();
        for note in &melody.notes {
            assert!(profile.notes().contains(&note.name));
            assert!(profile.rhythms().contains(&note.beats));
            assert_eq!(note.seconds, note.beats.to_f64() * (60.0 / 140.0));
        }
    }

    #[test]
    fn ends_with_a_rest() {
        let mut composer = Composer::seeded(5);
        let signal = composer.compose("calm", 3).unwrap();
        let gap_samples = seconds_to_samples(DEFAULT_GAP, 44100);
        let tail = &signal.samples()[signal.len() - gap_samples..];
        assert!(tail.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn same_seed_same_melody() {
        let a = Composer::seeded(99).compose_melody("sad", 8).unwrap();
        let b = Composer::seeded(99).compose_melody("sad", 8).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_notes() {
        let mut composer = Composer::seeded(0);
        let melody = composer.compose_melody("happy", 0).unwrap();
        assert!(melody.signal.is_empty());
        assert_eq!(melody.total_beats(), Rational::zero());
    }

    #[test]
    fn custom_sample_rate_and_gap() {
        let mut composer = Composer::seeded(11).with_sample_rate(8000).with_gap(0.1);
        let melody = composer.compose_melody("happy", 4).unwrap();
        assert_eq!(melody.signal.sample_rate(), 8000);
        let tone_samples: usize = melody.notes.iter().map(|note| note.samples).sum();
        assert_eq!(melody.signal.len(), tone_samples + 4 * 800);
    }

    #[test]
    fn custom_rng() {
        // any generator works, here one that always picks the first entry
        let rng = rand::rngs::mock::StepRng::new(0, 0);
        let mut composer = Composer::new(EmotionTable::builtin(), rng);
        let melody = composer.compose_melody("happy", 2).unwrap();
        for note in &melody.notes {
            assert_eq!(note.name, "C4");
            assert_eq!(note.beats, Rational::from_int(1));
            assert_eq!(note.samples, 22050);
        }
        assert_eq!(melody.total_beats(), Rational::from_int(2));
    }

    #[test]
    fn tuning_shifts_every_note() {
        let low = Tuning {
            reference_frequency: 220.0,
            ..Tuning::default()
        };
        let standard = Composer::seeded(17).compose_melody("sad", 6).unwrap();
        let shifted = Composer::seeded(17)
            .with_tuning(low)
            .compose_melody("sad", 6)
            .unwrap();
        for (a, b) in standard.notes.iter().zip(shifted.notes.iter()) {
            assert_eq!(a.name, b.name);
            assert!((a.frequency - 2.0 * b.frequency).abs() < 1e-9);
        }
    }
}
