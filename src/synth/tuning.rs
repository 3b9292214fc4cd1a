// emotune -- melodies synthesized from emotions
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use log::warn;

use crate::note::*;
use crate::util::from_semitones;

/// Frequency used for note names that cannot be parsed at all.
pub const FALLBACK_FREQUENCY: f64 = 440.0;

/// Defines the tuning of an instrument by assinging a frequency to a certain note.
/// This defines the frequencies of all other notes at a standard tuning of 12 half-tones per octave.
///
/// # Examples
///
/// ```
/// use emotune::note::*;
/// use emotune::synth::tuning::*;
/// assert_eq!(Tuning::default().frequency(NoteName::new(PitchClass::A, 3)), 220.0);
/// assert_eq!(Tuning::default().frequency(NoteName::new(PitchClass::A, 5)), 880.0);
/// ```
#[derive(Debug, Clone)]
pub struct Tuning {
    pub reference_note: NoteName,
    pub reference_frequency: f64,
}

impl Tuning {
    /// Return the frequency of a note relative to this tuning.
    pub fn frequency(&self, other: NoteName) -> f64 {
        let semitones = other.semitones_from(self.reference_note);
        self.reference_frequency * from_semitones(semitones as f64)
    }

    /// Resolve a textual note name to its frequency.
    ///
    /// Never fails: names that cannot be parsed sound at [`FALLBACK_FREQUENCY`].
    ///
    /// # Examples
    ///
    /// ```
    /// use emotune::synth::tuning::*;
    /// let tuning = Tuning::default();
    /// assert_eq!(tuning.resolve("A4"), 440.0);
    /// assert_eq!(tuning.resolve("X"), FALLBACK_FREQUENCY);
    /// ```
    pub fn resolve(&self, name: &str) -> f64 {
        match NoteName::parse(name) {
            Ok(note) => self.frequency(note),
            Err(err) => {
                warn!("{}, using {} Hz", err, FALLBACK_FREQUENCY);
                FALLBACK_FREQUENCY
            }
        }
    }
}

/// Default concert tuning, where A4 corresponds to 440 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            reference_note: NoteName::new(PitchClass::A, 4),
            reference_frequency: 440.0,
        }
    }
}

/// Resolve a note name in the default concert tuning.
pub fn resolve(name: &str) -> f64 {
    Tuning::default().resolve(name)
}
