// emotune -- melodies synthesized from emotions
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The table of emotions and the musical material each of them is composed from.

use std::fmt;

use snafu::{ensure, Snafu};

use crate::rational::Rational;

/// Musical parameters for one emotion.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionProfile {
    id: String,
    notes: Vec<String>,
    tempo: u32,
    rhythms: Vec<Rational>,
}

/// Reasons why a profile is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ProfileError {
    #[snafu(display("Emotion {:?} has no candidate notes", id))]
    NoNotes { id: String },
    #[snafu(display("Emotion {:?} has no rhythm patterns", id))]
    NoRhythms { id: String },
    #[snafu(display("Emotion {:?} must have a positive tempo", id))]
    ZeroTempo { id: String },
    #[snafu(display("Emotion {:?} has a non-positive note length {}", id, beats))]
    NonPositiveRhythm { id: String, beats: Rational },
}

/// The requested emotion is not in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedEmotion {
    pub emotion: String,
}

impl fmt::Display for UnsupportedEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported emotion: {}", self.emotion)
    }
}

impl std::error::Error for UnsupportedEmotion {}

impl EmotionProfile {
    /// Create a profile, checking that there is something to draw from.
    ///
    /// # Examples
    ///
    /// ```
    /// use emotune::emotion::*;
    /// use emotune::rational::Rational;
    ///
    /// let dreamy = EmotionProfile::new("dreamy", &["E4", "G#4", "B4"], 60, &[Rational::from_int(3)]);
    /// assert!(dreamy.is_ok());
    /// assert!(EmotionProfile::new("empty", &[], 60, &[Rational::from_int(1)]).is_err());
    /// ```
    pub fn new(
        id: &str,
        notes: &[&str],
        tempo: u32,
        rhythms: &[Rational],
    ) -> Result<EmotionProfile, ProfileError> {
        ensure!(!notes.is_empty(), NoNotes { id });
        ensure!(!rhythms.is_empty(), NoRhythms { id });
        ensure!(tempo > 0, ZeroTempo { id });
        if let Some(&beats) = rhythms.iter().find(|&&beats| beats <= Rational::zero()) {
            return Err(ProfileError::NonPositiveRhythm {
                id: id.to_string(),
                beats,
            });
        }
        Ok(EmotionProfile::from_table(id, notes, tempo, rhythms))
    }

    /// Build a row of the built-in table, which is known to be valid.
    fn from_table(id: &str, notes: &[&str], tempo: u32, rhythms: &[Rational]) -> EmotionProfile {
        EmotionProfile {
            id: id.to_string(),
            notes: notes.iter().map(|note| note.to_string()).collect(),
            tempo,
            rhythms: rhythms.to_vec(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Note names a melody draws from, see [`crate::note::NoteName::parse`].
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Tempo in quarter notes per minute.
    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Note lengths in beats. Repeated entries are drawn more often.
    pub fn rhythms(&self) -> &[Rational] {
        &self.rhythms
    }

    /// Duration of one beat in seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use emotune::emotion::EmotionTable;
    ///
    /// let table = EmotionTable::builtin();
    /// assert_eq!(table.lookup("happy").unwrap().beat_seconds(), 0.5);
    /// ```
    pub fn beat_seconds(&self) -> f64 {
        60.0 / self.tempo as f64
    }
}

/// All known emotions, looked up by their case-sensitive id.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionTable {
    profiles: Vec<EmotionProfile>,
}

impl EmotionTable {
    /// The four emotions available out of the box: happy, sad, excited and calm.
    pub fn builtin() -> Self {
        let whole = Rational::from_int;
        let half = Rational::nth(2);
        let quarter = Rational::nth(4);

        let profiles = vec![
            EmotionProfile::from_table(
                "happy",
                &["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5", "D5", "E5"],
                120,
                &[whole(1), half, half, whole(1)],
            ),
            EmotionProfile::from_table(
                "sad",
                &["A3", "B3", "C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"],
                75,
                &[whole(2), whole(1), whole(1), whole(2)],
            ),
            EmotionProfile::from_table(
                "excited",
                &["G4", "A4", "B4", "C5", "D5", "E5", "F#5", "G5", "A5", "B5"],
                140,
                &[quarter, quarter, half, quarter, quarter, half],
            ),
            EmotionProfile::from_table(
                "calm",
                &["F4", "G4", "A4", "Bb4", "C5", "D5", "E5", "F5"],
                85,
                &[whole(2), whole(1), whole(1), whole(2)],
            ),
        ];
        EmotionTable { profiles }
    }

    pub fn get(&self, id: &str) -> Option<&EmotionProfile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }

    /// Like [`EmotionTable::get`], but failing for unknown emotions.
    ///
    /// # Examples
    ///
    /// ```
    /// use emotune::emotion::*;
    ///
    /// let table = EmotionTable::builtin();
    /// assert_eq!(table.lookup("calm").unwrap().tempo(), 85);
    /// assert!(table.lookup("Calm").is_err());
    /// ```
    pub fn lookup(&self, id: &str) -> Result<&EmotionProfile, UnsupportedEmotion> {
        self.get(id).ok_or_else(|| UnsupportedEmotion {
            emotion: id.to_string(),
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Add a profile, replacing any existing one with the same id.
    pub fn insert(&mut self, profile: EmotionProfile) {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Ids in table order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|profile| profile.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmotionProfile> {
        self.profiles.iter()
    }
}

impl Default for EmotionTable {
    fn default() -> Self {
        EmotionTable::builtin()
    }
}
