// emotune -- melodies synthesized from emotions
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a note is.

use snafu::Snafu;

/// One of the twelve pitch classes of the chromatic scale.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// Look up the pitch class for a spelling like `C`, `F#` or `Bb`.
    /// Only the seventeen common spellings are known, so e.g. `E#` or `Cb` yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use emotune::note::*;
    ///
    /// assert_eq!(PitchClass::from_symbol("Db"), Some(PitchClass::CSharp));
    /// assert_eq!(PitchClass::from_symbol("A#"), Some(PitchClass::ASharp));
    /// assert_eq!(PitchClass::from_symbol("Cb"), None);
    /// ```
    pub fn from_symbol(symbol: &str) -> Option<PitchClass> {
        let class = match symbol {
            "C" => PitchClass::C,
            "C#" | "Db" => PitchClass::CSharp,
            "D" => PitchClass::D,
            "D#" | "Eb" => PitchClass::DSharp,
            "E" => PitchClass::E,
            "F" => PitchClass::F,
            "F#" | "Gb" => PitchClass::FSharp,
            "G" => PitchClass::G,
            "G#" | "Ab" => PitchClass::GSharp,
            "A" => PitchClass::A,
            "A#" | "Bb" => PitchClass::ASharp,
            "B" => PitchClass::B,
            _ => return None,
        };
        Some(class)
    }

    /// Number of semitones above C within the same octave.
    pub fn semitone(self) -> i32 {
        match self {
            PitchClass::C => 0,
            PitchClass::CSharp => 1,
            PitchClass::D => 2,
            PitchClass::DSharp => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::FSharp => 6,
            PitchClass::G => 7,
            PitchClass::GSharp => 8,
            PitchClass::A => 9,
            PitchClass::ASharp => 10,
            PitchClass::B => 11,
        }
    }
}

/// A note in standard notation, e.g. `F#5`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NoteName {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

/// Reasons why a note name could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum MalformedNote {
    #[snafu(display("Note name {:?} must have two or three characters", name))]
    Length { name: String },
    #[snafu(display("Note name {:?} does not end in an octave digit", name))]
    Octave { name: String },
}

impl NoteName {
    pub fn new(pitch_class: PitchClass, octave: i32) -> NoteName {
        NoteName {
            pitch_class,
            octave,
        }
    }

    /// Parse a name string of the format `<letter><accidental?><octave>`.
    ///
    /// The octave is a single digit. A pitch class spelling that is not known
    /// is read as `A`, keeping the octave.
    ///
    /// # Examples
    ///
    /// ```
    /// use emotune::note::*;
    ///
    /// assert_eq!(NoteName::parse("A4"), Ok(NoteName::new(PitchClass::A, 4)));
    /// assert_eq!(NoteName::parse("Bb4"), Ok(NoteName::new(PitchClass::ASharp, 4)));
    /// assert_eq!(NoteName::parse("H3"), Ok(NoteName::new(PitchClass::A, 3)));
    /// assert_eq!(NoteName::parse("C10"), Ok(NoteName::new(PitchClass::A, 0)));
    /// assert!(NoteName::parse("C#10").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<NoteName, MalformedNote> {
        let chars: Vec<char> = name.chars().collect();
        if chars.len() != 2 && chars.len() != 3 {
            return Err(MalformedNote::Length {
                name: name.to_string(),
            });
        }

        let (symbol, octave_ch) = chars.split_at(chars.len() - 1);
        let octave = match octave_ch[0].to_digit(10) {
            Some(digit) => digit as i32,
            None => {
                return Err(MalformedNote::Octave {
                    name: name.to_string(),
                })
            }
        };
        let symbol: String = symbol.iter().collect();
        let pitch_class = PitchClass::from_symbol(&symbol).unwrap_or(PitchClass::A);

        Ok(NoteName::new(pitch_class, octave))
    }

    /// Signed distance in semitones from `other` up to `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use emotune::note::*;
    ///
    /// let a4 = NoteName::new(PitchClass::A, 4);
    /// assert_eq!(NoteName::new(PitchClass::C, 5).semitones_from(a4), 3);
    /// assert_eq!(NoteName::new(PitchClass::A, 3).semitones_from(a4), -12);
    /// ```
    pub fn semitones_from(self, other: NoteName) -> i32 {
        (self.pitch_class.semitone() - other.pitch_class.semitone())
            + (self.octave - other.octave) * 12
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_sharps_and_flats() {
        assert_eq!(
            NoteName::parse("F#5").unwrap(),
            NoteName::new(PitchClass::FSharp, 5)
        );
        assert_eq!(
            NoteName::parse("Gb5").unwrap(),
            NoteName::new(PitchClass::FSharp, 5)
        );
        assert_eq!(
            NoteName::parse("Eb2").unwrap(),
            NoteName::new(PitchClass::DSharp, 2)
        );
    }

    #[test]
    fn unknown_spelling_reads_as_a() {
        assert_eq!(
            NoteName::parse("E#4").unwrap(),
            NoteName::new(PitchClass::A, 4)
        );
        // lowercase letters are not part of the table
        assert_eq!(
            NoteName::parse("c4").unwrap(),
            NoteName::new(PitchClass::A, 4)
        );
    }

    #[test]
    fn malformed_names() {
        assert_eq!(
            NoteName::parse("X"),
            Err(MalformedNote::Length {
                name: "X".to_string()
            })
        );
        assert_eq!(
            NoteName::parse(""),
            Err(MalformedNote::Length {
                name: String::new()
            })
        );
        assert_eq!(
            NoteName::parse("C#10"),
            Err(MalformedNote::Length {
                name: "C#10".to_string()
            })
        );
        assert_eq!(
            NoteName::parse("Cx"),
            Err(MalformedNote::Octave {
                name: "Cx".to_string()
            })
        );
    }

    #[test]
    fn length_counts_characters() {
        // the sharp sign is a single character even though it takes three bytes
        assert_eq!(
            NoteName::parse("C♯4").unwrap(),
            NoteName::new(PitchClass::A, 4)
        );
    }
}
