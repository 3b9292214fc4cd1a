//! Utility functions that I don't know where to put else

/// Compute a factor measured in octaves (one octave corresponds to a factor of two).
///
/// # Example
///
/// ```
/// # use emotune::util::*;
///
/// assert_eq!(from_octaves(3.0), 8.0);
/// assert_eq!(from_octaves(-1.0), 0.5);
/// ```
pub fn from_octaves(octaves: f64) -> f64 {
    2.0f64.powf(octaves)
}

/// Compute a factor measured in semitones (one octave consists of 12 semitones)
///
/// # Example
///
/// ```
/// # use emotune::util::*;
///
/// assert_eq!(from_semitones(3.0), from_octaves(3.0 / 12.0));
/// assert_eq!(from_semitones(-12.0), 0.5);
/// ```
pub fn from_semitones(semitones: f64) -> f64 {
    from_octaves(semitones / 12.0)
}

/// Number of whole samples covering `seconds` at the given rate, rounded down.
/// Zero, negative and non-finite durations yield no samples.
///
/// # Example
///
/// ```
/// # use emotune::util::*;
///
/// assert_eq!(seconds_to_samples(0.05, 44100), 2205);
/// assert_eq!(seconds_to_samples(-1.0, 44100), 0);
/// ```
pub fn seconds_to_samples(seconds: f64, sample_rate: u32) -> usize {
    let samples = seconds * sample_rate as f64;
    if samples.is_finite() && samples > 0.0 {
        samples.floor() as usize
    } else {
        0
    }
}
