// emotune -- melodies synthesized from emotions
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The whole pipeline from an emotion to a wave file, and the request/response
//! contract offered to front ends.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use snafu::{ResultExt, Snafu};

use crate::emotion::{EmotionTable, UnsupportedEmotion};
use crate::melody::{Composer, DEFAULT_GAP, DEFAULT_NOTE_COUNT};
use crate::output::wav::{self, EncodeError};
use crate::synth::DEFAULT_SAMPLE_RATE;

/// Where generated files go unless configured otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "static/music";

/// Settings for generating music files.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Samples per second of the generated files.
    pub sample_rate: u32,
    /// Number of notes per melody.
    pub note_count: usize,
    /// Rest after each note in seconds.
    pub gap: f64,
    /// Directory receiving one file per emotion.
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            note_count: DEFAULT_NOTE_COUNT,
            gap: DEFAULT_GAP,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Possible errors when generating a file.
#[derive(Debug, Snafu)]
pub enum GenerateError {
    #[snafu(display("{}", source))]
    Compose { source: UnsupportedEmotion },
    #[snafu(display("{}", source))]
    Encode { source: EncodeError },
}

/// A request for music in a certain mood.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerateRequest {
    pub emotion: Option<String>,
}

impl GenerateRequest {
    pub fn new(emotion: &str) -> Self {
        GenerateRequest {
            emotion: Some(emotion.to_string()),
        }
    }
}

/// The outcome of a [`GenerateRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateResponse {
    /// A new file was written.
    Generated { file_path: PathBuf, message: String },
    /// The request was rejected without generating anything.
    Rejected { error: String },
    /// Generation failed, the file may or may not exist.
    Failed { error: String },
}

impl GenerateResponse {
    pub fn is_success(&self) -> bool {
        match self {
            GenerateResponse::Generated { .. } => true,
            _ => false,
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        match self {
            GenerateResponse::Generated { file_path, .. } => Some(file_path),
            _ => None,
        }
    }
}

impl fmt::Display for GenerateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateResponse::Generated { file_path, message } => {
                write!(f, "{} ({})", message, file_path.display())
            }
            GenerateResponse::Rejected { error } | GenerateResponse::Failed { error } => {
                write!(f, "error: {}", error)
            }
        }
    }
}

/// Name of the file holding the music for an emotion.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use emotune::generate::output_path;
///
/// assert_eq!(output_path(Path::new("static/music"), "sad"), Path::new("static/music/sad_music.wav"));
/// ```
pub fn output_path(dir: &Path, emotion: &str) -> PathBuf {
    dir.join(format!("{}_music.wav", emotion))
}

/// Composes melodies and writes them to wave files.
pub struct Generator<R> {
    config: GeneratorConfig,
    composer: Composer<R>,
}

impl Generator<StdRng> {
    /// A generator over the built-in emotions producing a new melody on every call.
    pub fn new(config: GeneratorConfig) -> Self {
        Generator::with_composer(config, Composer::from_entropy())
    }

    /// A generator over the built-in emotions whose melodies are determined by the seed.
    pub fn seeded(config: GeneratorConfig, seed: u64) -> Self {
        Generator::with_composer(config, Composer::seeded(seed))
    }
}

impl<R: Rng> Generator<R> {
    /// Use an existing composer; its sample rate and rest length are taken from the config.
    pub fn with_composer(config: GeneratorConfig, composer: Composer<R>) -> Self {
        let composer = composer
            .with_sample_rate(config.sample_rate)
            .with_gap(config.gap);
        Generator { config, composer }
    }

    /// A generator drawing from a custom table.
    pub fn with_table(config: GeneratorConfig, table: EmotionTable, rng: R) -> Self {
        Generator::with_composer(config, Composer::new(table, rng))
    }

    pub fn table(&self) -> &EmotionTable {
        self.composer.table()
    }

    /// Generate music for the emotion into its file in the output directory.
    pub fn generate(&mut self, emotion: &str) -> Result<PathBuf, GenerateError> {
        let path = output_path(&self.config.output_dir, emotion);
        self.generate_to(emotion, &path)
    }

    /// Generate music for the emotion into a file of choice.
    /// The extension of `path` is changed to `.wav` if necessary.
    pub fn generate_to(&mut self, emotion: &str, path: &Path) -> Result<PathBuf, GenerateError> {
        info!("generating music for {:?}", emotion);
        let melody = self
            .composer
            .compose_melody(emotion, self.config.note_count)
            .context(Compose)?;
        info!(
            "composed {} notes ({} beats, {:.2} seconds)",
            melody.notes.len(),
            melody.total_beats(),
            melody.signal.duration()
        );

        let path = wav::with_wav_extension(path);
        wav::encode(melody.signal, &path).context(Encode)?;
        info!("saved {:?} music to {}", emotion, path.display());
        Ok(path)
    }

    /// Serve a request, validating it before anything is composed.
    ///
    /// # Examples
    ///
    /// ```
    /// use emotune::generate::*;
    ///
    /// let mut generator = Generator::seeded(GeneratorConfig::default(), 1);
    /// let response = generator.handle(&GenerateRequest::default());
    /// assert_eq!(response, GenerateResponse::Rejected { error: "missing emotion".to_string() });
    /// ```
    pub fn handle(&mut self, request: &GenerateRequest) -> GenerateResponse {
        let emotion = match request.emotion.as_deref() {
            Some(emotion) if !emotion.is_empty() => emotion,
            _ => {
                return GenerateResponse::Rejected {
                    error: "missing emotion".to_string(),
                }
            }
        };
        if !self.table().contains(emotion) {
            return GenerateResponse::Rejected {
                error: format!("unsupported emotion: {}", emotion),
            };
        }

        match self.generate(emotion) {
            Ok(file_path) => GenerateResponse::Generated {
                file_path,
                message: format!("Generated {} music", emotion),
            },
            Err(err) => {
                warn!("generating {:?} music failed: {}", emotion, err);
                GenerateResponse::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::emotion::EmotionProfile;
    use crate::rational::Rational;
    use crate::util::seconds_to_samples;

    fn config_in(dir: &Path) -> GeneratorConfig {
        GeneratorConfig {
            note_count: 4,
            output_dir: dir.join("music"),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn generates_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = Generator::seeded(config_in(dir.path()), 8);
        let path = generator.generate("happy").unwrap();
        assert_eq!(path, dir.path().join("music").join("happy_music.wav"));

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 44100);
        assert!(reader.duration() > 4 * 2205);
    }

    #[test]
    fn normalized_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = Generator::seeded(config_in(dir.path()), 21);
        let path = generator.generate("excited").unwrap();
        let mut reader = hound::WavReader::open(&path).unwrap();
        let peak = reader
            .samples::<i16>()
            .map(|s| (s.unwrap() as i32).abs())
            .max()
            .unwrap();
        assert_eq!(peak, 32767);
    }

    #[test]
    fn frame_count_matches_signal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let expected = Composer::seeded(4)
            .compose("sad", config.note_count)
            .unwrap()
            .len();
        let mut generator = Generator::seeded(config, 4);
        let path = generator.generate("sad").unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.duration() as usize, expected);
    }

    #[test]
    fn unsupported_emotion_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = Generator::seeded(config_in(dir.path()), 8);
        match generator.generate("furious") {
            Err(GenerateError::Compose { source }) => assert_eq!(source.emotion, "furious"),
            other => panic!("expected unsupported emotion, got {:?}", other),
        }
        assert!(!dir.path().join("music").exists());
    }

    #[test]
    fn explicit_path_gets_wav_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = Generator::seeded(config_in(dir.path()), 8);
        let path = generator
            .generate_to("calm", &dir.path().join("calm.mp3"))
            .unwrap();
        assert_eq!(path, dir.path().join("calm.wav"));
        assert!(path.exists());
        assert!(!dir.path().join("calm.mp3").exists());
    }

    #[test]
    fn requests() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = Generator::seeded(config_in(dir.path()), 8);

        let empty = GenerateRequest {
            emotion: Some(String::new()),
        };
        assert_eq!(
            generator.handle(&empty),
            GenerateResponse::Rejected {
                error: "missing emotion".to_string()
            }
        );
        assert_eq!(
            generator.handle(&GenerateRequest::new("Happy")),
            GenerateResponse::Rejected {
                error: "unsupported emotion: Happy".to_string()
            }
        );
        assert!(!dir.path().join("music").exists());

        let response = generator.handle(&GenerateRequest::new("happy"));
        assert!(response.is_success());
        assert_eq!(
            response.file_path(),
            Some(dir.path().join("music").join("happy_music.wav").as_path())
        );
    }

    #[test]
    fn custom_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = EmotionTable::builtin();
        let furious = EmotionProfile::new("furious", &["E2", "F2"], 180, &[Rational::nth(8)])
            .unwrap();
        table.insert(furious);
        let rng = rand::rngs::mock::StepRng::new(0, 0);
        let mut generator = Generator::with_table(config_in(dir.path()), table, rng);

        let response = generator.handle(&GenerateRequest::new("furious"));
        let path = response.file_path().unwrap();
        assert_eq!(path, dir.path().join("music").join("furious_music.wav"));
        // four eighth notes at 180 bpm, each followed by a rest
        let tone = seconds_to_samples(Rational::nth(8).to_f64() * (60.0 / 180.0), 44100);
        let rest = seconds_to_samples(DEFAULT_GAP, 44100);
        let reader = hound::WavReader::open(path).unwrap();
        assert_eq!(reader.duration() as usize, 4 * (tone + rest));
    }

    #[test]
    fn zero_sample_rate_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            sample_rate: 0,
            ..config_in(dir.path())
        };
        let mut generator = Generator::seeded(config, 8);
        match generator.handle(&GenerateRequest::new("happy")) {
            GenerateResponse::Failed { error } => assert!(error.contains("sample rate")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!dir.path().join("music").join("happy_music.wav").exists());
    }

    #[test]
    fn encoding_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("music");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let mut generator = Generator::seeded(config_in(dir.path()), 8);

        match generator.handle(&GenerateRequest::new("sad")) {
            GenerateResponse::Failed { error } => assert!(error.contains("music")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
