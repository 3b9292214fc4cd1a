// emotune -- melodies synthesized from emotions
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Writing signals as 16 bit mono PCM wave files.

use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use log::debug;
use snafu::{ensure, ResultExt, Snafu};

use crate::wave::Signal;

/// Possible errors when writing a wave file.
#[derive(Debug, Snafu)]
pub enum EncodeError {
    #[snafu(display("Could not create directory {}: {}", path.display(), source))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Could not write {}: {}", path.display(), source))]
    WriteWav { path: PathBuf, source: hound::Error },
    #[snafu(display("Could not write {}: sample rate must be positive", path.display()))]
    ZeroSampleRate { path: PathBuf },
}

/// The format of all files written by this module.
pub fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Scale the samples so that the loudest one has an amplitude of one.
/// Silence is left untouched.
///
/// Returns the peak amplitude before scaling.
///
/// # Examples
///
/// ```
/// use emotune::output::wav::normalize;
///
/// let mut samples = vec![0.5, -0.25];
/// assert_eq!(normalize(&mut samples), 0.5);
/// assert_eq!(samples, vec![1.0, -0.5]);
///
/// let mut silence = vec![0.0; 3];
/// assert_eq!(normalize(&mut silence), 0.0);
/// assert_eq!(silence, vec![0.0; 3]);
/// ```
pub fn normalize(samples: &mut [f64]) -> f64 {
    let peak = samples.iter().fold(0.0, |peak: f64, s| peak.max(s.abs()));
    if peak > 0.0 {
        samples.iter_mut().for_each(|s| *s /= peak);
    }
    peak
}

/// Convert a sample in [-1, 1] to a 16 bit integer, clamping anything outside.
///
/// # Examples
///
/// ```
/// use emotune::output::wav::quantize;
///
/// assert_eq!(quantize(1.0), 32767);
/// assert_eq!(quantize(-1.0), -32767);
/// assert_eq!(quantize(0.5), 16384);
/// assert_eq!(quantize(3.0), 32767);
/// ```
pub fn quantize(sample: f64) -> i16 {
    (sample.max(-1.0).min(1.0) * i16::MAX as f64).round() as i16
}

/// Normalize the signal and write it as a wave file to any seekable writer.
/// The header is patched with the final length once all frames are written.
///
/// Returns the number of frames written.
pub fn write_wav<W: Write + Seek>(mut signal: Signal, writer: W) -> Result<usize, hound::Error> {
    let sample_rate = signal.sample_rate();
    if sample_rate == 0 {
        return Err(hound::Error::FormatError("sample rate must be positive"));
    }
    let peak = normalize(signal.samples_mut());
    debug!(
        "encoding {} samples at {} Hz, peak amplitude {:.4}",
        signal.len(),
        sample_rate,
        peak
    );

    let mut wav = WavWriter::new(writer, wav_spec(sample_rate))?;
    for &sample in signal.samples() {
        wav.write_sample(quantize(sample))?;
    }
    wav.finalize()?;
    Ok(signal.len())
}

/// Write the signal to a wave file at `path`, replacing any existing file.
/// Missing parent directories are created.
///
/// Partially written files are left behind if writing fails.
pub fn encode(signal: Signal, path: &Path) -> Result<(), EncodeError> {
    ensure!(signal.sample_rate() > 0, ZeroSampleRate { path });
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).context(CreateDir { path: dir })?;
        }
    }

    let file = std::fs::File::create(path)
        .map_err(hound::Error::IoError)
        .context(WriteWav { path })?;
    write_wav(signal, std::io::BufWriter::new(file)).context(WriteWav { path })?;
    Ok(())
}

/// Make sure a path ends in `.wav`, replacing any other extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use emotune::output::wav::with_wav_extension;
///
/// assert_eq!(with_wav_extension(Path::new("out/happy.mp3")), Path::new("out/happy.wav"));
/// assert_eq!(with_wav_extension(Path::new("out/happy")), Path::new("out/happy.wav"));
/// assert_eq!(with_wav_extension(Path::new("happy.wav")), Path::new("happy.wav"));
/// ```
pub fn with_wav_extension(path: &Path) -> PathBuf {
    let is_wav = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.ends_with(".wav"));
    if is_wav {
        path.to_path_buf()
    } else {
        path.with_extension("wav")
    }
}
