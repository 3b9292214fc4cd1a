// emotune -- melodies synthesized from emotions
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `emotune` turns an emotion into a short melody saved as a wav file.

use std::path::PathBuf;
use std::process;

use structopt::StructOpt;

use emotune::generate::{GenerateRequest, Generator, GeneratorConfig, DEFAULT_OUTPUT_DIR};
use emotune::melody::{DEFAULT_GAP, DEFAULT_NOTE_COUNT};
use emotune::synth::DEFAULT_SAMPLE_RATE;

#[derive(Debug, StructOpt)]
#[structopt(name = "emotune", about = "Composing music from emotions")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The emotion to compose for, e.g. happy, sad, excited or calm.
    #[structopt(short, long)]
    emotion: Option<String>,

    /// Directory receiving the generated `<emotion>_music.wav` files.
    #[structopt(short, long, parse(from_os_str), default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Number of notes in the melody.
    #[structopt(short, long)]
    notes: Option<usize>,

    /// Samples per second of the output.
    #[structopt(long)]
    sample_rate: Option<u32>,

    /// Seed for reproducible melodies. A different melody is made every time if not given.
    #[structopt(long)]
    seed: Option<u64>,

    /// List the supported emotions and exit.
    #[structopt(long)]
    list: bool,
}

fn main() {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    let config = GeneratorConfig {
        sample_rate: opt.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
        note_count: opt.notes.unwrap_or(DEFAULT_NOTE_COUNT),
        gap: DEFAULT_GAP,
        output_dir: opt.output_dir,
    };
    let mut generator = match opt.seed {
        Some(seed) => Generator::seeded(config, seed),
        None => Generator::new(config),
    };

    if opt.list {
        for profile in generator.table().iter() {
            println!("{:10} {:>3} bpm", profile.id(), profile.tempo());
        }
        return;
    }

    let request = GenerateRequest {
        emotion: opt.emotion,
    };
    let response = generator.handle(&request);
    if response.is_success() {
        println!("{}", response);
    } else {
        eprintln!("{}", response);
        process::exit(1);
    }
}
