//! File-based equalization command.

use crate::commands::common::{configure_processor, parse_band, peak, rms};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tenband_core::{linear_to_db, AudioProcessor};
use tenband_io::{read_wav_interleaved, write_wav_interleaved, WavSpec};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset to apply (see `tenband presets`)
    #[arg(short, long)]
    preset: Option<String>,

    /// Per-band gain override in dB, e.g. "0=6" (repeatable; applied after
    /// the preset)
    #[arg(short, long = "band", value_parser = parse_band, number_of_values = 1)]
    band: Vec<(usize, f64)>,

    /// Processing block size in frames
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav_interleaved(&args.input)?;
    let frames = samples.len() / 2;

    println!(
        "  {} frames, {} Hz, {:.2}s",
        frames,
        spec.sample_rate,
        frames as f64 / f64::from(spec.sample_rate)
    );

    let mut processor = AudioProcessor::new();
    processor.initialize(f64::from(spec.sample_rate));
    configure_processor(&mut processor, args.preset.as_deref(), &args.band)?;

    let input_rms = rms(&samples);
    let input_peak = peak(&samples);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let block_samples = args.block_size * 2;
    for block in samples.chunks_mut(block_samples) {
        let block_frames = block.len() / 2;
        processor.process_interleaved_stereo(block);
        pb.inc(block_frames as u64);
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_interleaved(&args.output, &samples, out_spec)?;
    println!("Done!");

    Ok(())
}
