//! Live loopback capture command.

use crate::commands::common::parse_band;
use clap::Args;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tenband_io::{write_wav_interleaved, LoopbackCapture, WavSpec};

#[derive(Args)]
pub struct CaptureArgs {
    /// Output WAV file for the processed stream
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Capture duration in seconds
    #[arg(short, long, default_value = "10")]
    duration: u64,

    /// Preset to apply (see `tenband presets`)
    #[arg(short, long)]
    preset: Option<String>,

    /// Per-band gain override in dB, e.g. "0=6" (repeatable)
    #[arg(short, long = "band", value_parser = parse_band, number_of_values = 1)]
    band: Vec<(usize, f64)>,

    /// Capture device name (defaults to the system loopback device)
    #[arg(long)]
    device: Option<String>,
}

pub fn run(args: CaptureArgs) -> anyhow::Result<()> {
    if let Some(name) = args.preset.as_deref() {
        if !tenband_core::is_preset(name) {
            anyhow::bail!(
                "unknown preset '{}' (available: {})",
                name,
                tenband_core::PRESET_NAMES.join(", ")
            );
        }
    }

    let mut capture = LoopbackCapture::new();
    capture.initialize(args.device.as_deref())?;

    // Configure after initialize: binding to the device reconstructs the
    // equalizer at the device's mix rate.
    {
        let equalizer = capture.equalizer();
        let mut eq = equalizer.lock();
        if let Some(name) = args.preset.as_deref() {
            eq.apply_preset(name);
        }
        for &(band, gain) in &args.band {
            eq.set_band_gain(band, gain);
        }
    }

    println!(
        "Capturing {} Hz, {} channel(s) for {}s...",
        capture.sample_rate(),
        capture.channels(),
        args.duration
    );

    let frames = capture.frames();
    let channels = usize::from(capture.channels());
    capture.start_capture()?;

    let deadline = Instant::now() + Duration::from_secs(args.duration);
    let mut recorded: Vec<f32> = Vec::new();
    while Instant::now() < deadline {
        if let Ok(packet) = frames.recv_timeout(Duration::from_millis(100)) {
            recorded.extend(packet);
        }
    }

    capture.stop_capture()?;
    // Drain anything processed between the deadline and the stop.
    while let Ok(packet) = frames.try_recv() {
        recorded.extend(packet);
    }

    let interleaved = to_interleaved_stereo(&recorded, channels);
    let spec = WavSpec {
        channels: 2,
        sample_rate: capture.sample_rate(),
        bits_per_sample: 32,
    };

    println!(
        "Writing {} frames to {}...",
        interleaved.len() / 2,
        args.output.display()
    );
    write_wav_interleaved(&args.output, &interleaved, spec)?;
    println!("Done!");

    Ok(())
}

/// Reshape captured packets (device channel layout) into interleaved stereo.
fn to_interleaved_stereo(samples: &[f32], channels: usize) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => {
            let mut out = Vec::with_capacity(samples.len() * 2);
            for &s in samples {
                out.push(s);
                out.push(s);
            }
            out
        }
        2 => samples.to_vec(),
        _ => {
            let mut out = Vec::with_capacity(samples.len() / channels * 2);
            for frame in samples.chunks_exact(channels) {
                out.push(frame[0]);
                out.push(frame[1]);
            }
            out
        }
    }
}
