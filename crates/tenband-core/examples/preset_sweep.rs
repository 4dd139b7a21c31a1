//! Demonstration of the ten-band equalizer's presets.
//!
//! Sweeps a test tone through every built-in preset and prints the measured
//! gain at each band's center frequency.
//!
//! Run with: cargo run --example preset_sweep

use tenband_core::{linear_to_db, Equalizer, BAND_FREQUENCIES, PRESET_NAMES};

const SAMPLE_RATE: f64 = 48000.0;

/// Steady-state gain of the equalizer at one frequency, in dB, measured on
/// the second half of a one-second tone.
fn measure_gain_db(eq: &mut Equalizer, freq: f64) -> f64 {
    let len = SAMPLE_RATE as usize;
    let input: Vec<f32> = (0..len)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            (0.25 * (2.0 * std::f64::consts::PI * freq * t).sin()) as f32
        })
        .collect();

    let mut left = input.clone();
    let mut right = input.clone();
    eq.process_stereo(&mut left, &mut right);

    let tail = len / 2;
    let rms = |s: &[f32]| {
        (s.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>() / s.len() as f64).sqrt()
    };
    linear_to_db(rms(&left[tail..])) - linear_to_db(rms(&input[tail..]))
}

fn main() {
    println!("Tenband Preset Sweep");
    println!("====================\n");

    print!("{:<14}", "preset");
    for freq in BAND_FREQUENCIES {
        if freq >= 1000.0 {
            print!("{:>7}", format!("{}k", freq / 1000.0));
        } else {
            print!("{freq:>7}");
        }
    }
    println!();

    for name in PRESET_NAMES {
        print!("{name:<14}");
        for freq in BAND_FREQUENCIES {
            // Fresh state per measurement so tones don't bleed into each other.
            let mut eq = Equalizer::new(SAMPLE_RATE);
            eq.apply_preset(name);
            print!("{:>7.1}", measure_gain_db(&mut eq, freq));
        }
        println!();
    }

    println!("\nMeasured gain in dB at each band's center frequency.");
}
