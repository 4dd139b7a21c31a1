//! Helpers shared by the CLI commands.

use tenband_core::{AudioProcessor, NUM_BANDS};

/// Parse a `BAND=GAIN` argument, e.g. `0=6` for +6 dB on the 31 Hz band.
pub fn parse_band(s: &str) -> Result<(usize, f64), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!("invalid band format: '{s}' (expected BAND=GAIN)"));
    }
    let band: usize = parts[0]
        .parse()
        .map_err(|_| format!("invalid band index: '{}'", parts[0]))?;
    if band >= NUM_BANDS {
        return Err(format!("band index {band} out of range (0-{})", NUM_BANDS - 1));
    }
    let gain: f64 = parts[1]
        .parse()
        .map_err(|_| format!("invalid gain: '{}'", parts[1]))?;
    Ok((band, gain))
}

/// Apply a preset and per-band overrides to a processor's equalizer.
///
/// The preset name is validated here so an unknown name is a CLI error
/// rather than the engine's silent no-op.
pub fn configure_processor(
    processor: &mut AudioProcessor,
    preset: Option<&str>,
    bands: &[(usize, f64)],
) -> anyhow::Result<()> {
    if let Some(name) = preset {
        if !tenband_core::is_preset(name) {
            anyhow::bail!(
                "unknown preset '{}' (available: {})",
                name,
                tenband_core::PRESET_NAMES.join(", ")
            );
        }
        processor.apply_preset(name);
    }
    for &(band, gain) in bands {
        processor.set_band_gain(band, gain);
    }
    Ok(())
}

pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum / samples.len() as f64).sqrt()
}

pub fn peak(samples: &[f32]) -> f64 {
    samples.iter().map(|s| f64::from(s.abs())).fold(0.0, f64::max)
}
