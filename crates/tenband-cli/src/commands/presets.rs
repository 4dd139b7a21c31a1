//! Preset listing command.

use clap::Args;
use tenband_core::{preset_gains, BAND_FREQUENCIES, PRESET_NAMES};

#[derive(Args)]
pub struct PresetsArgs {}

pub fn run(_args: PresetsArgs) -> anyhow::Result<()> {
    print!("{:<14}", "preset");
    for freq in BAND_FREQUENCIES {
        if freq >= 1000.0 {
            print!("{:>6}", format!("{}k", freq / 1000.0));
        } else {
            print!("{freq:>6}");
        }
    }
    println!();

    for name in PRESET_NAMES {
        let gains = preset_gains(name).expect("preset table is consistent");
        print!("{name:<14}");
        for gain in gains {
            print!("{gain:>6}");
        }
        println!();
    }

    println!("\nGains in dB per band; bands are clamped to ±12 dB.");
    Ok(())
}
