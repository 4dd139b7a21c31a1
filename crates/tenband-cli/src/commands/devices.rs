//! Audio device listing command.

use clap::Args;
use tenband_io::list_devices;

#[derive(Args)]
pub struct DevicesArgs {}

pub fn run(_args: DevicesArgs) -> anyhow::Result<()> {
    let devices = list_devices()?;

    if devices.is_empty() {
        println!("No audio devices found.");
        return Ok(());
    }

    println!("Audio devices:");
    for device in devices {
        let kind = match (device.is_input, device.is_output) {
            (true, true) => "in/out",
            (true, false) => "in",
            (false, true) => "out",
            (false, false) => "-",
        };
        println!(
            "  [{kind:>6}] {} ({} Hz)",
            device.name, device.default_sample_rate
        );
    }

    Ok(())
}
