//! Read command implementation

use crate::cli::DeviceArgs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Run the read command
pub fn run_read(
    device: &DeviceArgs,
    addr: u32,
    len: u32,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Reject the range before sizing a buffer for it
    super::check_range(device.size, addr, len)?;

    let mut dev = super::open_device(device)?;

    let mut data = vec![0u8; len as usize];
    dev.read(addr, &mut data)?;

    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(&data)?;
            println!("Wrote {} bytes to {}", data.len(), path.display());
        }
        None => super::hexdump(addr, &data),
    }

    Ok(())
}
