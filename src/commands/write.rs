//! Write command implementation

use crate::cli::DeviceArgs;
use std::fs;
use std::path::Path;

/// Parse inline hex bytes ("deadbeef" or "de ad be ef")
fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, String> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() % 2 != 0 {
        return Err("odd number of hex digits".to_string());
    }
    (0..compact.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&compact[i..i + 2], 16)
                .map_err(|e| format!("invalid hex byte at offset {}: {}", i / 2, e))
        })
        .collect()
}

/// Run the write command
pub fn run_write(
    device: &DeviceArgs,
    addr: u32,
    input: Option<&Path>,
    data: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = match (input, data) {
        (Some(path), None) => fs::read(path)?,
        (None, Some(hex)) => parse_hex_bytes(hex)?,
        _ => return Err("exactly one of --input or --data is required".into()),
    };

    let mut dev = super::open_device(device)?;
    dev.write(addr, &bytes)?;
    super::save_device(dev, &device.image)?;

    println!("Wrote {} bytes at 0x{:04X}", bytes.len(), addr);
    Ok(())
}
