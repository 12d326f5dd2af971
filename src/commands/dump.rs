//! Dump command implementation

use crate::cli::DeviceArgs;
use std::path::Path;

/// Run the dump command - a whole-device read
pub fn run_dump(
    device: &DeviceArgs,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    super::read::run_read(device, 0, device.size, output)
}
