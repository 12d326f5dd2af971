//! Command implementations

pub mod dump;
pub mod read;
pub mod write;

use crate::cli::DeviceArgs;
use eeprom25_core::{Eeprom, EepromConfig, WaitMode};
use eeprom25_sim::{SimConfig, SimEeprom};
use std::fs;
use std::path::Path;

/// Validate user-supplied device geometry
///
/// The driver core treats geometry as a per-variant constant and only
/// debug-asserts it, so flag values have to be rejected here before they
/// reach the splitter or the 16-bit wire address field.
fn check_geometry(args: &DeviceArgs) -> Result<(), String> {
    if args.page_size == 0 || !args.page_size.is_power_of_two() {
        return Err(format!(
            "page size {} is not a power of two",
            args.page_size
        ));
    }
    if args.size == 0 {
        return Err("capacity must be non-zero".to_string());
    }
    if args.size > 1 << 16 {
        return Err(format!(
            "capacity 0x{:X} exceeds the 16-bit address space",
            args.size
        ));
    }
    if args.size % args.page_size != 0 {
        return Err(format!(
            "capacity 0x{:X} is not a multiple of the {}-byte page size",
            args.size, args.page_size
        ));
    }
    Ok(())
}

/// Validate a byte range against the configured capacity
///
/// Mirrors the driver's boundary rule so callers can reject a request
/// before sizing buffers for it.
pub fn check_range(size: u32, addr: u32, len: u32) -> Result<(), String> {
    if addr >= size || u64::from(addr) + u64::from(len) > u64::from(size) {
        return Err(format!(
            "range 0x{:04X}+{} exceeds device capacity 0x{:X}",
            addr, len, size
        ));
    }
    Ok(())
}

/// Open the driver over a simulated device backed by an image file
///
/// A missing image starts out erased (all 0xFF); a present one must fit
/// the configured capacity.
pub fn open_device(args: &DeviceArgs) -> Result<Eeprom<SimEeprom>, Box<dyn std::error::Error>> {
    check_geometry(args)?;

    let sim_config = SimConfig {
        size: args.size as usize,
        page_size: args.page_size as usize,
        ..SimConfig::default()
    };

    let sim = if args.image.exists() {
        let contents = fs::read(&args.image)?;
        if contents.len() > sim_config.size {
            return Err(format!(
                "image {} is {} bytes, device capacity is {}",
                args.image.display(),
                contents.len(),
                sim_config.size
            )
            .into());
        }
        log::debug!(
            "loaded {} bytes from {}",
            contents.len(),
            args.image.display()
        );
        SimEeprom::with_data(sim_config, &contents)
    } else {
        log::debug!("image {} not found, starting blank", args.image.display());
        SimEeprom::new(sim_config)
    };

    let config = EepromConfig {
        size: args.size,
        page_size: args.page_size,
        wait: if args.strict_wait {
            WaitMode::Strict
        } else {
            WaitMode::default()
        },
    };

    Ok(Eeprom::new(sim, config))
}

/// Persist the simulated device's memory back to the image file
pub fn save_device(
    device: Eeprom<SimEeprom>,
    image: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let sim = device.release();
    fs::write(image, sim.data())?;
    log::debug!("saved {} bytes to {}", sim.data().len(), image.display());
    Ok(())
}

/// Print a hexdump of `data`, addresses starting at `base`
pub fn hexdump(base: u32, data: &[u8]) {
    for (i, row) in data.chunks(16).enumerate() {
        let addr = base as usize + i * 16;
        print!("{:04X}:", addr);
        for byte in row {
            print!(" {:02X}", byte);
        }
        for _ in row.len()..16 {
            print!("   ");
        }
        print!("  |");
        for &byte in row {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            };
            print!("{}", c);
        }
        println!("|");
    }
}
