//! eeprom25 - host-side tool for 25-series SPI EEPROM images
//!
//! Reads and writes EEPROM image files by running the real driver core
//! (`eeprom25-core`) over the in-memory device simulator (`eeprom25-sim`),
//! so every operation goes through the same command protocol firmware
//! uses: WREN/WRDI bracketing, page-bounded writes and WIP polling.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::Read {
            device,
            addr,
            len,
            output,
        } => commands::read::run_read(&device, addr, len, output.as_deref()),
        Commands::Write {
            device,
            addr,
            input,
            data,
        } => commands::write::run_write(&device, addr, input.as_deref(), data.as_deref()),
        Commands::Dump { device, output } => commands::dump::run_dump(&device, output.as_deref()),
    }
}
