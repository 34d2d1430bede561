//! finexport - tabular export CLI
//!
//! Turns a JSON array of finance records into a downloadable file.
//!
//! ## Quick Start
//!
//! ```bash
//! # CSV into the download directory: investments_<today>.csv
//! finexport export investments.json --name investments
//!
//! # HTML report to stdout
//! cat investments.json | finexport export --format html --stdout
//!
//! # Write a default config file
//! finexport config init
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
