//! PIX BR Code batch CLI
//!
//! Reads payment requests from CSV and writes one BR Code payload per valid
//! row to stdout as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.csv > payloads.csv
//! cat requests.csv | cargo run -- - > payloads.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use pix_brcode::{BatchEncoder, PixError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(PixError::MissingArgument);
    }

    let mut batch = BatchEncoder::new();
    let input_path = &args[1];
    if input_path == "-" {
        batch.process_csv(io::stdin().lock())?;
    } else {
        let file = File::open(input_path)?;
        batch.process_csv(BufReader::new(file))?;
    }

    let stdout = io::stdout();
    let handle = stdout.lock();
    batch.write_output(handle)?;

    Ok(())
}
