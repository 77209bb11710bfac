//! ingot-pivot: Normalize a CSV grid into a nested JSON mapping
//!
//! Usage:
//!   # Read from file, output to stdout
//!   ingot-pivot people.csv
//!
//!   # Read from stdin
//!   cat people.csv | ingot-pivot
//!
//!   # Force an orientation when the inference heuristic guesses wrong
//!   ingot-pivot --orient wide people.csv
//!
//!   # Compact output for machine consumption
//!   ingot-pivot --compact people.csv

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use ingot::table::{self, Orientation};
use std::fs::File;
use std::io::Read;

#[derive(Parser, Debug)]
#[command(name = "ingot-pivot")]
#[command(about = "Normalize a CSV grid into a nested JSON mapping", long_about = None)]
struct Args {
    /// Input CSV file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Grid orientation; inferred from the data if omitted
    #[arg(long, value_enum)]
    orient: Option<Orientation>,

    /// Emit compact JSON instead of pretty-printed output
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        Box::new(File::open(file_path)?)
    } else {
        Box::new(std::io::stdin())
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let table = table::normalize(&rows, args.orient)?;

    if args.compact {
        println!("{}", serde_json::to_string(&table)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&table)?);
    }

    Ok(())
}
