//! # slackhist CLI
//!
//! Command-line front-end for the slackhist library.

use std::process;

use clap::Parser;

use slackhist::archive;
use slackhist::cli::Args;
use slackhist::config::{ExportConfig, Timezone};
use slackhist::workbook::write_workbook;
use slackhist::SlackhistError;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), SlackhistError> {
    let args = Args::parse();

    let timezone: Timezone = args.timezone.parse()?;
    let config = ExportConfig::new().with_timezone(timezone);
    let output_path = args.output_path();

    println!("slackhist v{}", env!("CARGO_PKG_VERSION"));
    println!("Archive:  {}", args.archive.display());
    println!("Output:   {}", output_path.display());
    println!("Timezone: {}", timezone);
    println!();

    let assembler = archive::export(&args.archive, &config)?;
    let channels = assembler.channel_count();
    let messages = assembler.message_count();

    write_workbook(&assembler.finalize(), &output_path)?;

    println!(
        "Exported {} messages across {} channels to {}",
        messages,
        channels,
        output_path.display()
    );

    Ok(())
}
