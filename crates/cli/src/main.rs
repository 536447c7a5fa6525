use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use strata_allocator::{allocate, SplitConfig};

mod io;

#[derive(Parser)]
#[command(name = "strata-split")]
#[command(about = "Stratified train/dev/test splitting for packet corpora", long_about = None)]
#[command(version)]
struct Cli {
    /// Input file holding one JSON array of packets
    input: PathBuf,

    /// Minimum record count targeted for the test split
    #[arg(long, default_value_t = 1000)]
    test_min_records: usize,

    /// Minimum record count targeted for the dev split
    #[arg(long, default_value_t = 1000)]
    dev_min_records: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let packets = io::read_packets(&cli.input)?;
    let config = SplitConfig::with_minimums(cli.test_min_records, cli.dev_min_records);
    let allocation = allocate(packets, &config);
    io::write_splits(&cli.input, &allocation)?;
    Ok(())
}
