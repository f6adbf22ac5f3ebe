//! CLI entry point for Markov-chain image generation

use clap::Parser;
use markov_image::io::cli::{Cli, FileProcessor};
use markov_image::io::logging;

fn main() -> markov_image::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
