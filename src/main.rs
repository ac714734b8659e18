//! CLI entry point for element extraction and composition

use clap::Parser;
use tilecut::io::cli::{Cli, Runner, init_logging};

fn main() -> tilecut::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    Runner::new(cli).run()
}
