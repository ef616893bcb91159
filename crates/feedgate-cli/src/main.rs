use clap::Parser;
use feedgate_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    if let Err(err) = cli.run() {
        eprintln!("feedgate error: {:#}", err);
        std::process::exit(1);
    }
}
