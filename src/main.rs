use std::io::{self, Write};

use clap::Parser;

use lead_parser::cli::{Args, run};
use lead_parser::config::ParserConfig;

fn main() {
    lead_parser::init_logger();

    let args = Args::parse();
    let config = ParserConfig::from_env();

    let mut stdout = io::stdout().lock();
    if let Err(e) = run(args, &config, &mut stdout) {
        let _ = writeln!(io::stderr(), "error: {e}");
        std::process::exit(1);
    }
}
