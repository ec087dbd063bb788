use std::process::ExitCode;

use clap::Parser;
use grammar_prep::cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(message) => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
