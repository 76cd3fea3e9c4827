//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use swellmind_cli::CliError;

fn main() {
    match swellmind_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("swellmind: {err}");
            std::process::exit(1);
        }
    }
}
