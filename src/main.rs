//! Binary entrypoint for the `extbundle` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match extbundle::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
