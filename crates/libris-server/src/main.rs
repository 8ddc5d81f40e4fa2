use std::process::ExitCode;

use clap::Parser;

use libris_server::cli::{self, Cli};

fn main() -> ExitCode {
    let args = Cli::parse();
    libris_core::tracing::init_tracing();

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "libris failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
