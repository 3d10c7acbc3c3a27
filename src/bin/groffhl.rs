//! groffhl
//!
//! Reads text with ANSI 24-bit color escapes from files or stdin and writes
//! groff input to stdout.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use groffhl::app::{CliArgs, Config};
use groffhl::driver::{self, ExitStatus, Input};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the converted documents
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match Config::load_with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("groffhl: {}", e);
            return ExitStatus::Fatal.into();
        },
    };
    tracing::debug!(?config, "loaded configuration");

    let inputs = Input::from_args(&args.files);
    let summary = driver::run(&inputs, &config, io::stdout().lock(), io::stderr());
    tracing::debug!(
        converted = summary.converted,
        skipped = summary.skipped.len(),
        "finished"
    );

    summary.status().into()
}
