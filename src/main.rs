mod app;
mod cli;
mod config;
mod ephemeris;
mod error;
mod model;
mod render;
mod term;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    init_tracing();
    app::run(cli::Cli::parse())
}

// stdout belongs to the scene, so diagnostics go to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("GALILEAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
