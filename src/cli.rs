use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

/// Where Io, Europa, Ganymede and Callisto sit relative to Jupiter, right now.
#[derive(Debug, Parser)]
#[command(name = "galilean", version)]
pub(crate) struct Cli {
    /// Line width in columns
    #[arg(long)]
    pub(crate) width: Option<usize>,

    /// Text drawn for Jupiter in the middle of the line
    #[arg(long)]
    pub(crate) glyph: Option<String>,

    /// Columns per Jupiter radius, before magnification
    #[arg(long)]
    pub(crate) scale: Option<f64>,

    /// Extra multiplier applied after scale
    #[arg(long)]
    pub(crate) magnification: Option<f64>,

    /// Milliseconds between updates
    #[arg(long)]
    pub(crate) interval_ms: Option<u64>,

    /// JSON file with any of the settings above
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Start the clock at this instant (RFC 3339) instead of now
    #[arg(long, value_name = "TIME", value_parser = parse_instant)]
    pub(crate) at: Option<DateTime<Utc>>,

    /// Print a single frame to stdout and exit
    #[arg(long)]
    pub(crate) once: bool,
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 time such as 2026-10-18T21:00:00Z: {e}"))
}
