use crate::cli::Cli;
use crate::render::{Layout, DEFAULT_GLYPH, DEFAULT_MAGNIFICATION, DEFAULT_SCALE, DEFAULT_WIDTH};
use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) width: usize,
    pub(crate) planet_glyph: String,
    pub(crate) scale: f64,
    pub(crate) magnification: f64,
    pub(crate) interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            planet_glyph: DEFAULT_GLYPH.to_string(),
            scale: DEFAULT_SCALE,
            magnification: DEFAULT_MAGNIFICATION,
            interval_ms: 1000,
        }
    }
}

impl Settings {
    /// Defaults, then the optional JSON file, then command-line overrides.
    pub(crate) fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => load_settings(path)?,
            None => Settings::default(),
        };
        if let Some(w) = cli.width {
            settings.width = w;
        }
        if let Some(g) = &cli.glyph {
            settings.planet_glyph = g.clone();
        }
        if let Some(s) = cli.scale {
            settings.scale = s;
        }
        if let Some(m) = cli.magnification {
            settings.magnification = m;
        }
        if let Some(ms) = cli.interval_ms {
            settings.interval_ms = ms;
        }
        settings.validate()?;
        debug!(?settings, "resolved settings");
        Ok(settings)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(self.width > 0, "width must be greater than zero");
        ensure!(!self.planet_glyph.is_empty(), "planet glyph must not be empty");
        ensure!(
            self.scale.is_finite(),
            "scale must be a finite number, got {}",
            self.scale
        );
        ensure!(
            self.magnification.is_finite(),
            "magnification must be a finite number, got {}",
            self.magnification
        );
        ensure!(self.interval_ms > 0, "tick interval must be greater than zero");
        Ok(())
    }

    pub(crate) fn layout(&self) -> Layout {
        Layout {
            width: self.width,
            planet_glyph: self.planet_glyph.clone(),
            scale: self.scale,
            magnification: self.magnification,
        }
    }

    pub(crate) fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

pub(crate) fn load_settings(path: &Path) -> Result<Settings> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    let settings = serde_json::from_str::<Settings>(&s)
        .with_context(|| format!("could not parse config file {}", path.display()))?;
    Ok(settings)
}
