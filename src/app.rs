use crate::cli::Cli;
use crate::config::Settings;
use crate::ephemeris::{MeeusEphemeris, PositionProvider};
use crate::error::ComputationError;
use crate::model::Positions;
use crate::render::{render, Layout, Scene};
use crate::term::Terminal;
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};

pub(crate) const TITLE: &str = "Jupiter's Galilean Moons - Real-time Visualization";
pub(crate) const INSTRUCTIONS: &str = "(Press Ctrl+C to exit)";

/// Everything shown for one tick, top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    lines: Vec<String>,
}

impl Frame {
    pub(crate) fn new(positions: &Positions, scene: &Scene) -> Self {
        Self {
            lines: vec![
                format!("Raw positions: {positions}"),
                String::new(),
                TITLE.to_string(),
                INSTRUCTIONS.to_string(),
                String::new(),
                scene.label().to_string(),
                scene.symbols().to_string(),
            ],
        }
    }

    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }
}

pub(crate) trait Surface {
    /// Replaces whatever was shown before with `frame`.
    fn present(&mut self, frame: &Frame) -> anyhow::Result<()>;
}

pub(crate) trait Interrupt {
    /// Blocks for up to `timeout`; `true` means the user asked to stop.
    fn wait(&mut self, timeout: Duration) -> anyhow::Result<bool>;
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Clock {
    System,
    /// Real time shifted by a fixed amount.
    Offset(chrono::Duration),
}

impl Clock {
    pub(crate) fn starting_at(at: Option<DateTime<Utc>>) -> Self {
        match at {
            Some(t) => Clock::Offset(t - Utc::now()),
            None => Clock::System,
        }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Offset(d) => Utc::now() + *d,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum StopReason {
    Interrupted,
    Failed(ComputationError),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RunState {
    Running,
    Stopped(StopReason),
}

pub(crate) struct Session<P, S> {
    provider: P,
    screen: S,
    layout: Layout,
    interval: Duration,
    clock: Clock,
}

impl<P: PositionProvider, S: Surface + Interrupt> Session<P, S> {
    pub(crate) fn new(provider: P, screen: S, settings: &Settings, clock: Clock) -> Self {
        Self {
            provider,
            screen,
            layout: settings.layout(),
            interval: settings.interval(),
            clock,
        }
    }

    /// Compute, draw, then wait out the interval. A provider failure stops
    /// the session; screen I/O errors are returned as-is.
    pub(crate) fn tick(&mut self) -> anyhow::Result<RunState> {
        let at = self.clock.now();
        let positions = match self.provider.positions(at) {
            Ok(p) => p,
            Err(e) => return Ok(RunState::Stopped(StopReason::Failed(e))),
        };
        let scene = render(&positions, &self.layout);
        self.screen.present(&Frame::new(&positions, &scene))?;

        if self.screen.wait(self.interval)? {
            return Ok(RunState::Stopped(StopReason::Interrupted));
        }
        Ok(RunState::Running)
    }

    pub(crate) fn run(&mut self) -> anyhow::Result<StopReason> {
        let mut ticks = 0u64;
        loop {
            let state = self.tick()?;
            ticks += 1;
            if let RunState::Stopped(reason) = state {
                info!(ticks, ?reason, "session stopped");
                return Ok(reason);
            }
        }
    }

    #[cfg(test)]
    fn into_screen(self) -> S {
        self.screen
    }
}

pub(crate) fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = Settings::resolve(&cli)?;
    let clock = Clock::starting_at(cli.at);

    if cli.once {
        let mut out = io::stdout().lock();
        return match MeeusEphemeris.positions(clock.now()) {
            Ok(positions) => {
                let scene = render(&positions, &settings.layout());
                for line in Frame::new(&positions, &scene).lines() {
                    writeln!(out, "{line}")?;
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => Ok(report(&StopReason::Failed(e), &mut out)?),
        };
    }

    debug!(?clock, "starting session");
    let term = Terminal::begin()?;
    let mut session = Session::new(MeeusEphemeris, term, &settings, clock);
    let result = session.run();
    finish(session, result, &mut io::stdout().lock())
}

/// Restores the terminal by dropping the session, then prints the final message.
fn finish<P, S>(
    session: Session<P, S>,
    result: anyhow::Result<StopReason>,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    drop(session);
    let reason = result?;
    Ok(report(&reason, out)?)
}

fn report(reason: &StopReason, out: &mut impl Write) -> io::Result<ExitCode> {
    match reason {
        StopReason::Interrupted => {
            writeln!(out, "\nExiting...")?;
            Ok(ExitCode::SUCCESS)
        }
        StopReason::Failed(e) => {
            writeln!(out, "\nAn error occurred: {e}")?;
            writeln!(out, "{}", e.hint())?;
            Ok(ExitCode::FAILURE)
        }
    }
}
