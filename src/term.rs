use crate::app::{Frame, Interrupt, Surface};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Print, ResetColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

/// Owns the terminal while the session runs; dropping it restores the shell.
pub(crate) struct Terminal {
    out: io::Stdout,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        // Raw mode turns Ctrl+C into an ordinary key event.
        terminal::enable_raw_mode()?;
        let mut term = Self { out: io::stdout() };
        execute!(
            term.out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )?;
        Ok(term)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            EndSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl Surface for Terminal {
    fn present(&mut self, frame: &Frame) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate, Clear(ClearType::All))?;
        for (y, line) in frame.lines().iter().enumerate() {
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            queue!(self.out, cursor::MoveTo(0, y), Print(line))?;
        }
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Interrupt for Terminal {
    fn wait(&mut self, timeout: Duration) -> anyhow::Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Ok(false);
            }
            if event::poll(left)? {
                if let Event::Key(k) = event::read()? {
                    if is_stop_key(&k) {
                        return Ok(true);
                    }
                }
            }
        }
    }
}

fn is_stop_key(k: &KeyEvent) -> bool {
    if k.kind != KeyEventKind::Press {
        return false;
    }
    match k.code {
        KeyCode::Char('c') | KeyCode::Char('C') => k.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_q_and_esc_stop() {
        assert!(is_stop_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(is_stop_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_stop_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
    }

    #[test]
    fn plain_c_does_not_stop() {
        assert!(!is_stop_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_stop_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
