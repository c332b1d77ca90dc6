use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event;

use crate::game::{Event, EventSource, Frame, TickTimer};
use crate::input::map_key;

pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    /// Switches to the game screen. On failure whatever was already switched
    /// is put back before the error is returned.
    pub fn setup(&mut self) -> Result<()> {
        let res = self.enter();
        if res.is_err() {
            let _ = self.restore();
        }
        res
    }

    /// Puts the terminal back. Every step is attempted even if an earlier
    /// one fails; the first error is returned.
    pub fn restore(&mut self) -> Result<()> {
        let raw = self.set_raw_mode(false);
        let visible = self.set_cursor_visibility(true);
        let blink = self.set_cursor_blink(true);
        let screen =
            execute!(self.stdout, LeaveAlternateScreen).context("leaving alternate screen");

        first_error([raw, visible, blink, screen])
    }

    ///////////////////////////////////////////////////////////////////////////

    fn enter(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("entering alternate screen")?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)?;
        Ok(())
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.context("setting raw mode")
    }

    fn set_cursor_blink(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        };

        res.context("setting cursor blink")
    }

    fn set_cursor_visibility(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.context("setting cursor visibility")
    }
}

fn first_error<I: IntoIterator<Item = Result<()>>>(results: I) -> Result<()> {
    results.into_iter().collect()
}

impl Frame for TermManager {
    fn draw(&mut self, frame: &str) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("clearing screen")?;

        // Raw mode doesn't return the carriage on '\n', so place each line
        for (y, line) in frame.lines().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16), style::Print(line))
                .context("drawing frame")?;
        }

        self.stdout.flush().context("flushing frame")
    }
}

/// Raw terminal input: wait for an event with a timeout, or read one.
pub trait RawInput {
    fn poll(&mut self, wait: Duration) -> Result<bool>;
    fn read(&mut self) -> Result<event::Event>;
}

pub struct Crossterm;

impl RawInput for Crossterm {
    fn poll(&mut self, wait: Duration) -> Result<bool> {
        event::poll(wait).context("polling for input")
    }

    fn read(&mut self) -> Result<event::Event> {
        event::read().context("reading input")
    }
}

/// Keyboard events from the terminal, multiplexed with the tick timer.
pub struct TermEvents<I = Crossterm> {
    input: I,
}

impl TermEvents {
    pub fn new() -> Self {
        TermEvents { input: Crossterm }
    }
}

impl<I: RawInput> EventSource for TermEvents<I> {
    fn next_event(&mut self, timer: &TickTimer) -> Result<Event> {
        loop {
            let raw = match timer.remaining() {
                Some(wait) if wait.is_zero() => return Ok(Event::Tick),
                Some(wait) => {
                    if !self.input.poll(wait)? {
                        return Ok(Event::Tick);
                    }
                    self.input.read()?
                }
                None => self.input.read()?,
            };

            if let event::Event::Key(key) = raw {
                if let Some(command) = map_key(key) {
                    return Ok(Event::Key(command));
                }
            }
        }
    }
}
