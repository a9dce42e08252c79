//! Terminal setup, key mapping and frame drawing on top of `crossterm`.
//!
//! The terminal runs in raw mode on the alternate screen while the selection
//! is active. [`TerminalScreen`] restores it when dropped, so an early return
//! or a panic unwinding through `main` still leaves a usable shell.

use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, MoveToNextLine, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::app::Event;
use crate::domain::error::{GopkgError, Result};

/// How long the input thread waits for a key before checking for shutdown.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A surface that shows whole frames.
pub trait Screen {
    /// Replaces the displayed frame with `lines`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the frame cannot be written.
    fn draw(&mut self, lines: &[String]) -> Result<()>;
}

/// The real terminal, in raw mode on the alternate screen.
pub struct TerminalScreen {
    out: Stdout,
    active: bool,
}

impl TerminalScreen {
    /// Enables raw mode and switches to the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns [`GopkgError::Terminal`] if the terminal cannot be configured.
    pub fn enter() -> Result<Self> {
        enable_raw_mode().map_err(|e| GopkgError::Terminal(format!("failed to enable raw mode: {e}")))?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(GopkgError::Terminal(format!("failed to enter alternate screen: {e}")));
        }

        tracing::debug!("terminal entered raw mode");
        Ok(Self { out, active: true })
    }

    /// Leaves the alternate screen and disables raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`GopkgError::Terminal`] if the terminal cannot be restored.
    pub fn restore(mut self) -> Result<()> {
        self.cleanup()
    }

    fn cleanup(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let screen = execute!(self.out, Show, LeaveAlternateScreen);
        let raw = disable_raw_mode();
        tracing::debug!("terminal restored");

        screen
            .and(raw)
            .map_err(|e| GopkgError::Terminal(format!("failed to restore terminal: {e}")))
    }
}

impl Screen for TerminalScreen {
    fn draw(&mut self, lines: &[String]) -> Result<()> {
        let width = terminal::size().map_or(usize::MAX, |(cols, _)| usize::from(cols));
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in lines {
            queue!(self.out, Print(clip_line(line, width)), MoveToNextLine(1))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            tracing::warn!(error = %e, "terminal cleanup on drop failed");
        }
    }
}

/// Cuts `line` to `width` visible characters.
///
/// Escape sequences are copied through without counting, including those after
/// the cut, so a trailing reset still applies.
#[must_use]
pub fn clip_line(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut visible = 0;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            out.push(c);
            if let Some(next) = chars.next() {
                out.push(next);
                if next == '[' {
                    // CSI ends at the first byte in '@'..='~'
                    for c in chars.by_ref() {
                        out.push(c);
                        if ('@'..='~').contains(&c) {
                            break;
                        }
                    }
                }
            }
        } else if visible < width {
            out.push(c);
            visible += 1;
        }
    }
    out
}

/// Maps a key press to an event, or `None` for keys without a binding.
///
/// | Key                   | Event          |
/// |-----------------------|----------------|
/// | `Ctrl+C`, `q`         | `KeyQuit`      |
/// | `Up`, `k`             | `KeyUp`        |
/// | `Down`, `j`           | `KeyDown`      |
/// | `Enter`               | `KeyConfirm`   |
/// | `Backspace`           | `KeyBackspace` |
/// | other printable char  | `KeyTyped`     |
///
/// Key releases and repeats reported by some platforms are ignored.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Event::KeyQuit),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Char('q') => Some(Event::KeyQuit),
        KeyCode::Up | KeyCode::Char('k') => Some(Event::KeyUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Event::KeyDown),
        KeyCode::Enter => Some(Event::KeyConfirm),
        KeyCode::Backspace => Some(Event::KeyBackspace),
        KeyCode::Char(c) if !c.is_control() => Some(Event::KeyTyped(c)),
        _ => None,
    }
}

/// Number of result rows that fit a terminal `height` rows tall.
///
/// ```rust
/// use gopkg_search::infrastructure::terminal::viewport_rows;
///
/// assert_eq!(viewport_rows(30, 10), 20);
/// assert_eq!(viewport_rows(5, 10), 1);
/// ```
#[must_use]
pub fn viewport_rows(height: u16, chrome_rows: usize) -> usize {
    usize::from(height).saturating_sub(chrome_rows).max(1)
}

/// Background thread forwarding terminal input into the event queue.
pub struct InputPump {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputPump {
    /// Starts reading keys and resizes, sending mapped events to `events`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn start(events: Sender<Event>, chrome_rows: usize) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = std::thread::Builder::new()
            .name("terminal-input".to_string())
            .spawn(move || {
                while !flag.load(Ordering::Relaxed) {
                    match event::poll(INPUT_POLL_INTERVAL) {
                        Ok(false) => continue,
                        Ok(true) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, "polling terminal input failed");
                            break;
                        }
                    }

                    let mapped = match event::read() {
                        Ok(TermEvent::Key(key)) => map_key(key),
                        Ok(TermEvent::Resize(_, height)) => {
                            Some(Event::ViewportResized(viewport_rows(height, chrome_rows)))
                        }
                        Ok(_) => None,
                        Err(e) => {
                            tracing::warn!(error = %e, "reading terminal input failed");
                            break;
                        }
                    };

                    if let Some(event) = mapped {
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                }
                tracing::debug!("input thread stopped");
            })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stops the thread and waits for it to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("input thread panicked");
            }
        }
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.shutdown();
    }
}
