//! Command-line entry point.
//!
//! # Lifecycle
//!
//! 1. **Configure**: load config, start file logging, resolve the theme
//! 2. **Enter**: raw mode and alternate screen, start the input thread
//! 3. **Run**: event loop until quit, copy completion or failure
//! 4. **Restore**: leave the alternate screen, print the final message
//! 5. **Exit**: with the code decided by the run (0 or 1)
//!
//! # Keybindings
//!
//! - `Up`/`k`: move up
//! - `Down`/`j`: move down
//! - `Enter`: copy the selected module path and quit
//! - `Backspace`: delete the last query character
//! - `q`/`Ctrl+C`: quit
//! - anything printable: extend the query

#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;

use gopkg_search::app::Event;
use gopkg_search::infrastructure::{
    display_source, viewport_rows, HttpIndex, InputPump, SystemClipboard, TerminalScreen,
};
use gopkg_search::ui::components::render_final_message;
use gopkg_search::worker::TaskRunner;
use gopkg_search::{initialize, load_theme, observability, Config, EventLoop, Result};

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "gopkg-search failed");
            eprintln!("Error: {e}");
            1
        }
    };

    std::process::exit(code);
}

fn run() -> Result<i32> {
    let config = Config::load()?;
    let log_file = observability::init_tracing(&config);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        index_url = %config.index_url,
        log_file = ?log_file,
        "starting gopkg-search"
    );

    let theme = load_theme(&config);
    let index = HttpIndex::new(config.index_url.clone(), config.request_timeout())?;
    let runner = TaskRunner::new(Arc::new(index), Arc::new(SystemClipboard));

    let screen = TerminalScreen::enter()?;
    let mut event_loop = EventLoop::new(screen, runner, theme.clone(), display_source(&config.index_url));

    let sender = event_loop.sender();
    if let Ok((_, height)) = crossterm::terminal::size() {
        // the receiver is owned by event_loop, so this cannot fail
        let _ = sender.send(Event::ViewportResized(viewport_rows(height, config.chrome_rows)));
    }
    let input = InputPump::start(sender, config.chrome_rows)?;

    let result = event_loop.run(initialize(&config));

    input.stop();
    event_loop.into_screen().restore()?;

    let outcome = result?;
    if let Some(message) = &outcome.message {
        println!("{}", render_final_message(message, &theme));
    }

    tracing::info!(code = outcome.code, "gopkg-search finished");
    Ok(outcome.code)
}
