//! Event loop driving the selection engine.
//!
//! One thread owns the [`SelectionState`]. Keys, resizes and task completions
//! all arrive through a single channel and are applied one at a time with
//! [`transition`]; after each event the whole frame is redrawn. Side effects
//! requested by the transition are executed here: tasks are handed to the
//! [`TaskRunner`] and an exit stops the loop.
//!
//! ```text
//!  InputPump ──┐
//!              ├──▶ mpsc::Receiver<Event> ──▶ transition ──▶ Screen::draw
//!  TaskRunner ─┘                                  │
//!        ▲                                        │
//!        └──────────── Action::Spawn ◀────────────┘
//! ```

use std::sync::mpsc::{self, Receiver, Sender};

use crate::app::{transition, Action, Event, SelectionState};
use crate::domain::error::{GopkgError, Result};
use crate::infrastructure::terminal::Screen;
use crate::ui::{render, FinalMessage, Theme};
use crate::worker::{Task, TaskEvent, TaskRunner};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Process exit code.
    pub code: i32,
    /// Message to print once the terminal is restored.
    pub message: Option<FinalMessage>,
}

/// Single-threaded event loop over a [`Screen`].
pub struct EventLoop<S: Screen> {
    screen: S,
    runner: TaskRunner,
    theme: Theme,
    source: String,
    sender: Sender<Event>,
    receiver: Receiver<Event>,
}

impl<S: Screen> EventLoop<S> {
    /// Creates a loop drawing to `screen` and running tasks on `runner`.
    ///
    /// `source` names the index in the loading frame.
    pub fn new(screen: S, runner: TaskRunner, theme: Theme, source: impl Into<String>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            screen,
            runner,
            theme,
            source: source.into(),
            sender,
            receiver,
        }
    }

    /// A handle for feeding events into the loop, e.g. from the input thread.
    #[must_use]
    pub fn sender(&self) -> Sender<Event> {
        self.sender.clone()
    }

    /// Gives back the screen, e.g. to restore the terminal.
    pub fn into_screen(self) -> S {
        self.screen
    }

    /// Runs until a transition emits [`Action::Exit`].
    ///
    /// The index load is started immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if a frame cannot be drawn.
    pub fn run(&mut self, initial: SelectionState) -> Result<Outcome> {
        let _span = tracing::info_span!("event_loop", source = %self.source).entered();

        let mut state = initial;
        self.draw(&state)?;
        self.execute(Action::Spawn(Task::Load));

        loop {
            let Ok(event) = self.receiver.recv() else {
                // unreachable while self.sender is alive
                return Err(GopkgError::Terminal("event queue closed".to_string()));
            };

            let (next, actions) = transition(state, event);
            state = next;
            self.draw(&state)?;

            for action in actions {
                if let Some(code) = self.execute(action) {
                    tracing::info!(code, "event loop exiting");
                    let message = state.final_message.clone().map(|message| FinalMessage {
                        message,
                        failed: state.failed,
                    });
                    return Ok(Outcome { code, message });
                }
            }
        }
    }

    /// Executes one action; returns the exit code for [`Action::Exit`].
    fn execute(&self, action: Action) -> Option<i32> {
        match action {
            Action::Exit { code } => Some(code),
            Action::Spawn(task) => {
                tracing::debug!(task = task.name(), "spawning task");
                let fallback = task.clone();
                if let Err(error) = self.runner.spawn(task, self.sender.clone()) {
                    tracing::warn!(error = %error, "failed to spawn task");
                    let completion = match fallback {
                        Task::Load => TaskEvent::LoadFailed { error },
                        Task::Copy { .. } => TaskEvent::CopyFailed { error },
                    };
                    // the receiver lives in self, so this cannot fail
                    let _ = self.sender.send(Event::Task(completion));
                }
                None
            }
        }
    }

    fn draw(&mut self, state: &SelectionState) -> Result<()> {
        let frame = render(state, &self.theme, &self.source);
        self.screen.draw(&frame)
    }
}
