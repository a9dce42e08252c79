//! Task runner performing the blocking I/O behind [`Task`]s.
//!
//! Each spawned task runs on its own thread and posts its completion to the
//! event loop's queue. The loop never waits on a task directly, so a quit key
//! is honored even while the index download is still running.
//!
//! Spans are carried across the thread boundary: the spawning span becomes the
//! parent of the task span, so log lines from the worker nest under the event
//! that requested the work.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::app::Event;
use crate::domain::error::Result;
use crate::infrastructure::clipboard::CopySink;
use crate::infrastructure::index::IndexProvider;
use crate::worker::{Task, TaskEvent};

/// Executes tasks against an index provider and a copy sink.
#[derive(Clone)]
pub struct TaskRunner {
    index: Arc<dyn IndexProvider>,
    sink: Arc<dyn CopySink>,
}

impl std::fmt::Debug for TaskRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRunner").finish_non_exhaustive()
    }
}

impl TaskRunner {
    /// Creates a runner over the given collaborators.
    pub fn new(index: Arc<dyn IndexProvider>, sink: Arc<dyn CopySink>) -> Self {
        Self { index, sink }
    }

    /// Runs `task` on the calling thread and returns its completion.
    #[must_use]
    pub fn execute(&self, task: &Task) -> TaskEvent {
        let _span = tracing::debug_span!("execute_task", task = task.name()).entered();

        match task {
            Task::Load => Self::handle_result("load index", self.index.fetch(), |entries| {
                tracing::info!(entry_count = entries.len(), "index loaded");
                TaskEvent::LoadCompleted { entries }
            })
            .unwrap_or_else(|error| TaskEvent::LoadFailed { error }),
            Task::Copy { text } => Self::handle_result("copy to clipboard", self.sink.copy(text), |()| {
                TaskEvent::CopyCompleted { text: text.clone() }
            })
            .unwrap_or_else(|error| TaskEvent::CopyFailed { error }),
        }
    }

    /// Logs the outcome of an operation and maps success into a completion.
    fn handle_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> Result<TaskEvent>
    where
        F: FnOnce(T) -> TaskEvent,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "task operation successful");
                Ok(on_success(value))
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "task operation failed");
                Err(e)
            }
        }
    }

    /// Runs `task` on a new thread and posts its completion to `events`.
    ///
    /// A closed queue means the loop already exited; the completion is dropped.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn spawn(&self, task: Task, events: Sender<Event>) -> Result<()> {
        let runner = self.clone();
        let parent = tracing::Span::current();

        std::thread::Builder::new()
            .name(format!("task-{}", task.name()))
            .spawn(move || {
                let _parent = parent.enter();
                let completion = runner.execute(&task);
                if events.send(Event::Task(completion)).is_err() {
                    tracing::debug!(task = task.name(), "event loop gone, dropping completion");
                }
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entry, GopkgError};
    use std::sync::mpsc;
    use std::sync::Mutex;

    struct StaticIndex(Vec<&'static str>);

    impl IndexProvider for StaticIndex {
        fn fetch(&self) -> Result<Vec<Entry>> {
            Ok(self.0.iter().map(|id| Entry::new(*id)).collect())
        }
    }

    struct BrokenIndex;

    impl IndexProvider for BrokenIndex {
        fn fetch(&self) -> Result<Vec<Entry>> {
            Err(GopkgError::Transport("connection refused".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<String>>);

    impl CopySink for RecordingSink {
        fn copy(&self, text: &str) -> Result<()> {
            self.0.lock().map_err(|e| GopkgError::Config(e.to_string()))?.push(text.to_string());
            Ok(())
        }
    }

    fn runner(index: impl IndexProvider + 'static) -> (TaskRunner, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (TaskRunner::new(Arc::new(index), sink.clone()), sink)
    }

    #[test]
    fn load_reports_entries() {
        let (runner, _) = runner(StaticIndex(vec!["foo/bar", "qux"]));
        match runner.execute(&Task::Load) {
            TaskEvent::LoadCompleted { entries } => assert_eq!(entries.len(), 2),
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[test]
    fn load_failure_keeps_cause() {
        let (runner, _) = runner(BrokenIndex);
        match runner.execute(&Task::Load) {
            TaskEvent::LoadFailed { error } => assert_eq!(error.to_string(), "connection refused"),
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[test]
    fn copy_hands_text_to_sink() {
        let (runner, sink) = runner(StaticIndex(vec![]));
        let completion = runner.execute(&Task::Copy { text: "foo/bar".to_string() });
        assert!(matches!(completion, TaskEvent::CopyCompleted { ref text } if text == "foo/bar"));
        assert_eq!(*sink.0.lock().unwrap(), vec!["foo/bar".to_string()]);
    }

    #[test]
    fn spawned_task_posts_exactly_one_completion() {
        let (runner, _) = runner(StaticIndex(vec!["a"]));
        let (tx, rx) = mpsc::channel();
        runner.spawn(Task::Load, tx).unwrap();

        let event = rx.recv().unwrap();
        assert!(matches!(event, Event::Task(TaskEvent::LoadCompleted { .. })));
        // sender dropped with the thread, nothing else arrives
        assert!(rx.recv().is_err());
    }
}
