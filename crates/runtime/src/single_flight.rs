use std::fmt;
use std::future::Future;

use futures_util::future::{FutureExt, LocalBoxFuture, Shared};

/// Handle to a memoized task. Cloning it is cheap; every clone resolves to
/// the same output.
pub type SharedTask<T> = Shared<LocalBoxFuture<'static, T>>;

/// Starts an async task at most once and hands every caller a handle to it.
///
/// The claim happens synchronously inside [`SingleFlight::get_or_start`], so
/// re-entrant callers that arrive while the first task is still pending join
/// it instead of starting a second one. Single-threaded by construction
/// (`LocalBoxFuture`), matching the browser event loop.
pub struct SingleFlight<T: Clone + 'static> {
    task: Option<SharedTask<T>>,
}

impl<T: Clone + 'static> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> SingleFlight<T> {
    pub fn new() -> Self {
        Self { task: None }
    }

    pub fn is_started(&self) -> bool {
        self.task.is_some()
    }

    /// Return the existing task, or build one from `start` if none exists.
    ///
    /// `start` runs at most once per `SingleFlight`.
    pub fn get_or_start<F, Fut>(&mut self, start: F) -> SharedTask<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + 'static,
    {
        if let Some(task) = &self.task {
            return task.clone();
        }
        let task = start().boxed_local().shared();
        self.task = Some(task.clone());
        task
    }

    /// The output, once some caller has driven the task to completion.
    pub fn peek(&self) -> Option<&T> {
        self.task.as_ref().and_then(|t| t.peek())
    }
}

impl<T: Clone + 'static> fmt::Debug for SingleFlight<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleFlight")
            .field("started", &self.is_started())
            .field("ready", &self.peek().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::SingleFlight;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn starts_only_once() {
        let starts = Rc::new(Cell::new(0u32));
        let mut flight: SingleFlight<u32> = SingleFlight::new();

        for _ in 0..3 {
            let starts = starts.clone();
            let task = flight.get_or_start(move || {
                starts.set(starts.get() + 1);
                async { 7 }
            });
            assert_eq!(pollster::block_on(task), 7);
        }

        assert_eq!(starts.get(), 1);
    }

    #[test]
    fn pending_callers_join_the_first_task() {
        let mut flight: SingleFlight<String> = SingleFlight::new();
        let first = flight.get_or_start(|| async { "loaded".to_string() });
        let second = flight.get_or_start(|| async { "duplicate".to_string() });
        assert!(flight.is_started());
        assert!(flight.peek().is_none());

        assert_eq!(pollster::block_on(second), "loaded");
        assert_eq!(pollster::block_on(first), "loaded");
        assert_eq!(flight.peek().map(String::as_str), Some("loaded"));
    }

    #[test]
    fn debug_reports_progress() {
        let mut flight: SingleFlight<u8> = SingleFlight::new();
        assert_eq!(format!("{flight:?}"), "SingleFlight { started: false, ready: false }");
        let task = flight.get_or_start(|| async { 1 });
        pollster::block_on(task);
        assert_eq!(format!("{flight:?}"), "SingleFlight { started: true, ready: true }");
    }
}
