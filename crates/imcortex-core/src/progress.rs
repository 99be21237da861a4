//! Progress reporting for batch loads

/// Polled between files of a batch
pub trait ProgressMonitor {
    /// True once the user asked to stop
    fn is_cancelled(&self) -> bool;

    /// `done` of `total` items finished; `current` is being processed
    fn progress(&mut self, done: usize, total: usize, current: &str);
}

/// Monitor that never cancels and reports nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressMonitor for NoProgress {
    fn is_cancelled(&self) -> bool {
        false
    }

    fn progress(&mut self, _done: usize, _total: usize, _current: &str) {}
}
