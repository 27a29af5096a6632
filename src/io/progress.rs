//! Progress reporting and cooperative cancellation for running operations.
//!
//! Operations never print. They emit [`ProgressEvent`] values into a
//! [`ProgressSink`]; what happens to an event is the consumer's business.
//! Two sinks are provided: `Vec<ProgressEvent>` collects events in place
//! (direct calls, tests) and `crossbeam_channel::Sender<ProgressEvent>`
//! forwards them across the worker boundary for the job runner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One progress update from a running split or join operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Completion percentage, 0..=100.
    pub percent: u8,
    /// Human-readable description of the step just finished.
    pub message: String,
}

impl ProgressEvent {
    pub fn new(percent: u8, message: impl Into<String>) -> Self {
        ProgressEvent {
            percent,
            message: message.into(),
        }
    }
}

/// Destination for progress events.
///
/// Emission must never fail the operation; a sink that has lost its
/// consumer drops events silently.
pub trait ProgressSink {
    fn emit(&mut self, event: ProgressEvent);
}

impl ProgressSink for Vec<ProgressEvent> {
    fn emit(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}

impl ProgressSink for crossbeam_channel::Sender<ProgressEvent> {
    /// A disconnected receiver is not an error; the operation runs to
    /// completion regardless.
    fn emit(&mut self, event: ProgressEvent) {
        let _ = self.send(event);
    }
}

/// Integer completion percentage: `floor(done * 100 / total)`, capped at 100.
///
/// `total == 0` reports 100 so that degenerate inputs still terminate at the
/// final percentage.
pub fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (u128::from(done) * 100 / u128::from(total)).min(100) as u8
}

/// Shared cancellation flag, checked between part iterations.
///
/// Cloning hands out another handle to the same flag. The default flag is
/// not cancelled and never will be unless someone holds a clone.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag::default()
    }

    /// Requests cancellation; takes effect at the next part boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
