//! Expiry scheduling
//!
//! The store arms one action per note and keeps the returned [`ExpiryHandle`]
//! next to the note. Cancelling or dropping the handle disarms the action, so
//! removing a note from the table is enough to guarantee its timer never
//! fires afterwards.

use futures::future::BoxFuture;
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// Deferred work run when a deadline passes
pub type ExpiryAction = BoxFuture<'static, ()>;

/// Something that can run an action at (or promptly after) a deadline
pub trait Scheduler: Send + Sync {
    /// Arm `action` to run no earlier than `deadline`
    fn schedule(&self, deadline: Instant, action: ExpiryAction) -> ExpiryHandle;
}

/// Owns the cancellation of exactly one armed action
///
/// Dropping the handle cancels the action. Cancelling an action that has
/// already run is a no-op.
#[derive(Debug)]
pub struct ExpiryHandle {
    abort: Option<AbortHandle>,
}

impl ExpiryHandle {
    pub fn new(abort: AbortHandle) -> Self {
        Self { abort: Some(abort) }
    }

    /// Disarm the action
    pub fn cancel(mut self) {
        self.disarm();
    }

    /// Whether the action has finished or been cancelled
    pub fn is_finished(&self) -> bool {
        self.abort.as_ref().map(|a| a.is_finished()).unwrap_or(true)
    }

    fn disarm(&mut self) {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
    }
}

impl Drop for ExpiryHandle {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// One tokio task per armed action, sleeping until its deadline
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, deadline: Instant, action: ExpiryAction) -> ExpiryHandle {
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            action.await;
        });
        ExpiryHandle::new(task.abort_handle())
    }
}
