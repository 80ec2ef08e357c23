//! Transient notifications
//!
//! A toast becomes visible when shown and hides itself after a fixed delay.
//! Showing a newer toast cancels the pending hide of the previous one, and
//! dropping the notifier cancels any pending hide.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default time a toast stays visible
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2200);

/// Snapshot of the toast area
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToastState {
    /// Whether the toast is currently shown
    pub visible: bool,
    /// Most recent message, kept after hiding
    pub message: Option<String>,
}

#[derive(Debug, Default)]
struct ToastInner {
    state: ToastState,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Shows messages that auto-clear after a delay
#[derive(Debug)]
pub struct ToastNotifier {
    inner: Arc<Mutex<ToastInner>>,
    duration: Duration,
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastNotifier {
    /// Create a notifier with a visibility duration
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ToastInner::default())),
            duration,
        }
    }

    /// Show a message and schedule it to hide
    ///
    /// Outside a Tokio runtime the toast stays visible until the next one.
    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(message = %message, "Showing toast");

        let mut inner = self.inner.lock();
        inner.generation += 1;
        let generation = inner.generation;
        inner.state = ToastState {
            visible: true,
            message: Some(message),
        };
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }

        let weak = Arc::downgrade(&self.inner);
        let duration = self.duration;
        inner.timer = tokio::runtime::Handle::try_current()
            .ok()
            .map(|handle| handle.spawn(hide_after(weak, generation, duration)));
    }

    /// Current toast state
    #[must_use]
    pub fn current(&self) -> ToastState {
        self.inner.lock().state.clone()
    }
}

async fn hide_after(inner: Weak<Mutex<ToastInner>>, generation: u64, duration: Duration) {
    tokio::time::sleep(duration).await;
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut inner = inner.lock();
    if inner.generation == generation {
        inner.state.visible = false;
        inner.timer = None;
    }
}

impl Drop for ToastNotifier {
    fn drop(&mut self) {
        if let Some(timer) = self.inner.lock().timer.take() {
            timer.abort();
        }
    }
}
