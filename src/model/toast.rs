//! Single-slot toast notifications with auto-dismiss
//!
//! Every `show` bumps a generation counter and schedules a hide for that
//! generation only, so a replaced toast's timer can never hide its successor.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);
const HISTORY_LIMIT: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub fn label(self) -> &'static str {
        match self {
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
            ToastKind::Info => "Info",
            ToastKind::Warning => "Warning",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: DateTime<Local>,
}

#[derive(Default)]
struct ToastSlot {
    current: Option<Toast>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    history: VecDeque<Toast>,
}

impl ToastSlot {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Shared handle to the one toast slot of the app
#[derive(Clone)]
pub struct ToastQueue {
    slot: Arc<Mutex<ToastSlot>>,
    duration: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(ToastSlot::default())),
            duration,
        }
    }

    /// Replace whatever is showing and restart the countdown
    pub async fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let toast = Toast {
            kind,
            message: message.into(),
            shown_at: Local::now(),
        };
        tracing::debug!(kind = kind.label(), message = %toast.message, "Showing toast");

        let mut slot = self.slot.lock().await;
        slot.cancel_timer();
        slot.generation += 1;
        let generation = slot.generation;

        if slot.history.len() == HISTORY_LIMIT {
            slot.history.pop_front();
        }
        slot.history.push_back(toast.clone());
        slot.current = Some(toast);

        let shared = self.slot.clone();
        let duration = self.duration;
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut slot = shared.lock().await;
            if slot.generation == generation {
                slot.current = None;
                slot.timer = None;
            }
        }));
    }

    pub async fn hide(&self) {
        let mut slot = self.slot.lock().await;
        slot.cancel_timer();
        slot.generation += 1;
        slot.current = None;
    }

    pub async fn current(&self) -> Option<Toast> {
        self.slot.lock().await.current.clone()
    }

    pub async fn is_visible(&self) -> bool {
        self.slot.lock().await.current.is_some()
    }

    /// Toasts shown so far, oldest first
    pub async fn history(&self) -> Vec<Toast> {
        self.slot.lock().await.history.iter().cloned().collect()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}
