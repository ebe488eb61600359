//! Transient notifications.
//!
//! The admin console surfaces mutation outcomes as short-lived toasts.
//! The queue lives in state; auto-dismissal runs through a delayed
//! [`Effect`](parkdeck_core::effect::Effect) so tests can observe it.

use std::time::Duration;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Neutral information.
    Info,
    /// A mutation went through.
    Success,
    /// Something degraded but recoverable.
    Warning,
    /// A mutation or load failed.
    Error,
}

impl ToastKind {
    /// How long a toast of this kind stays on screen.
    ///
    /// Errors and warnings linger a second longer than the rest.
    #[must_use]
    pub const fn display_duration(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_millis(3000),
            Self::Warning | Self::Error => Duration::from_millis(4000),
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Queue-unique id, used to dismiss this toast and no other.
    pub id: u64,
    /// Severity.
    pub kind: ToastKind,
    /// Text shown to the user.
    pub message: String,
}

/// Ordered queue of live toasts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toasts {
    entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    /// Empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Remove the toast with the given id, if it is still showing.
    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|toast| toast.id != id);
    }

    /// Live toasts, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }

    /// Whether anything is showing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
