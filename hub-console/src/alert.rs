//! Operator alerts
//!
//! Views never return errors to their caller; they push an [`Alert`] and
//! move to a failed state. The CLI drains and prints alerts after each
//! command.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use shared::error::AppError;

/// Alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Error,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message for the operator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    /// Error code when raised from an [`AppError`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

/// Shared alert queue
#[derive(Debug, Clone, Default)]
pub struct Alerts {
    queue: Arc<Mutex<Vec<Alert>>>,
}

impl Alerts {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Alert>> {
        // A panicking pusher cannot leave the Vec half-written
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, level: AlertLevel, message: impl Into<String>) {
        self.lock().push(Alert {
            level,
            message: message.into(),
            code: None,
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(AlertLevel::Success, message);
    }

    /// Raise an error alert for `err`
    pub fn error(&self, err: &AppError) {
        tracing::warn!(code = %err.code, category = err.code.category().name(), "{}", err.message);
        self.lock().push(Alert {
            level: AlertLevel::Error,
            message: err.message.clone(),
            code: Some(err.code.code()),
        });
    }

    /// Take every pending alert
    pub fn drain(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.lock())
    }

    /// Copy of the pending alerts
    pub fn snapshot(&self) -> Vec<Alert> {
        self.lock().clone()
    }

    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(|a| a.level == AlertLevel::Error)
    }
}
