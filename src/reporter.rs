//! Centralized error reporting
//!
//! Both the dashboard controller and the enhancement watcher funnel their
//! recoverable failures through one `ErrorReporter`, so the catch-log-continue
//! policy lives in a single place instead of being repeated per method.

use crate::logging::LogLevel;
use chrono::Local;
use std::sync::{Arc, Mutex};

/// Phase during which a report was captured.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum ReportPhase {
    Aggregates,
    Kpis,
    Records,
    Navigation,
    Enhancement,
}

/// A captured, non-fatal failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub phase: ReportPhase,
    pub message: String,
    pub occurred_at: String,
}

impl ErrorInfo {
    fn new(phase: ReportPhase, message: String) -> Self {
        Self {
            phase,
            message,
            occurred_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Shared reporting handle. Cloning yields a handle to the same report log.
#[derive(Clone, Default)]
pub struct ErrorReporter {
    last: Arc<Mutex<Option<ErrorInfo>>>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure and emit it at the given severity. Returns the
    /// captured info so callers can surface it in state snapshots.
    pub fn report(&self, phase: ReportPhase, level: LogLevel, message: String) -> ErrorInfo {
        match level {
            LogLevel::Trace => log::trace!("{phase}: {message}"),
            LogLevel::Debug => log::debug!("{phase}: {message}"),
            LogLevel::Info => log::info!("{phase}: {message}"),
            LogLevel::Warn => log::warn!("{phase}: {message}"),
            LogLevel::Error => log::error!("{phase}: {message}"),
        }

        let info = ErrorInfo::new(phase, message);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(info.clone());
        }
        info
    }

    /// The most recent report, if any.
    pub fn last_report(&self) -> Option<ErrorInfo> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}
