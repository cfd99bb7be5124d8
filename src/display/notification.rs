//! Notification sinks
//!
//! [`ToastBoard`] keeps on-screen toasts and expires each one on its own
//! timer. [`TerminalSink`] prints a colored line to stderr and forgets it.

use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor, Stylize};
use crossterm::QueueableCommand;
use tracing::{trace, warn};

use crate::config::settings::NotificationSettings;
use crate::models::{NotificationEvent, NotificationId, Severity};

/// Accepts notifications for display
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity) -> NotificationId;
}

/// Get the terminal color for a severity
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Blue,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Lifecycle of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    /// Playing the exit animation; removed once it ends
    Exiting,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub event: NotificationEvent,
    pub phase: ToastPhase,
}

/// Stack of live toasts
///
/// Every toast gets an independent timer. There is no queue and no
/// de-duplication: concurrent toasts simply stack in arrival order.
#[derive(Debug, Clone)]
pub struct ToastBoard {
    toasts: Arc<Mutex<Vec<Toast>>>,
    timing: NotificationSettings,
}

impl ToastBoard {
    pub fn new(timing: NotificationSettings) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            timing,
        }
    }

    /// Snapshot of the toasts currently on screen, oldest first
    pub fn active(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Current phase of a toast, `None` once it has been removed
    pub fn phase(&self, id: NotificationId) -> Option<ToastPhase> {
        self.lock()
            .iter()
            .find(|toast| toast.event.id == id)
            .map(|toast| toast.phase)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn schedule_expiry(&self, id: NotificationId) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(%id, "no async runtime, toast will not expire");
            return;
        };

        let board = self.clone();
        runtime.spawn(async move {
            tokio::time::sleep(board.timing.visible()).await;
            if let Some(toast) = board.lock().iter_mut().find(|t| t.event.id == id) {
                toast.phase = ToastPhase::Exiting;
            }
            trace!(%id, "toast exiting");

            tokio::time::sleep(board.timing.exit()).await;
            board.lock().retain(|t| t.event.id != id);
            trace!(%id, "toast removed");
        });
    }
}

impl Default for ToastBoard {
    fn default() -> Self {
        Self::new(NotificationSettings::default())
    }
}

impl NotificationSink for ToastBoard {
    fn notify(&self, message: &str, severity: Severity) -> NotificationId {
        let event = NotificationEvent::new(message, severity);
        let id = event.id;
        self.lock().push(Toast {
            event,
            phase: ToastPhase::Visible,
        });
        self.schedule_expiry(id);
        id
    }
}

/// Writes one line per notification, e.g. `[+] Success: Saved`
pub struct TerminalSink {
    out: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl TerminalSink {
    /// Sink on stderr, colored when stderr is a terminal and `NO_COLOR` is unset
    pub fn stderr() -> Self {
        let color = io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::with_writer(Box::new(io::stderr()), color)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color,
        }
    }

    fn write_line(&self, message: &str, severity: Severity) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let prefix = format!("[{}] {}:", severity.icon(), severity.title());
        if self.color {
            out.queue(SetForegroundColor(severity_color(severity)))?
                .queue(Print(prefix.bold()))?
                .queue(ResetColor)?
                .queue(Print(format!(" {}\n", message)))?;
        } else {
            writeln!(out, "{} {}", prefix, message)?;
        }
        out.flush()
    }
}

impl NotificationSink for TerminalSink {
    fn notify(&self, message: &str, severity: Severity) -> NotificationId {
        let id = NotificationId::new();
        if let Err(e) = self.write_line(message, severity) {
            warn!(error = %e, "failed to write notification");
        }
        id
    }
}
