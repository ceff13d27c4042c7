//! Desktop notifications.
//!
//! Notifications are fire-and-forget: a missing or failing `notify-send` is
//! logged and otherwise ignored.

use std::fmt;
use std::process::{Command, Stdio};

/// A user-facing event raised by the profile manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved { name: String },
    Loading { name: String },
    AlreadyActive { name: String },
    NotFound { name: String },
    MissingName { action: &'static str },
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MissingName { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { name } => write!(f, "Saved current appearance as '{name}'"),
            Self::Loading { name } => write!(f, "Loading theme '{name}'"),
            Self::AlreadyActive { name } => write!(f, "Already on theme '{name}'"),
            Self::NotFound { name } => write!(f, "Theme '{name}' not found"),
            Self::MissingName { action } => write!(f, "Theme name missing for '{action}'"),
        }
    }
}

/// Sink for [`Notice`]s
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Sends notices through `notify-send`
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    program: String,
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self {
            program: "notify-send".to_string(),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notice: &Notice) {
        let urgency = if notice.is_error() { "critical" } else { "normal" };
        let result = Command::new(&self.program)
            .args(["-a", "xftheme", "-u", urgency, "Theme"])
            .arg(notice.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match result {
            Ok(status) if status.success() => {}
            Ok(status) => log::debug!("{} exited with {status}", self.program),
            Err(e) => log::debug!("could not run {}: {e}", self.program),
        }
    }
}

/// Drops every notice (`--no-notify`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, notice: &Notice) {
        log::debug!("notification suppressed: {notice}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text() {
        let notice = Notice::AlreadyActive {
            name: "dark".into(),
        };
        assert_eq!(notice.to_string(), "Already on theme 'dark'");

        let notice = Notice::NotFound {
            name: "sepia".into(),
        };
        assert_eq!(notice.to_string(), "Theme 'sepia' not found");
        assert!(notice.is_error());
    }

    #[test]
    fn test_missing_notifier_program_is_ignored() {
        let notifier = DesktopNotifier {
            program: "/nonexistent/notify-send".into(),
        };
        notifier.notify(&Notice::Loading {
            name: "light".into(),
        });
    }
}
