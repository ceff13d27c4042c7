//! Access to the Xfce property store.
//!
//! Every call is a blocking round trip to `xfconf-query`. The
//! [`PropertyGateway`] trait is the seam the rest of the crate depends on, so
//! the profile state machine can run against an in-memory store in tests.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, ThemeError};

/// Channel holding GTK, icon and cursor settings
pub const XSETTINGS: &str = "xsettings";
/// Channel holding the window manager settings
pub const XFWM4: &str = "xfwm4";
/// Channel holding desktop backgrounds
pub const DESKTOP: &str = "xfce4-desktop";

pub const THEME_NAME: &str = "/Net/ThemeName";
pub const WM_THEME: &str = "/general/theme";
pub const ICON_THEME_NAME: &str = "/Net/IconThemeName";
pub const CURSOR_THEME_NAME: &str = "/Gtk/CursorThemeName";

/// Substring marking a per-workspace wallpaper property
pub const LAST_IMAGE_MARKER: &str = "/last-image";

/// Default bound on a single `xfconf-query` invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Narrow get/set/list contract over the desktop property store
pub trait PropertyGateway {
    /// List every property path in `channel`
    fn list_properties(&self, channel: &str) -> Result<Vec<String>>;

    /// Read a single property as a string
    fn get_property(&self, channel: &str, path: &str) -> Result<String>;

    /// Write a single property
    fn set_property(&self, channel: &str, path: &str, value: &str) -> Result<()>;
}

/// [`PropertyGateway`] backed by the `xfconf-query` command
#[derive(Debug, Clone)]
pub struct XfconfQuery {
    program: String,
    timeout: Duration,
}

impl Default for XfconfQuery {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

struct Finished {
    success: bool,
    stdout: String,
    stderr: String,
}

impl XfconfQuery {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "xfconf-query".to_string(),
            timeout,
        }
    }

    /// Run a different executable with the same argument conventions
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn run(&self, args: &[&str]) -> Result<Finished> {
        let command = args.join(" ");
        log::debug!("{} {}", self.program, command);

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ThemeError::query_failed(&command, format!("failed to run {}: {e}", self.program))
            })?;

        // Drain both pipes on their own threads so a chatty child cannot block
        // on a full pipe while we wait for it.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let success = match wait_with_timeout(&mut child, self.timeout) {
            Ok(Some(success)) => success,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ThemeError::query_failed(
                    &command,
                    format!("timed out after {:?}", self.timeout),
                ));
            }
            Err(e) => return Err(ThemeError::query_failed(&command, e.to_string())),
        };

        Ok(Finished {
            success,
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        })
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

/// `Ok(Some(success))` when the child exits in time, `Ok(None)` on expiry
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<bool>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status.success()));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn diagnostic(out: &Finished) -> String {
    let stderr = out.stderr.trim();
    if stderr.is_empty() {
        out.stdout.trim().to_string()
    } else {
        stderr.to_string()
    }
}

impl PropertyGateway for XfconfQuery {
    fn list_properties(&self, channel: &str) -> Result<Vec<String>> {
        let out = self.run(&["-c", channel, "-l"])?;
        if !out.success {
            log::debug!("listing {channel} failed: {}", diagnostic(&out));
            return Err(ThemeError::InvalidChannel {
                channel: channel.to_string(),
            });
        }
        Ok(out.stdout.split_whitespace().map(str::to_string).collect())
    }

    fn get_property(&self, channel: &str, path: &str) -> Result<String> {
        let out = self.run(&["-c", channel, "-p", path])?;
        if !out.success {
            return Err(ThemeError::query_failed(
                format!("-c {channel} -p {path}"),
                diagnostic(&out),
            ));
        }
        Ok(out.stdout.trim().to_string())
    }

    fn set_property(&self, channel: &str, path: &str, value: &str) -> Result<()> {
        let out = self.run(&["-c", channel, "-p", path, "-s", value])?;
        if !out.success {
            return Err(ThemeError::query_failed(
                format!("-c {channel} -p {path} -s {value}"),
                diagnostic(&out),
            ));
        }
        Ok(())
    }
}
