//! Persistent profile store.
//!
//! The whole document lives in a single JSON file (`~/.config/themes.json` by
//! default). Top-level keys are profile names, plus an optional `enabled`
//! pointer naming the profile currently applied to the desktop:
//!
//! ```json
//! {
//!   "enabled": "dark",
//!   "dark": {
//!     "gtk": "Adwaita-dark",
//!     "xfwm": "Default-xhdpi",
//!     "icons": "elementary-xfce-dark",
//!     "cursor": "Adwaita",
//!     "wallpapers": {
//!       "/backdrop/screen0/monitoreDP-1/workspace0/last-image": "/usr/share/backgrounds/night.png"
//!     }
//!   }
//! }
//! ```
//!
//! The file is rewritten in place on every save. The write is not atomic and
//! there is no locking: a crash mid-write can corrupt the file, and two
//! concurrent invocations race with the last writer winning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};

/// Top-level key holding the enabled-profile pointer
pub const ENABLED_KEY: &str = "enabled";

/// A named snapshot of the desktop's appearance properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "gtk")]
    pub gtk_theme: String,

    /// Window manager theme; falls back to `gtk_theme` when applied
    #[serde(rename = "xfwm", default, skip_serializing_if = "Option::is_none")]
    pub window_manager_theme: Option<String>,

    #[serde(rename = "icons")]
    pub icon_theme: String,

    #[serde(rename = "cursor")]
    pub cursor_theme: String,

    /// Wallpaper image per workspace, keyed by property path
    #[serde(default)]
    pub wallpapers: BTreeMap<String, String>,
}

impl Profile {
    /// The window manager theme that applying this profile will set
    pub fn resolved_window_manager_theme(&self) -> &str {
        self.window_manager_theme
            .as_deref()
            .unwrap_or(&self.gtk_theme)
    }

    /// Describe every field where `live` differs from this stored profile
    pub fn drift(&self, live: &Profile) -> Vec<String> {
        let fields = [
            ("gtk", self.gtk_theme.as_str(), live.gtk_theme.as_str()),
            (
                "xfwm",
                self.resolved_window_manager_theme(),
                live.resolved_window_manager_theme(),
            ),
            ("icons", self.icon_theme.as_str(), live.icon_theme.as_str()),
            ("cursor", self.cursor_theme.as_str(), live.cursor_theme.as_str()),
        ];

        let mut changes: Vec<String> = fields
            .iter()
            .filter(|(_, stored, current)| stored != current)
            .map(|(label, stored, current)| format!("{label}: {stored} -> {current}"))
            .collect();

        for (path, stored) in &self.wallpapers {
            match live.wallpapers.get(path) {
                Some(current) if current != stored => {
                    changes.push(format!("{path}: {stored} -> {current}"));
                }
                Some(_) => {}
                None => changes.push(format!("{path}: workspace no longer present")),
            }
        }
        for (path, current) in &live.wallpapers {
            if !self.wallpapers.contains_key(path) {
                changes.push(format!("{path}: new workspace ({current})"));
            }
        }

        changes
    }
}

/// The persisted document: every profile plus the enabled-profile pointer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<String>,

    #[serde(flatten)]
    pub profiles: BTreeMap<String, Profile>,
}

impl ConfigDocument {
    /// The enabled profile name, treating an empty string as unset
    pub fn enabled_name(&self) -> Option<&str> {
        self.enabled.as_deref().filter(|name| !name.is_empty())
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled_name() == Some(name)
    }
}

/// Result of reading the config file, keeping "absent" apart from "broken"
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file was read and parsed
    Loaded(ConfigDocument),
    /// No file exists yet
    Missing,
    /// The file exists but could not be read or parsed
    Invalid(ThemeError),
}

impl LoadOutcome {
    /// Collapse to a document, substituting an empty one for any failure
    pub fn into_document(self) -> ConfigDocument {
        match self {
            Self::Loaded(doc) => doc,
            Self::Missing => ConfigDocument::default(),
            Self::Invalid(err) => {
                log::warn!("ignoring unreadable config, starting empty: {err}");
                ConfigDocument::default()
            }
        }
    }

    /// Collapse to a document, but surface read/parse failures
    pub fn into_strict(self) -> Result<ConfigDocument> {
        match self {
            Self::Loaded(doc) => Ok(doc),
            Self::Missing => Ok(ConfigDocument::default()),
            Self::Invalid(err) => Err(err),
        }
    }
}

/// Loads and saves the [`ConfigDocument`] at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, reporting whether it was absent or broken
    pub fn load_or_default(&self) -> LoadOutcome {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return LoadOutcome::Missing,
            Err(source) => {
                return LoadOutcome::Invalid(ThemeError::ConfigRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str(&content) {
            Ok(doc) => LoadOutcome::Loaded(doc),
            Err(source) => LoadOutcome::Invalid(ThemeError::ConfigParse {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Read the document; a missing or malformed file yields an empty one
    pub fn load(&self) -> ConfigDocument {
        self.load_or_default().into_document()
    }

    /// Overwrite the file with `doc` (pretty JSON, sorted keys)
    pub fn save(&self, doc: &ConfigDocument) -> Result<()> {
        let write_err = |source| ThemeError::ConfigWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut content = serde_json::to_string_pretty(doc).map_err(|source| {
            ThemeError::ConfigWrite {
                path: self.path.clone(),
                source: source.into(),
            }
        })?;
        content.push('\n');

        fs::write(&self.path, content).map_err(write_err)?;
        log::debug!("wrote {} profile(s) to {:?}", doc.profiles.len(), self.path);
        Ok(())
    }
}
