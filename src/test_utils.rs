//! Test utilities shared across test modules
//!
//! Provides an in-memory property store and a notifier that records what it
//! was asked to show, so the profile logic can be exercised without an Xfce
//! session.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use tempfile::TempDir;

use crate::config::Profile;
use crate::error::{Result, ThemeError};
use crate::notify::{Notice, Notifier};
use crate::paths::Paths;
use crate::xfconf::{
    CURSOR_THEME_NAME, DESKTOP, ICON_THEME_NAME, PropertyGateway, THEME_NAME, WM_THEME, XFWM4,
    XSETTINGS,
};

/// Create a Paths struct pointing into a temporary directory
pub fn setup_test_paths(temp_dir: &TempDir) -> Paths {
    Paths::with_config_file(temp_dir.path().join(".config/themes.json"))
}

/// A successful `set_property` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCall {
    pub channel: String,
    pub path: String,
    pub value: String,
}

impl SetCall {
    pub fn new(channel: &str, path: &str, value: &str) -> Self {
        Self {
            channel: channel.to_string(),
            path: path.to_string(),
            value: value.to_string(),
        }
    }
}

/// In-memory property store
#[derive(Debug, Default)]
pub struct FakeGateway {
    channels: RefCell<BTreeMap<String, BTreeMap<String, String>>>,
    failing_gets: RefCell<HashSet<(String, String)>>,
    failing_sets: RefCell<HashSet<(String, String)>>,
    sets: RefCell<Vec<SetCall>>,
}

impl FakeGateway {
    pub const DEFAULT_ICONS: &'static str = "elementary-xfce";
    pub const DEFAULT_CURSOR: &'static str = "Adwaita";
    pub const DEFAULT_WALLPAPER: &'static str =
        "/backdrop/screen0/monitoreDP-1/workspace0/last-image";

    /// A desktop with one workspace and the given GTK theme and wallpaper
    pub fn desktop(gtk: &str, wallpaper: &str) -> Self {
        Self::default()
            .with(XSETTINGS, THEME_NAME, gtk)
            .with(XSETTINGS, ICON_THEME_NAME, Self::DEFAULT_ICONS)
            .with(XSETTINGS, CURSOR_THEME_NAME, Self::DEFAULT_CURSOR)
            .with(XFWM4, WM_THEME, gtk)
            .with(DESKTOP, Self::DEFAULT_WALLPAPER, wallpaper)
    }

    pub fn with(self, channel: &str, path: &str, value: &str) -> Self {
        self.put(channel, path, value);
        self
    }

    /// Change a property behind the tool's back, without recording a set
    pub fn put(&self, channel: &str, path: &str, value: &str) {
        self.channels
            .borrow_mut()
            .entry(channel.to_string())
            .or_default()
            .insert(path.to_string(), value.to_string());
    }

    pub fn remove(&self, channel: &str, path: &str) {
        if let Some(props) = self.channels.borrow_mut().get_mut(channel) {
            props.remove(path);
        }
    }

    pub fn value(&self, channel: &str, path: &str) -> Option<String> {
        self.channels
            .borrow()
            .get(channel)
            .and_then(|props| props.get(path).cloned())
    }

    pub fn fail_get(&self, channel: &str, path: &str) {
        self.failing_gets
            .borrow_mut()
            .insert((channel.to_string(), path.to_string()));
    }

    pub fn fail_set(&self, channel: &str, path: &str) {
        self.failing_sets
            .borrow_mut()
            .insert((channel.to_string(), path.to_string()));
    }

    /// Every set that went through, in order
    pub fn sets(&self) -> Vec<SetCall> {
        self.sets.borrow().clone()
    }
}

impl PropertyGateway for FakeGateway {
    fn list_properties(&self, channel: &str) -> Result<Vec<String>> {
        self.channels
            .borrow()
            .get(channel)
            .map(|props| props.keys().cloned().collect())
            .ok_or_else(|| ThemeError::InvalidChannel {
                channel: channel.to_string(),
            })
    }

    fn get_property(&self, channel: &str, path: &str) -> Result<String> {
        let key = (channel.to_string(), path.to_string());
        if self.failing_gets.borrow().contains(&key) {
            return Err(ThemeError::query_failed(path, "injected failure"));
        }
        self.value(channel, path).ok_or_else(|| {
            ThemeError::query_failed(path, format!("Property \"{path}\" does not exist"))
        })
    }

    fn set_property(&self, channel: &str, path: &str, value: &str) -> Result<()> {
        let key = (channel.to_string(), path.to_string());
        if self.failing_sets.borrow().contains(&key) {
            return Err(ThemeError::query_failed(path, "injected failure"));
        }
        self.put(channel, path, value);
        self.sets.borrow_mut().push(SetCall::new(channel, path, value));
        Ok(())
    }
}

/// A stored profile matching [`FakeGateway::desktop`] conventions
pub fn profile(gtk: &str, wallpaper: &str) -> Profile {
    Profile {
        gtk_theme: gtk.to_string(),
        window_manager_theme: None,
        icon_theme: FakeGateway::DEFAULT_ICONS.to_string(),
        cursor_theme: FakeGateway::DEFAULT_CURSOR.to_string(),
        wallpapers: BTreeMap::from([(
            FakeGateway::DEFAULT_WALLPAPER.to_string(),
            wallpaper.to_string(),
        )]),
    }
}

/// Notifier that remembers every notice
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}
