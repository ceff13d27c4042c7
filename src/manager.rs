//! The profile state machine.
//!
//! State is the profile map plus a single enabled-profile pointer, both held in
//! the [`ConfigDocument`]. Every public operation runs one transition to
//! completion and persists the document when it changed:
//!
//! - `save(name)`: capture the live desktop into `name` and enable it.
//! - `apply(name)`: push `name` onto the desktop unless it is already enabled
//!   or does not exist.
//! - `load(name)`: optionally re-save the enabled profile first, then `apply`.
//! - `toggle()`: switch between `light` and `dark`.
//! - `auto(hour)`: pick `light` or `dark` from the clock hour.

use crate::apply::apply_profile;
use crate::config::{ConfigDocument, ConfigStore, ENABLED_KEY};
use crate::daytime::{DARK, LIGHT, Period};
use crate::error::{Result, ThemeError};
use crate::notify::{Notice, Notifier};
use crate::snapshot::capture_profile;
use crate::xfconf::PropertyGateway;

const MAX_NAME_CHARS: usize = 64;

/// What `apply` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The profile was pushed to the desktop and enabled
    Applied,
    /// The profile was already enabled; nothing was touched
    AlreadyActive,
    /// No profile by that name; nothing was touched
    NotFound,
}

/// The target picked by `toggle` or `auto`, and what applying it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch {
    pub target: &'static str,
    pub outcome: ApplyOutcome,
}

/// Validate a profile name before storing it
///
/// Profile names share the top level of the config file with the `enabled`
/// pointer, so that key is reserved.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(ThemeError::InvalidProfileName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name cannot be empty");
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return invalid("name cannot be longer than 64 characters");
    }
    if name.chars().any(char::is_control) {
        return invalid("name cannot contain control characters");
    }
    if name == ENABLED_KEY {
        return invalid("'enabled' is reserved");
    }
    Ok(())
}

/// The profile `toggle` switches to.
///
/// `dark` goes to `light` and every other enabled profile goes to `dark`.
/// With nothing enabled yet the first toggle lands on `light`.
pub fn toggle_target(enabled: Option<&str>) -> &'static str {
    match enabled {
        Some(DARK) | None => LIGHT,
        Some(_) => DARK,
    }
}

pub struct ProfileManager<'a> {
    store: ConfigStore,
    doc: ConfigDocument,
    gateway: &'a dyn PropertyGateway,
    notifier: &'a dyn Notifier,
}

impl<'a> ProfileManager<'a> {
    pub fn new(
        store: ConfigStore,
        doc: ConfigDocument,
        gateway: &'a dyn PropertyGateway,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            store,
            doc,
            gateway,
            notifier,
        }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.doc
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Capture the live desktop as `name` and make it the enabled profile.
    ///
    /// A failed capture leaves the document untouched and unsaved.
    pub fn save(&mut self, name: &str) -> Result<()> {
        validate_profile_name(name)?;
        let profile = capture_profile(self.gateway)?;

        log::info!(
            "saving profile '{name}' ({} wallpaper(s))",
            profile.wallpapers.len()
        );
        self.doc.profiles.insert(name.to_string(), profile);
        self.doc.enabled = Some(name.to_string());
        self.store.save(&self.doc)?;

        self.notifier.notify(&Notice::Saved {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Apply `name` to the desktop and enable it.
    ///
    /// Re-applying the enabled profile and applying an unknown one both
    /// return early without any property writes or document changes.
    pub fn apply(&mut self, name: &str) -> Result<ApplyOutcome> {
        if self.doc.is_enabled(name) {
            log::info!("profile '{name}' already enabled");
            self.notifier.notify(&Notice::AlreadyActive {
                name: name.to_string(),
            });
            return Ok(ApplyOutcome::AlreadyActive);
        }

        let Some(profile) = self.doc.profiles.get(name) else {
            log::warn!("profile '{name}' not found in {:?}", self.store.path());
            self.notifier.notify(&Notice::NotFound {
                name: name.to_string(),
            });
            return Ok(ApplyOutcome::NotFound);
        };

        log::info!("applying profile '{name}'");
        apply_profile(self.gateway, profile)?;

        self.doc.enabled = Some(name.to_string());
        self.store.save(&self.doc)?;

        self.notifier.notify(&Notice::Loading {
            name: name.to_string(),
        });
        Ok(ApplyOutcome::Applied)
    }

    /// Apply `name`, first re-saving the enabled profile's live state when
    /// `save_changes` is set.
    pub fn load(&mut self, name: &str, save_changes: bool) -> Result<ApplyOutcome> {
        if save_changes {
            match self.doc.enabled_name().map(str::to_string) {
                Some(current) => {
                    log::info!("persisting live changes to '{current}' before switching");
                    self.save(&current)?;
                }
                None => log::debug!("no enabled profile, nothing to save before loading"),
            }
        }
        self.apply(name)
    }

    /// Switch between the `light` and `dark` profiles
    pub fn toggle(&mut self) -> Result<Switch> {
        let target = toggle_target(self.doc.enabled_name());
        let outcome = self.apply(target)?;
        Ok(Switch { target, outcome })
    }

    /// Apply `light` by day and `dark` by night for the given clock hour
    pub fn auto(&mut self, hour: u32) -> Result<Switch> {
        let target = Period::for_hour(hour).profile_name();
        log::debug!("hour {hour} selects '{target}'");
        let outcome = self.apply(target)?;
        Ok(Switch { target, outcome })
    }

    /// Compare the enabled profile with the live desktop.
    ///
    /// Returns `None` when no stored profile is enabled. Reads only.
    pub fn drift(&self) -> Result<Option<Vec<String>>> {
        let Some(stored) = self
            .doc
            .enabled_name()
            .and_then(|name| self.doc.profiles.get(name))
        else {
            return Ok(None);
        };
        let live = capture_profile(self.gateway)?;
        Ok(Some(stored.drift(&live)))
    }
}
