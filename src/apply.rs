//! Pushing a stored [`Profile`] back onto the live desktop.
//!
//! Properties are set one at a time in a fixed order: GTK theme, window
//! manager theme, icon theme, cursor theme, then each wallpaper. There is no
//! rollback. If a set fails, every property before it stays applied and the
//! error is returned, leaving the desktop in a mixed state.

use crate::config::Profile;
use crate::error::Result;
use crate::xfconf::{
    CURSOR_THEME_NAME, DESKTOP, ICON_THEME_NAME, PropertyGateway, THEME_NAME, WM_THEME, XFWM4,
    XSETTINGS,
};

pub fn apply_profile(gateway: &dyn PropertyGateway, profile: &Profile) -> Result<()> {
    gateway.set_property(XSETTINGS, THEME_NAME, &profile.gtk_theme)?;
    gateway.set_property(XFWM4, WM_THEME, profile.resolved_window_manager_theme())?;
    gateway.set_property(XSETTINGS, ICON_THEME_NAME, &profile.icon_theme)?;
    gateway.set_property(XSETTINGS, CURSOR_THEME_NAME, &profile.cursor_theme)?;

    for (path, image) in &profile.wallpapers {
        gateway.set_property(DESKTOP, path, image)?;
    }

    Ok(())
}
