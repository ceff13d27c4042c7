//! Capturing the live desktop appearance into a [`Profile`].

use std::collections::BTreeMap;

use crate::config::Profile;
use crate::error::Result;
use crate::xfconf::{
    CURSOR_THEME_NAME, DESKTOP, ICON_THEME_NAME, LAST_IMAGE_MARKER, PropertyGateway, THEME_NAME,
    WM_THEME, XFWM4, XSETTINGS,
};

/// Read the wallpaper of every workspace.
///
/// Workspaces are discovered from the desktop channel's property list: any
/// path containing `/last-image` is a per-workspace wallpaper, however many
/// monitors and workspaces exist.
pub fn capture_wallpapers(gateway: &dyn PropertyGateway) -> Result<BTreeMap<String, String>> {
    let mut wallpapers = BTreeMap::new();
    for path in gateway.list_properties(DESKTOP)? {
        if !path.contains(LAST_IMAGE_MARKER) {
            continue;
        }
        let image = gateway.get_property(DESKTOP, &path)?;
        wallpapers.insert(path, image);
    }
    log::debug!("captured {} workspace wallpaper(s)", wallpapers.len());
    Ok(wallpapers)
}

/// Snapshot the current theme settings and wallpapers.
///
/// Nothing is returned unless every read succeeds.
pub fn capture_profile(gateway: &dyn PropertyGateway) -> Result<Profile> {
    let gtk_theme = gateway.get_property(XSETTINGS, THEME_NAME)?;
    let window_manager_theme = gateway.get_property(XFWM4, WM_THEME)?;
    let icon_theme = gateway.get_property(XSETTINGS, ICON_THEME_NAME)?;
    let cursor_theme = gateway.get_property(XSETTINGS, CURSOR_THEME_NAME)?;
    let wallpapers = capture_wallpapers(gateway)?;

    Ok(Profile {
        gtk_theme,
        window_manager_theme: Some(window_manager_theme),
        icon_theme,
        cursor_theme,
        wallpapers,
    })
}
