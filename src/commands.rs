//! High-level command orchestration for the CLI.
//!
//! One handler per action. Handlers drive the [`ProfileManager`] and render
//! the result through [`Ui`]; the manager raises desktop notifications itself.

use anstyle::AnsiColor;
use anyhow::{Context, Result};

use crate::config::ConfigDocument;
use crate::daytime::current_hour;
use crate::error::ThemeError;
use crate::manager::{ApplyOutcome, ProfileManager};
use crate::ui::Ui;

/// Return the `--name` value or the error that maps to exit code 1
pub fn require_name<'n>(name: Option<&'n str>, action: &'static str) -> Result<&'n str> {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => Ok(name),
        None => Err(ThemeError::MissingArgument {
            argument: "name",
            action,
        }
        .into()),
    }
}

/// Capture the live desktop under `name`
pub fn save(manager: &mut ProfileManager<'_>, name: Option<&str>, ui: &Ui) -> Result<()> {
    let name = require_name(name, "save")?;
    let spinner = ui.spinner(format!("Capturing current appearance as '{}'...", name));

    match manager.save(name) {
        Ok(()) => {
            ui.spinner_finish_ok(&spinner, format!("Saved profile '{}'", name));
            Ok(())
        }
        Err(e) => {
            ui.spinner_finish_err(&spinner, format!("Failed to save '{}': {}", name, e));
            Err(e).with_context(|| format!("Nothing was written to {:?}", manager.store().path()))
        }
    }
}

/// Apply a stored profile, optionally re-saving the enabled one first
pub fn load(
    manager: &mut ProfileManager<'_>,
    name: Option<&str>,
    save_changes: bool,
    ui: &Ui,
) -> Result<()> {
    let name = require_name(name, "load")?;
    let spinner = ui.spinner(format!("Loading profile '{}'...", name));
    let outcome = manager.load(name, save_changes);
    finish_apply(ui, &spinner, name, outcome)
}

/// Switch between `light` and `dark`
pub fn toggle(manager: &mut ProfileManager<'_>, ui: &Ui) -> Result<()> {
    let spinner = ui.spinner("Toggling light/dark...");
    match manager.toggle() {
        Ok(switch) => finish_apply(ui, &spinner, switch.target, Ok(switch.outcome)),
        Err(e) => finish_apply(ui, &spinner, "light/dark", Err(e)),
    }
}

/// Pick `light` or `dark` from the hour (local clock unless overridden)
pub fn auto(manager: &mut ProfileManager<'_>, hour: Option<u32>, ui: &Ui) -> Result<()> {
    let hour = hour.unwrap_or_else(current_hour);
    let spinner = ui.spinner(format!("Selecting profile for {:02}:00...", hour));
    match manager.auto(hour) {
        Ok(switch) => finish_apply(ui, &spinner, switch.target, Ok(switch.outcome)),
        Err(e) => finish_apply(ui, &spinner, "light/dark", Err(e)),
    }
}

fn finish_apply(
    ui: &Ui,
    spinner: &indicatif::ProgressBar,
    name: &str,
    outcome: crate::error::Result<ApplyOutcome>,
) -> Result<()> {
    match outcome {
        Ok(ApplyOutcome::Applied) => {
            ui.spinner_finish_ok(spinner, format!("Active profile: {}", name));
        }
        Ok(ApplyOutcome::AlreadyActive) => {
            spinner.finish_and_clear();
            ui.info(format!("Already on '{}', nothing to do", name));
        }
        Ok(ApplyOutcome::NotFound) => {
            ui.spinner_finish_err(spinner, format!("Profile '{}' not found", name));
            ui.println(format!(
                "Hint: capture it first with '{} --name {}'",
                ui.bold("xftheme save"),
                name
            ));
        }
        Err(e) => {
            ui.spinner_finish_err(spinner, format!("Failed to apply '{}': {}", name, e));
            return Err(e).context(
                "The desktop may be partially switched; properties set before the failure stay applied",
            );
        }
    }
    Ok(())
}

/// List stored profiles
pub fn list(doc: &ConfigDocument, ui: &Ui) -> Result<()> {
    if doc.profiles.is_empty() {
        ui.warn("No profiles found.");
        ui.newline();
        ui.println("Save the current desktop with:");
        ui.println(format!("  {} --name <name>", ui.bold("xftheme save")));
        return Ok(());
    }

    let mut table = ui.simple_table();
    table.set_header(vec![
        ui.header_cell(""),
        ui.header_cell("Profile"),
        ui.header_cell("GTK"),
        ui.header_cell("Window manager"),
        ui.header_cell("Icons"),
        ui.header_cell("Cursor"),
        ui.header_cell("Wallpapers"),
    ]);

    for (name, profile) in &doc.profiles {
        let is_active = doc.is_enabled(name);
        let name_cell = if is_active {
            ui.colored_cell(name, AnsiColor::Green)
        } else {
            ui.cell(name)
        };

        table.add_row(vec![
            ui.cell(if is_active { ui.icon_ok() } else { " " }),
            name_cell,
            ui.cell(&profile.gtk_theme),
            ui.cell(profile.resolved_window_manager_theme()),
            ui.cell(&profile.icon_theme),
            ui.cell(&profile.cursor_theme),
            ui.cell(profile.wallpapers.len().to_string()),
        ]);
    }

    ui.section("Profiles");
    ui.println(table.to_string());
    Ok(())
}

/// Show the enabled profile and how far the live desktop has drifted from it
pub fn current(manager: &ProfileManager<'_>, ui: &Ui) -> Result<()> {
    let doc = manager.document();

    ui.section("Current Profile");
    ui.newline();

    let mut table = ui.simple_table();
    let enabled_cell = match doc.enabled_name() {
        Some(name) if doc.profiles.contains_key(name) => ui.header_cell(name),
        Some(name) => ui.colored_cell(format!("{} (not stored)", name), AnsiColor::Red),
        None => ui.cell("(none)"),
    };
    table.add_row(vec![ui.cell("Enabled profile:"), enabled_cell]);
    table.add_row(vec![
        ui.cell("Config file:"),
        ui.cell(manager.store().path().display().to_string()),
    ]);
    table.add_row(vec![
        ui.cell("Stored profiles:"),
        ui.cell(doc.profiles.len().to_string()),
    ]);
    ui.println(table.to_string());

    let Some(drift) = manager
        .drift()
        .context("Failed to read the live desktop settings")?
    else {
        return Ok(());
    };

    ui.newline();
    if drift.is_empty() {
        ui.ok("Live desktop matches the enabled profile");
        return Ok(());
    }

    ui.warn(format!("Live desktop differs in {} place(s):", drift.len()));
    for change in &drift {
        ui.println(format!("  {} {}", ui.icon_warn(), change));
    }
    ui.newline();
    ui.println(format!(
        "Keep them with '{}' or carry them over on the next switch with '{}'",
        ui.bold("xftheme save --name <name>"),
        ui.bold("xftheme load --save-changes --name <name>")
    ));
    Ok(())
}
