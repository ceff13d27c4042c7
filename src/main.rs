use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use xftheme::{
    commands,
    config::ConfigStore,
    error::ThemeError,
    manager::ProfileManager,
    notify::{DesktopNotifier, Notice, Notifier, SilentNotifier},
    paths::Paths,
    ui::{ColorMode, Ui},
    xfconf::XfconfQuery,
};

#[derive(Parser)]
#[command(name = "xftheme")]
#[command(about = "Xfce appearance profiles - save, load and toggle light/dark themes")]
#[command(version)]
struct Cli {
    /// What to do
    #[arg(value_enum)]
    action: Action,

    /// Profile name (required for load and save)
    #[arg(short, long)]
    name: Option<String>,

    /// With load: save the live state of the enabled profile before switching
    #[arg(long)]
    save_changes: bool,

    /// With auto: use this hour (0-23) instead of the local clock
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    hour: Option<u32>,

    /// Config file (default: $XFTHEME_CONFIG or ~/.config/themes.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seconds to wait for each xfconf-query call
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    timeout: u64,

    /// Abort instead of starting empty when the config file is unreadable
    #[arg(long)]
    strict_config: bool,

    /// Do not send desktop notifications
    #[arg(long)]
    no_notify: bool,

    /// Log every xfconf-query call
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// When to use colors: always, auto, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

#[derive(Clone, Copy, ValueEnum)]
enum Action {
    /// Apply a stored profile
    Load,
    /// Store the current desktop appearance as a profile
    Save,
    /// Apply light by day, dark by night
    Auto,
    /// Switch between light and dark
    Toggle,
    /// List stored profiles
    List,
    /// Show the enabled profile and unsaved changes
    Current,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ui = Ui::new(cli.color, cli.no_color);

    let paths = match cli.config {
        Some(file) => Paths::with_config_file(file),
        None => Paths::new()?,
    };
    let store = ConfigStore::new(&paths.config_file);
    let loaded = store.load_or_default();
    let doc = if cli.strict_config {
        loaded.into_strict()?
    } else {
        loaded.into_document()
    };

    let gateway = XfconfQuery::new(Duration::from_secs(cli.timeout));
    let notifier: Box<dyn Notifier> = if cli.no_notify {
        Box::new(SilentNotifier)
    } else {
        Box::new(DesktopNotifier::default())
    };
    let mut manager = ProfileManager::new(store, doc, &gateway, notifier.as_ref());
    let name = cli.name.as_deref();

    let result = match cli.action {
        Action::Load => commands::load(&mut manager, name, cli.save_changes, &ui),
        Action::Save => commands::save(&mut manager, name, &ui),
        Action::Auto => commands::auto(&mut manager, cli.hour, &ui),
        Action::Toggle => commands::toggle(&mut manager, &ui),
        Action::List => commands::list(manager.document(), &ui),
        Action::Current => commands::current(&manager, &ui),
    };

    if let Err(err) = &result {
        if let Some(ThemeError::MissingArgument { action, .. }) = err.downcast_ref::<ThemeError>() {
            notifier.notify(&Notice::MissingName { action: *action });
            ui.err(err.to_string());
            std::process::exit(1);
        }
    }
    result
}
