use anyhow::{Context, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "XFTHEME_CONFIG";

/// All computed paths used by xftheme
#[derive(Debug, Clone)]
pub struct Paths {
    /// ~/.config
    pub config_dir: PathBuf,
    /// ~/.config/themes.json
    pub config_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$XFTHEME_CONFIG`, falling back to the home directory.
    pub fn new() -> Result<Self> {
        if let Some(file) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_config_file(PathBuf::from(file)));
        }

        let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
        let config_dir = base_dirs.home_dir().join(".config");
        let config_file = config_dir.join("themes.json");

        Ok(Self {
            config_dir,
            config_file,
        })
    }

    /// Use an explicit config file (from `--config` or the environment)
    pub fn with_config_file(config_file: impl Into<PathBuf>) -> Self {
        let config_file = config_file.into();
        let config_dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            config_dir,
            config_file,
        }
    }
}
