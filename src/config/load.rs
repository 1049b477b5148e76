use std::{env, path::PathBuf};

use super::error::ConfigError;
use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `AIRWAVE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("AIRWAVE")
                .separator("__")
                .try_parsing(true)
                .list_separator(" ")
                .with_list_parse_key("player.extra_args"),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.program.trim().is_empty() {
            return Err(ConfigError::Invalid("player.program must not be empty".to_string()));
        }
        if self.mpris.enabled && self.mpris.identity.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "mpris.identity must not be empty when mpris is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the config path from `AIRWAVE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("AIRWAVE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/airwave/config.toml`
/// or `~/.config/airwave/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("airwave").join("config.toml"))
}
