use airwave::config::{self, ConfigError};

pub struct LoadedSettings {
    pub settings: config::Settings,
    /// Why the defaults were used instead of the loaded settings, if they were.
    pub problem: Option<ConfigError>,
}

pub fn load_settings() -> LoadedSettings {
    // Config is optional; failures should not prevent the app from starting.
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => LoadedSettings {
                settings: s,
                problem: None,
            },
            Err(e) => LoadedSettings {
                settings: config::Settings::default(),
                problem: Some(e),
            },
        },
        Err(e) => LoadedSettings {
            settings: config::Settings::default(),
            problem: Some(e),
        },
    }
}
