use std::fs::OpenOptions;

use airwave::config::{self, LoggingSettings};
use airwave::mpris::{self, MprisHandle};
use airwave::now_playing::{FanOutSink, LogSink};
use log::LevelFilter;

/// Send log output to the configured file; the terminal belongs to the UI.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logger(settings: &LoggingSettings) {
    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let path = settings.file_path();
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("airwave: cannot open log file {}: {e}", path.display());
            logger.filter_level(LevelFilter::Off);
        }
    }

    logger.init();
}

/// Build the now-playing sinks selected by `settings`.
pub fn build_sinks(settings: &config::Settings) -> (FanOutSink, Option<MprisHandle>) {
    let mut sinks = FanOutSink::new().with(LogSink);

    let mpris = settings
        .mpris
        .enabled
        .then(|| mpris::spawn_mpris(&settings.mpris.identity));
    if let Some(ref handle) = mpris {
        sinks.push(Box::new(handle.clone()));
    }

    (sinks, mpris)
}
