use std::env;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use airwave::RadioEngine;
use airwave::player::MpvFactory;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = settings::load_settings();
    let mut settings = loaded.settings;
    startup::init_logger(&settings.logging);
    if let Some(e) = loaded.problem {
        log::warn!("{e}; using defaults");
    }

    if let Some(url) = env::args().nth(1) {
        settings.station.url = url;
    }

    let (sinks, mpris) = startup::build_sinks(&settings);
    let engine = RadioEngine::new(
        Box::new(MpvFactory::new(&settings.player)),
        Box::new(sinks),
        settings.session.clone(),
    );

    let remote = engine.setup();
    if let Some(ref handle) = mpris {
        handle.attach_remote(remote);
    }

    let events = engine.subscribe();
    engine.set_station(settings.station.to_station());
    engine.custom_metadata(&settings.ui.idle_text, None);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &engine, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Dropping the engine releases the player process.
    drop(engine);

    run_result
}
