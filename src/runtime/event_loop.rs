use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use airwave::config;
use airwave::{RadioEngine, RadioEvent};

use crate::ui;

/// Front-end state that lives only as long as the event loop.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Whether the station details popup is shown.
    pub info_window: bool,
}

/// Main terminal event loop: reacts to engine notifications, draws the UI
/// and handles key presses. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    engine: &RadioEngine,
    events: &Receiver<RadioEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::default();

    loop {
        let Some(batch) = drain_radio_events(events) else {
            return Ok(());
        };
        apply_radio_events(&batch, &settings.ui, engine);

        let snapshot = engine.snapshot();
        terminal.draw(|f| ui::draw(f, &snapshot, &settings.ui, state.info_window))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, engine, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Everything queued since the last frame, in emission order. `None` once
/// the engine is gone.
fn drain_radio_events(events: &Receiver<RadioEvent>) -> Option<Vec<RadioEvent>> {
    let mut batch = Vec::new();
    loop {
        match events.try_recv() {
            Ok(ev) => batch.push(ev),
            Err(mpsc::TryRecvError::Empty) => return Some(batch),
            Err(mpsc::TryRecvError::Disconnected) => return None,
        }
    }
}

/// Show placeholder text while the stream connects or after it stops.
///
/// Notifications arrive late, so a `PlayPressed` may already be followed by
/// stream metadata in the same batch; that metadata is never overwritten.
pub(crate) fn apply_radio_events(batch: &[RadioEvent], ui: &config::UiSettings, engine: &RadioEngine) {
    for (i, event) in batch.iter().enumerate() {
        match event {
            RadioEvent::PlayPressed => {
                let superseded = batch[i + 1..].iter().any(|ev| {
                    matches!(ev, RadioEvent::MetadataUpdated | RadioEvent::StopPressed)
                });
                if !superseded && engine.is_playing() {
                    engine.custom_metadata(&ui.loading_text, None);
                }
            }
            RadioEvent::StopPressed => {
                // An offline notice has already replaced the cleared title.
                if !engine.is_playing() && engine.track_title().is_empty() {
                    engine.custom_metadata(&ui.stopped_text, None);
                }
            }
            RadioEvent::StationOffline => {
                log::info!("{}", engine.track_title());
            }
            RadioEvent::MetadataUpdated => {}
        }
    }
}

/// Returns `true` when the loop should exit.
fn handle_key_event(key: KeyEvent, engine: &RadioEngine, state: &mut EventLoopState) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('p') | KeyCode::Char(' ') => engine.toggle_play_stop(),
        KeyCode::Char('s') => engine.stop(),
        KeyCode::Char('i') => state.info_window = !state.info_window,
        KeyCode::Esc => state.info_window = false,
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests;
