//! UI rendering for the terminal front-end.
//!
//! Everything drawn here comes from an engine [`Snapshot`]; the UI holds no
//! playback state of its own.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use airwave::PlaybackState;
use airwave::config::UiSettings;
use airwave::engine::Snapshot;

const CONTROLS: [(&str, &str); 4] = [
    ("space/p", "play/stop"),
    ("s", "stop"),
    ("i", "station info"),
    ("q", "quit"),
];

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn status_text(snapshot: &Snapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(match snapshot.state() {
        PlaybackState::Playing => " Playing".to_string(),
        PlaybackState::Idle => " Stopped".to_string(),
    });

    if !snapshot.station.name.is_empty() {
        parts.push(format!("Station: {}", snapshot.station.name));
    }

    if snapshot.station.is_configured() {
        parts.push("LIVE".to_string());
    } else {
        parts.push("No stream configured".to_string());
    }

    parts.join(" • ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

/// Render the whole UI from `snapshot`.
pub fn draw(frame: &mut Frame, snapshot: &Snapshot, ui_settings: &UiSettings, info_window: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" airwave ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let mut status = Paragraph::new(status_text(snapshot))
        .block(Block::bordered().padding(LEFT_PAD).title(" status "))
        .wrap(Wrap { trim: true });
    if snapshot.track.is_playing {
        status = status.slow_blink();
    }
    frame.render_widget(status, chunks[1]);

    let artwork = snapshot
        .artwork()
        .map(|a| a.url().to_string())
        .unwrap_or_else(|| "-".to_string());
    let now_playing = Paragraph::new(format!(
        "{}\n{}\n\nArtwork: {}",
        or_dash(&snapshot.track.artist),
        or_dash(&snapshot.track.title),
        artwork
    ))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .padding(LEFT_PAD)
            .title(" now playing "),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[2]);

    if info_window {
        let popup_area = centered_rect_sized(72, 8, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let station = &snapshot.station;
        let info = format!(
            "Name: {}\nDescription: {}\nURL: {}\nArtwork: {}",
            or_dash(&station.name),
            or_dash(&station.description),
            or_dash(&station.url),
            station.artwork.as_ref().map(|a| a.url()).unwrap_or("-"),
        );
        let info_paragraph = Paragraph::new(info)
            .block(
                Block::default()
                    .padding(LEFT_PAD)
                    .borders(Borders::ALL)
                    .title(" station (i closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(info_paragraph, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
