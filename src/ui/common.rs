//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::DisplayFrame;

/// Format used for every user-facing time.
const TIME_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// Format an epoch timestamp in local time.
pub fn format_epoch(epoch: i64) -> Option<String> {
    DateTime::from_timestamp(epoch, 0)
        .map(|utc| utc.with_timezone(&Local).format(TIME_FORMAT).to_string())
}

/// Format a wall-clock time for display.
pub fn format_local(time: &DateTime<Local>) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Observation time for the header: the station's own text, else the epoch.
pub fn observed_at(frame: &DisplayFrame) -> Option<String> {
    frame
        .obs_time_local
        .clone()
        .or_else(|| frame.timestamp.and_then(format_epoch))
}

/// Render the header bar with station and feed status.
///
/// Displays: status indicator, station id, observation time, reading count.
pub fn render_header(frame: &mut Frame, app: &App, display: &DisplayFrame, area: Rect) {
    let title = Span::styled(" PWS MONITOR ", Style::default().add_modifier(Modifier::BOLD));

    if app.latest.is_none() {
        let line = Line::from(vec![
            title,
            Span::raw(format!("│ {} │ Waiting for first observation...", app.config.station_id)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let status_style = if display.error.is_some() {
        Style::default().fg(app.theme.error)
    } else {
        Style::default().fg(app.theme.healthy)
    };

    let station = display
        .station_id
        .clone()
        .unwrap_or_else(|| app.config.station_id.clone());

    let mut spans = vec![
        Span::styled(" ● ", status_style),
        title,
        Span::raw("│ "),
        Span::styled(station, Style::default().add_modifier(Modifier::BOLD)),
    ];

    if let Some(observed) = observed_at(display) {
        spans.push(Span::raw(format!(" │ observed {}", observed)));
    }

    spans.push(Span::raw(format!(
        " │ {}/{} readings",
        display.readings, display.capacity
    )));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Conditions "), Line::from(" 2:Trends ")];

    let selected = match app.current_view {
        View::Conditions => 0,
        View::Trends => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: last successful update, the latest error, available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut spans = Vec::new();

    if let Some(err) = app.load_error() {
        spans.push(Span::styled(
            format!(" Error: {} ", err),
            Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled("|", dim));
    }

    let updated = match &app.last_update {
        Some(time) => format!(" Last updated: {} ", format_local(time)),
        None => " Loading... ".to_string(),
    };
    spans.push(Span::styled(updated, dim));
    spans.push(Span::styled(
        format!(
            "| every {}s | Tab:switch r:refresh e:export ?:help q:quit",
            app.config.interval_secs
        ),
        dim,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Views"),
        Line::from("  Tab ←/→ h/l  Switch views"),
        Line::from("  1           Current conditions"),
        Line::from("  2           Trend graphs"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Redraw the screen"),
        Line::from("  e           Export to JSON"),
        Line::from("  ?           Toggle help"),
        Line::from("  q Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::History;
    use crate::data::Thresholds;

    #[test]
    fn test_observed_at_prefers_station_text() {
        let history = History::new(3);
        let mut display = DisplayFrame::compose(None, &history, &Thresholds::default(), 0.1, 5);
        assert_eq!(observed_at(&display), None);

        display.timestamp = Some(1_717_272_300);
        assert!(observed_at(&display).is_some());

        display.obs_time_local = Some("2024-06-01 14:05:00".to_string());
        assert_eq!(observed_at(&display).as_deref(), Some("2024-06-01 14:05:00"));
    }

    #[test]
    fn test_format_epoch_shape() {
        let text = format_epoch(0).unwrap();
        // "YYYY-MM-DD HH:MM:SS AM"
        assert_eq!(text.len(), 22);
        assert!(text.ends_with("AM") || text.ends_with("PM"));
    }
}
