//! Trends view rendering.
//!
//! One wide sparkline per tracked metric, with its min/max over the history.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::DisplayFrame;

/// Render the Trends view.
pub fn render(frame: &mut Frame, app: &App, display: &DisplayFrame, area: Rect) {
    let block = Block::default()
        .title(format!(" Trends (Last {} readings) ", display.readings))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if !display.has_trend_data() {
        let text = Line::from(Span::styled(
            "Collecting data for graphs...",
            Style::default().add_modifier(Modifier::DIM),
        ));
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut lines = Vec::new();

    for row in &display.rows {
        let (Some(spark), Some(trend)) = (&row.sparkline, row.trend) else {
            continue;
        };

        let label = format!("{}:", row.label());
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<14}", label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(spark.clone(), Style::default().fg(app.theme.highlight)),
            Span::raw(" "),
            Span::styled(trend.symbol(), app.theme.trend_style(trend)),
            Span::styled(
                format!(" {}", row.range_label().unwrap_or_default()),
                dim,
            ),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
