//! Conditions view rendering.
//!
//! Displays a table of every metric with its current value colored by
//! severity, a trend arrow and a compact sparkline with the history range.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::DisplayFrame;

/// Render the Conditions view.
pub fn render(frame: &mut Frame, app: &App, display: &DisplayFrame, area: Rect) {
    let block = Block::default()
        .title(" Current Conditions ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if let Some(ref err) = display.error {
        if display.readings <= 1 {
            // Nothing to show beyond the failure itself.
            let text = Line::from(Span::styled(
                format!("Error: {}", err),
                Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(Paragraph::new(text).block(block), area);
            return;
        }
    }

    let header = Row::new(vec![
        Cell::from("Metric"),
        Cell::from("Value"),
        Cell::from("Trend"),
        Cell::from("History"),
    ])
    .height(1)
    .style(app.theme.header);

    let dim = Style::default().add_modifier(Modifier::DIM);

    let rows: Vec<Row> = display
        .rows
        .iter()
        .map(|row| {
            let trend = match row.trend {
                Some(trend) => {
                    Cell::from(trend.symbol()).style(app.theme.trend_style(trend))
                }
                None => Cell::from(""),
            };

            let history = match (&row.sparkline, row.range_label()) {
                (Some(spark), Some(range)) => Line::from(vec![
                    Span::raw(spark.clone()),
                    Span::styled(format!(" {}", range), dim),
                ]),
                (Some(spark), None) => Line::from(spark.clone()),
                (None, _) => Line::from(""),
            };

            Row::new(vec![
                Cell::from(row.label()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(row.display.clone()).style(app.theme.severity_style(row.severity)),
                trend,
                Cell::from(history),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(18),
        Constraint::Length(6),
        Constraint::Fill(2),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
