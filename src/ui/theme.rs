//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{Severity, Trend};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for errors.
    pub error: Color,
    /// Color for a healthy feed.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            error: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            error: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a reading's severity
    pub fn severity_style(&self, severity: Severity) -> Style {
        let fg = |color| Style::default().fg(color);
        match severity {
            Severity::Unknown => Style::default().add_modifier(Modifier::DIM),
            Severity::Informational => Style::default(),
            Severity::Cold => fg(Color::Blue),
            Severity::Cool => fg(Color::Cyan),
            Severity::Warm => fg(Color::Green),
            Severity::Hot => fg(Color::Yellow),
            Severity::ExtremeHot => fg(Color::Red).add_modifier(Modifier::BOLD),
            Severity::LowHumidity => fg(Color::Yellow),
            Severity::NormalHumidity => fg(Color::Green),
            Severity::HighHumidity => fg(Color::Cyan),
            Severity::Calm => fg(Color::Green),
            Severity::Moderate => fg(Color::Yellow),
            Severity::Strong => fg(Color::Red),
        }
    }

    /// Get style for a trend arrow
    pub fn trend_style(&self, trend: Trend) -> Style {
        match trend {
            Trend::Rising => Style::default().fg(Color::Green),
            Trend::Falling => Style::default().fg(Color::Red),
            Trend::Flat | Trend::Unknown => Style::default().add_modifier(Modifier::DIM),
        }
    }
}
