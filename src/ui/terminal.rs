//! Full-screen ratatui renderer.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};

use super::{common, conditions, trends, Renderer};
use crate::app::{App, View};
use crate::events;

// Minimum terminal size for usable display
const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 12;

/// Renderer owning the terminal in raw mode on the alternate screen.
pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalRenderer {
    /// Switch the terminal to raw mode and the alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Setup panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic);
        }));

        Ok(Self {
            terminal,
            restored: false,
        })
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, app: &App) -> Result<()> {
        let width = match app.current_view {
            View::Conditions => app.config.sparkline.compact,
            View::Trends => app.config.sparkline.trends,
        };
        let display = app.frame(width);

        self.terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                    .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            common::render_header(frame, app, &display, chunks[0]);
            common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Conditions => conditions::render(frame, app, &display, chunks[2]),
                View::Trends => trends::render(frame, app, &display, chunks[2]),
            }

            common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                common::render_help(frame, app, area);
            }
        })?;

        Ok(())
    }

    fn handle_input(&mut self, app: &mut App, timeout: Duration) -> Result<()> {
        if let Some(Event::Key(key)) = events::poll_event(timeout)? {
            events::handle_key_event(app, key);
        }
        if app.take_redraw_request() {
            self.terminal.clear()?;
        }
        // Resize redraws on the next iteration
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
