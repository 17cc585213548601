//! Rendering.
//!
//! Two renderers sit behind the [`Renderer`] trait: the full-screen ratatui
//! [`TerminalRenderer`] and the line-oriented [`PlainRenderer`]. Which one
//! runs is decided by configuration at startup.

use std::time::Duration;

use anyhow::Result;

use crate::app::App;
use crate::config::DisplayMode;

pub mod common;
pub mod conditions;
pub mod plain;
pub mod terminal;
pub mod theme;
pub mod trends;

pub use plain::PlainRenderer;
pub use terminal::TerminalRenderer;
pub use theme::Theme;

/// A display backend driven by the main loop.
pub trait Renderer {
    /// Draw the current state.
    fn draw(&mut self, app: &App) -> Result<()>;

    /// Wait up to `timeout` for user input and apply it to `app`.
    fn handle_input(&mut self, app: &mut App, timeout: Duration) -> Result<()>;

    /// Return the terminal to its normal state.
    fn restore(&mut self) -> Result<()>;
}

/// Build the renderer for a display mode.
///
/// The rich renderer takes over the terminal immediately.
pub fn create(mode: DisplayMode) -> Result<Box<dyn Renderer>> {
    Ok(match mode {
        DisplayMode::Rich => Box::new(TerminalRenderer::new()?),
        DisplayMode::Plain => Box::new(PlainRenderer::new(std::io::stdout())),
    })
}
