//! TerminalFrontend: the crossterm implementation of the engine's [`Frontend`].

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::trace;

use crate::core::Screen;
use crate::engine::Frontend;
use crate::fb::FrameBuffer;
use crate::renderer::TerminalRenderer;
use crate::screen_view::{ScreenView, Viewport};
use crate::types::InputEvent;

const GAME_OVER_TEXT: &str = "GAME OVER";

pub struct TerminalFrontend {
    renderer: TerminalRenderer,
    view: ScreenView,
    fb: FrameBuffer,
}

impl TerminalFrontend {
    pub fn new(view: ScreenView) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view,
            fb: FrameBuffer::new(0, 0),
        }
    }

    /// Take over the terminal. Failure here is fatal for the caller.
    pub fn enter(&mut self) -> Result<()> {
        self.renderer
            .enter()
            .context("failed to initialize the terminal")
    }

    /// Restore the terminal.
    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    /// Draw the final grid with a "GAME OVER" banner.
    pub fn show_game_over(&mut self, screen: &Screen) -> Result<()> {
        self.draw(screen, Some(GAME_OVER_TEXT))
    }

    /// Block until any key is pressed.
    pub fn wait_for_key(&mut self) -> Result<()> {
        loop {
            match event::read().context("failed to read terminal event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
                Event::Resize(..) => self.renderer.invalidate(),
                _ => {}
            }
        }
    }

    fn draw(&mut self, screen: &Screen, overlay: Option<&str>) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view
            .render_into(screen, overlay, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

impl Default for TerminalFrontend {
    fn default() -> Self {
        Self::new(ScreenView::default())
    }
}

impl Frontend for TerminalFrontend {
    fn poll_input(&mut self) -> Result<Option<InputEvent>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        let ev = event::read()?;
        if let Event::Resize(..) = ev {
            self.renderer.invalidate();
        }
        let input = crate::input::map_event(&ev);
        if let Some(input) = input {
            trace!(input = input.as_str(), "key");
        }
        Ok(input)
    }

    fn present(&mut self, screen: &Screen) -> Result<()> {
        self.draw(screen, None)
    }
}
