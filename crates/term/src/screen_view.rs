//! ScreenView: maps a core [`Screen`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Screen;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::FieldCell;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

/// Locked blocks and the falling piece share the grid character `X`.
const BLOCK_STYLE: CellStyle = CellStyle::new(Rgb::new(100, 220, 120), PLAY_BG).bold();

/// Draws the character grid: field rows scaled horizontally, score line as
/// plain text underneath.
pub struct ScreenView {
    /// Terminal columns per grid character.
    cell_w: u16,
    /// Draw a faint dot in empty cells.
    grid_dots: bool,
}

impl Default for ScreenView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            grid_dots: true,
        }
    }
}

impl ScreenView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_grid_dots(mut self, grid_dots: bool) -> Self {
        self.grid_dots = grid_dots;
        self
    }

    /// Render `screen` into an existing framebuffer.
    ///
    /// The last grid row is the score line; the rest are field rows.
    /// `overlay` is centered on the field when given (e.g. "GAME OVER").
    pub fn render_into(
        &self,
        screen: &Screen,
        overlay: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let field_rows = screen.height().saturating_sub(1);
        let frame_w = screen.width().saturating_mul(self.cell_w);
        let frame_h = screen.height();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        for y in 0..field_rows {
            for (x, &ch) in screen.row(y).iter().enumerate() {
                let (glyph, style) = self.style_for(ch);
                let px = start_x.saturating_add(x as u16 * self.cell_w);
                fb.put_run(px, start_y + y, self.cell_w, glyph, style);
            }
        }

        if field_rows < screen.height() {
            let score: String = screen.row(field_rows).iter().collect();
            fb.put_str(
                start_x,
                start_y + field_rows,
                score.trim_end(),
                CellStyle::default().bold(),
            );
        }

        if let Some(text) = overlay {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            let y = start_y.saturating_add(field_rows / 2);
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str(x, y, text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: &Screen, overlay: Option<&str>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, overlay, viewport, &mut fb);
        fb
    }

    fn style_for(&self, ch: char) -> (char, CellStyle) {
        match FieldCell::from_char(ch) {
            Some(FieldCell::Block) => ('█', BLOCK_STYLE),
            Some(FieldCell::Boundary) => (
                '▒',
                CellStyle::new(Rgb::new(140, 140, 150), Rgb::new(0, 0, 0)),
            ),
            Some(FieldCell::LineToRemove) => (
                '=',
                CellStyle::new(Rgb::new(240, 220, 80), PLAY_BG).bold(),
            ),
            Some(FieldCell::Empty) if self.grid_dots => {
                ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim())
            }
            Some(FieldCell::Empty) => (' ', CellStyle::new(PLAY_BG, PLAY_BG)),
            None => (ch, CellStyle::new(Rgb::new(220, 220, 220), PLAY_BG)),
        }
    }
}
