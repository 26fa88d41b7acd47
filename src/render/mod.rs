mod cells;
mod raster;
mod terminal;

pub(crate) use cells::{display_width, CellGrid};
pub(crate) use terminal::{poll_key, screen_size, KeyAction, Terminal, TerminalGuard};

use crate::scene::{DrawCommand, Point, Size};
use raster::PixelCanvas;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Maps the logical canvas onto a terminal, two pixels per cell vertically
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Viewport {
    columns: u16,
    rows: u16,
    scale: f32,
    logical: Size,
}

impl Viewport {
    /// Fit a canvas `logical_width` units wide into the terminal. The logical height follows the terminal's aspect.
    pub(crate) fn fit(columns: u16, rows: u16, logical_width: f32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let logical_width = if logical_width.is_finite() { logical_width.max(1.0) } else { 1.0 };
        let scale = columns as f32 / logical_width;
        let pixel_height = rows as f32 * 2.0;
        Self { columns, rows, scale, logical: Size::new(logical_width, pixel_height / scale) }
    }

    pub(crate) fn logical_size(&self) -> Size {
        self.logical
    }

    /// The cell (column, row) a logical point lands in, clamped to the screen.
    pub(crate) fn cell_at(&self, point: Point) -> (usize, usize) {
        let column = (point.x * self.scale).floor().clamp(0.0, (self.columns - 1) as f32);
        let row = (point.y * self.scale / 2.0).floor().clamp(0.0, (self.rows - 1) as f32);
        (column as usize, row as usize)
    }

    /// Paint the commands and fold the result into terminal cells.
    pub(crate) fn rasterize(&self, commands: &[DrawCommand]) -> CellGrid {
        let mut canvas = PixelCanvas::new(self.columns as usize, self.rows as usize * 2);
        canvas.paint(commands, self.scale);
        CellGrid::from_pixels(&canvas)
    }
}
