use super::raster::PixelCanvas;
use crate::scene::Color;
use unicode_width::UnicodeWidthChar;

/// Upper half block: the foreground paints the top pixel, the background the bottom one.
pub(crate) const HALF_BLOCK: char = '▀';

/// A single terminal cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cell {
    pub(crate) symbol: char,
    pub(crate) foreground: Color,
    pub(crate) background: Color,
    /// Right half of a double width symbol placed in the previous cell
    pub(crate) continuation: bool,
}

#[cfg(test)]
impl Cell {
    pub(crate) const BLANK: Cell =
        Cell { symbol: ' ', foreground: Color::WHITE, background: Color::BLACK, continuation: false };
}

/// The terminal screen buffer: rows of cells
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CellGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    #[cfg(test)]
    pub(crate) fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows, cells: vec![Cell::BLANK; columns * rows] }
    }

    /// Fold pairs of pixel rows into half block cells.
    pub(crate) fn from_pixels(canvas: &PixelCanvas) -> Self {
        let columns = canvas.width();
        let rows = canvas.height().div_ceil(2);
        let mut cells = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell {
                    symbol: HALF_BLOCK,
                    foreground: canvas.pixel(column, row * 2).to_color(),
                    background: canvas.pixel(column, row * 2 + 1).to_color(),
                    continuation: false,
                });
            }
        }
        Self { columns, rows, cells }
    }

    pub(crate) fn columns(&self) -> usize {
        self.columns
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn get(&self, column: usize, row: usize) -> Option<&Cell> {
        if column < self.columns && row < self.rows { self.cells.get(row * self.columns + column) } else { None }
    }

    /// Iterate over the cells of a row, left to right.
    pub(crate) fn row(&self, row: usize) -> &[Cell] {
        if row < self.rows { &self.cells[row * self.columns..(row + 1) * self.columns] } else { &[] }
    }

    /// Write text starting at a cell. Characters that don't fit are dropped.
    ///
    /// Half block cells underneath take the average of their two pixels as background so text stays readable.
    pub(crate) fn put_text(&mut self, column: usize, row: usize, text: &str, color: Color) {
        if row >= self.rows {
            return;
        }
        let mut column = column;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            if column + width > self.columns {
                break;
            }
            let background = self.text_background(column, row);
            self.cells[row * self.columns + column] =
                Cell { symbol: ch, foreground: color, background, continuation: false };
            for tail in 1..width {
                let index = row * self.columns + column + tail;
                self.cells[index] = Cell { symbol: ' ', foreground: color, background, continuation: true };
            }
            column += width;
        }
    }

    /// Write text horizontally centered on a row.
    pub(crate) fn put_centered(&mut self, row: usize, text: &str, color: Color) {
        let column = self.columns.saturating_sub(display_width(text)) / 2;
        self.put_text(column, row, text, color);
    }

    fn text_background(&self, column: usize, row: usize) -> Color {
        let cell = self.cells[row * self.columns + column];
        if cell.symbol == HALF_BLOCK { cell.foreground.lerp(cell.background, 0.5) } else { cell.background }
    }
}

/// How many cells a string takes.
pub(crate) fn display_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Brush, DrawCommand, Point, Size};

    fn grid() -> CellGrid {
        let mut canvas = PixelCanvas::new(10, 4);
        let top = DrawCommand::FillRect {
            origin: Point::default(),
            size: Size::new(10.0, 1.0),
            brush: Brush::solid(Color::new(200, 0, 0)),
        };
        canvas.paint(&[top], 1.0);
        CellGrid::from_pixels(&canvas)
    }

    #[test]
    fn pixels_fold_into_half_blocks() {
        let grid = grid();
        assert_eq!((grid.columns(), grid.rows()), (10, 2));

        let cell = grid.get(3, 0).copied().unwrap_or(Cell::BLANK);
        assert_eq!(cell.symbol, HALF_BLOCK);
        assert_eq!(cell.foreground, Color::new(200, 0, 0));
        assert_eq!(cell.background, Color::BLACK);
    }

    #[test]
    fn odd_pixel_heights_round_up() {
        let grid = CellGrid::from_pixels(&PixelCanvas::new(3, 5));
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn text_averages_the_background() {
        let mut grid = grid();
        grid.put_text(1, 0, "hi", Color::WHITE);
        let cell = grid.row(0)[1];
        assert_eq!(cell.symbol, 'h');
        assert_eq!(cell.background, Color::new(100, 0, 0));
        assert_eq!(grid.row(0)[3].symbol, HALF_BLOCK);
    }

    #[test]
    fn centered_text() {
        let mut grid = CellGrid::new(10, 1);
        grid.put_centered(0, "42%", Color::WHITE);
        let text: String = grid.row(0).iter().map(|cell| cell.symbol).collect();
        assert_eq!(text, "   42%    ");
    }

    #[test]
    fn wide_characters_take_two_cells() {
        let mut grid = CellGrid::new(4, 1);
        grid.put_text(0, 0, "英雄!", Color::WHITE);
        let row = grid.row(0);
        assert_eq!(row[0].symbol, '英');
        assert!(row[1].continuation);
        assert_eq!(row[2].symbol, '雄');
        // no room left for the exclamation mark
        assert_eq!(row.len(), 4);
        assert!(row[3].continuation);
    }

    #[test]
    fn text_is_cut_at_the_edge() {
        let mut grid = CellGrid::new(3, 1);
        grid.put_text(1, 0, "abc", Color::WHITE);
        let text: String = grid.row(0).iter().map(|cell| cell.symbol).collect();
        assert_eq!(text, " ab");
        grid.put_text(0, 5, "ignored", Color::WHITE);
    }
}
