use super::{cells::CellGrid, RenderError};
use crate::scene::Color;
use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::{
    io::{self, Write},
    time::Duration,
};
use tracing::{debug, warn};

/// Puts the terminal in raw mode on the alternate screen, and restores it when dropped.
pub(crate) struct TerminalGuard;

impl TerminalGuard {
    pub(crate) fn acquire() -> Result<Self, RenderError> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        debug!("terminal acquired");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), ResetColor, cursor::Show, terminal::LeaveAlternateScreen) {
            warn!("failed to leave the alternate screen: {e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("failed to disable raw mode: {e}");
        }
        debug!("terminal restored");
    }
}

/// Current terminal size as (columns, rows).
pub(crate) fn screen_size() -> Result<(u16, u16), RenderError> {
    Ok(terminal::size()?)
}

/// What a key press means to the screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Abandon,
    Restart,
    Other,
}

impl From<KeyEvent> for KeyAction {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Abandon,
            KeyCode::Char('q') | KeyCode::Esc => Self::Abandon,
            KeyCode::Char('r') | KeyCode::Char('R') => Self::Restart,
            _ => Self::Other,
        }
    }
}

/// Wait up to `timeout` for a key press. Other events, such as resizes, are swallowed.
pub(crate) fn poll_key(timeout: Duration) -> Result<Option<KeyAction>, RenderError> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key.into())),
        _ => Ok(None),
    }
}

fn to_crossterm(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}

/// Writes cell grids to a terminal, only sending the cells that changed since the last frame
pub(crate) struct Terminal<W: Write> {
    writer: W,
    previous: Option<CellGrid>,
}

impl<W: Write> Terminal<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer, previous: None }
    }

    /// Forget the last frame so the next one is drawn in full.
    pub(crate) fn invalidate(&mut self) {
        self.previous = None;
    }

    pub(crate) fn draw(&mut self, grid: &CellGrid) -> Result<(), RenderError> {
        let previous = self.previous.take().filter(|previous| {
            previous.columns() == grid.columns() && previous.rows() == grid.rows()
        });
        if previous.is_none() {
            queue!(self.writer, ResetColor, Clear(ClearType::All))?;
        }

        let mut foreground = None;
        let mut background = None;
        for row in 0..grid.rows() {
            // the cursor only needs moving after skipped cells
            let mut need_move = true;
            for (column, cell) in grid.row(row).iter().enumerate() {
                let unchanged = previous.as_ref().and_then(|previous| previous.get(column, row)) == Some(cell);
                if unchanged || cell.continuation {
                    need_move = true;
                    continue;
                }
                if need_move {
                    queue!(self.writer, MoveTo(column as u16, row as u16))?;
                    need_move = false;
                }
                if foreground != Some(cell.foreground) {
                    queue!(self.writer, SetForegroundColor(to_crossterm(cell.foreground)))?;
                    foreground = Some(cell.foreground);
                }
                if background != Some(cell.background) {
                    queue!(self.writer, SetBackgroundColor(to_crossterm(cell.background)))?;
                    background = Some(cell.background);
                }
                queue!(self.writer, Print(cell.symbol))?;
            }
        }
        queue!(self.writer, ResetColor)?;
        self.writer.flush()?;
        self.previous = Some(grid.clone());
        Ok(())
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use rstest::rstest;

    fn output(terminal: &Terminal<Vec<u8>>) -> String {
        String::from_utf8_lossy(terminal.output()).into_owned()
    }

    #[test]
    fn unchanged_frames_send_no_cells() {
        let mut grid = CellGrid::new(4, 2);
        grid.put_text(0, 0, "hero", Color::WHITE);

        let mut terminal = Terminal::new(Vec::new());
        terminal.draw(&grid).expect("draw failed");
        assert!(output(&terminal).contains("hero"));

        let before = terminal.output().len();
        terminal.draw(&grid).expect("draw failed");
        let second = String::from_utf8_lossy(&terminal.output()[before..]).into_owned();
        assert!(!second.contains('h'), "{second:?}");
    }

    #[test]
    fn changed_cells_are_redrawn() {
        let mut grid = CellGrid::new(4, 1);
        let mut terminal = Terminal::new(Vec::new());
        terminal.draw(&grid).expect("draw failed");

        grid.put_text(2, 0, "x", Color::WHITE);
        let before = terminal.output().len();
        terminal.draw(&grid).expect("draw failed");
        let second = String::from_utf8_lossy(&terminal.output()[before..]).into_owned();
        assert!(second.contains('x'));
        assert_eq!(second.matches(' ').count(), 0);
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut terminal = Terminal::new(Vec::new());
        terminal.draw(&CellGrid::new(2, 1)).expect("draw failed");
        let before = terminal.output().len();
        terminal.draw(&CellGrid::new(3, 1)).expect("draw failed");
        let second = String::from_utf8_lossy(&terminal.output()[before..]).into_owned();
        assert_eq!(second.matches(' ').count(), 3);
    }

    #[rstest]
    #[case::q(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Abandon)]
    #[case::escape(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Abandon)]
    #[case::ctrl_c(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Abandon)]
    #[case::plain_c(KeyCode::Char('c'), KeyModifiers::NONE, KeyAction::Other)]
    #[case::restart(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::Restart)]
    #[case::enter(KeyCode::Enter, KeyModifiers::NONE, KeyAction::Other)]
    fn key_actions(#[case] code: KeyCode, #[case] modifiers: KeyModifiers, #[case] expected: KeyAction) {
        let key = KeyEvent { code, modifiers, kind: KeyEventKind::Press, state: KeyEventState::NONE };
        assert_eq!(KeyAction::from(key), expected);
    }
}
