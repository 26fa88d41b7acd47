use crate::{
    banner::{Banner, BannerGenerator},
    hero::HeroRecord,
    render::{display_width, poll_key, screen_size, CellGrid, KeyAction, RenderError, Terminal, Viewport},
    scene::{Brush, Color, DrawCommand, Palette, Point},
};
use std::{io::Write, time::Duration};
use tracing::{debug, warn};

const HEADLINE: &str = "Your hero is:";
const FOOTER: &str = "r: try another date · any other key: exit";

/// Longest description line, in cells.
const MAX_TEXT_WIDTH: usize = 72;

/// How often the screen checks for resizes while waiting for a key.
const RESIZE_POLL: Duration = Duration::from_millis(250);

/// What the user chose on the result screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ResultAction {
    Restart,
    Exit,
}

/// A line of the result screen and how to color it
enum Line {
    Text(String, Color),
    /// Banner row, colored column by column from the first color to the second one
    Gradient(String, Color, Color, usize),
    Blank,
}

/// Draws the hero reveal
pub(crate) struct ResultView<'a> {
    hero: &'a HeroRecord,
    palette: &'a Palette,
    banners: Option<&'a BannerGenerator>,
}

impl<'a> ResultView<'a> {
    pub(crate) fn new(hero: &'a HeroRecord, palette: &'a Palette, banners: Option<&'a BannerGenerator>) -> Self {
        Self { hero, palette, banners }
    }

    pub(crate) fn frame(&self, columns: u16, rows: u16) -> CellGrid {
        let viewport = Viewport::fit(columns, rows, columns.max(1) as f32);
        let canvas = viewport.logical_size();
        let [inner, middle, outer] = self.hero.background.stops();
        let backdrop = [
            DrawCommand::FillRect {
                origin: Point::default(),
                size: canvas,
                brush: Brush::RadialGradient {
                    center: canvas.center(),
                    radius: canvas.max_dimension() * 0.8,
                    colors: vec![inner, middle, outer],
                },
            },
            DrawCommand::FillRect {
                origin: Point::default(),
                size: canvas,
                brush: Brush::RadialGradient {
                    center: Point::new(canvas.width / 2.0, 0.0),
                    radius: canvas.height * 0.9,
                    colors: vec![self.hero.primary.with_alpha(0.35), self.hero.primary.with_alpha(0.0)],
                },
            },
        ];
        let mut grid = viewport.rasterize(&backdrop);

        let lines = self.lines(grid.columns());
        let top = grid.rows().saturating_sub(lines.len()) / 2;
        for (offset, line) in lines.iter().enumerate() {
            let row = top + offset;
            match line {
                Line::Text(text, color) => grid.put_centered(row, text, *color),
                Line::Gradient(text, from, to, width) => {
                    let start = grid.columns().saturating_sub(*width) / 2;
                    for (column, ch) in text.chars().enumerate() {
                        if ch != ' ' {
                            let color = BannerGenerator::gradient_color(*from, *to, column, *width);
                            grid.put_text(start + column, row, &ch.to_string(), color);
                        }
                    }
                }
                Line::Blank => (),
            }
        }
        grid
    }

    fn lines(&self, columns: usize) -> Vec<Line> {
        let hero = self.hero;
        let text_width = MAX_TEXT_WIDTH.min(columns.saturating_sub(4)).max(1);
        let mut lines = vec![Line::Text(HEADLINE.to_string(), self.palette.text_secondary), Line::Blank];

        let from = readable(hero.primary);
        let to = readable(hero.secondary);
        match self.fitting_banners(columns.saturating_sub(2)) {
            Some(banners) => {
                for banner in banners {
                    let width = banner.width();
                    lines.extend(banner.lines().iter().map(|row| Line::Gradient(row.clone(), from, to, width)));
                }
            }
            None => lines.push(Line::Text(hero.name.to_uppercase(), from)),
        }

        lines.push(Line::Blank);
        lines.push(Line::Text(format!("Month of {}", hero.month), self.palette.accent));
        lines.push(Line::Blank);
        lines.extend(wrap(hero.short_description, text_width).into_iter().map(|line| Line::Text(line, to)));
        lines.push(Line::Blank);
        lines.extend(
            wrap(hero.long_description, text_width).into_iter().map(|line| Line::Text(line, self.palette.text_primary)),
        );
        lines.push(Line::Blank);
        lines.push(Line::Text(FOOTER.to_string(), self.palette.text_secondary.darken(0.3)));
        lines
    }

    fn fitting_banners(&self, max_width: usize) -> Option<Vec<Banner>> {
        let generator = self.banners?;
        match generator.generate_fitting(self.hero.name, max_width) {
            Ok(banners) => banners,
            Err(e) => {
                warn!("could not render banner for {}: {e}", self.hero.name);
                None
            }
        }
    }

    /// Show the hero until a key is pressed.
    pub(crate) fn run<W: Write>(&self, terminal: &mut Terminal<W>) -> Result<ResultAction, RenderError> {
        debug!("showing {} for {}", self.hero.name, self.hero.month);
        loop {
            let (columns, rows) = screen_size()?;
            terminal.draw(&self.frame(columns, rows))?;
            match poll_key(RESIZE_POLL)? {
                Some(KeyAction::Restart) => return Ok(ResultAction::Restart),
                Some(_) => return Ok(ResultAction::Exit),
                None => continue,
            }
        }
    }
}

/// Lift very dark colors so they stay visible on the dark backdrop.
fn readable(color: Color) -> Color {
    let luma = 0.299 * color.r as f32 + 0.587 * color.g as f32 + 0.114 * color.b as f32;
    if luma < 110.0 { color.lerp(Color::WHITE, 0.45) } else { color }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && display_width(&current) + 1 + display_width(word) > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
