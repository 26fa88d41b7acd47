use crate::scene::Color;
use figlet_rs::FIGfont;
use once_cell::sync::OnceCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// The standard FIGlet font bundled with figlet-rs, parsed once.
static STANDARD_FONT: OnceCell<FIGfont> = OnceCell::new();

fn standard_font() -> Result<&'static FIGfont, BannerError> {
    STANDARD_FONT.get_or_try_init(|| {
        // Catch panics from figlet-rs when parsing the font
        let result = catch_unwind(AssertUnwindSafe(FIGfont::standard));
        match result {
            Ok(Ok(font)) => {
                debug!("loaded standard FIGlet font");
                Ok(font)
            }
            Ok(Err(e)) => Err(BannerError::FontLoadFailed(e)),
            Err(_) => Err(BannerError::FontLoadFailed("panic during font loading".to_string())),
        }
    })
}

/// Rendered ASCII art, one string per row
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Banner {
    lines: Vec<String>,
}

impl Banner {
    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Widest row, in cells.
    pub(crate) fn width(&self) -> usize {
        self.lines.iter().map(|line| line.width()).max().unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Generator for ASCII art banners using the standard FIGlet font
pub(crate) struct BannerGenerator {
    font: &'static FIGfont,
}

impl BannerGenerator {
    pub(crate) fn new() -> Result<Self, BannerError> {
        Ok(Self { font: standard_font()? })
    }

    /// Generate ASCII art from the given text
    pub(crate) fn generate(&self, text: &str) -> Result<Banner, BannerError> {
        // Wrapper to guard against panics inside figlet-rs on unexpected input
        let res = catch_unwind(AssertUnwindSafe(|| self.font.convert(text)));
        let figure = match res {
            Ok(Some(figure)) => figure.to_string(),
            Ok(None) | Err(_) => return Err(BannerError::ConversionFailed(text.to_string())),
        };

        let mut lines: Vec<String> = figure.lines().map(|line| line.trim_end().to_string()).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(BannerError::ConversionFailed(text.to_string()));
        }
        Ok(Banner { lines })
    }

    /// Generate banners that fit within `max_width` cells.
    ///
    /// Text too wide for a single banner gets one banner per word. `None` means even single words don't fit.
    pub(crate) fn generate_fitting(&self, text: &str, max_width: usize) -> Result<Option<Vec<Banner>>, BannerError> {
        let whole = self.generate(text)?;
        if whole.width() <= max_width {
            return Ok(Some(vec![whole]));
        }
        let mut banners = Vec::new();
        for word in text.split_whitespace() {
            let banner = self.generate(word)?;
            if banner.width() > max_width {
                debug!("banner for '{word}' is {} cells wide, only {max_width} available", banner.width());
                return Ok(None);
            }
            banners.push(banner);
        }
        Ok(Some(banners))
    }

    /// Color of a banner column, blending linearly from `from` on the left edge to `to` on the right one
    pub(crate) fn gradient_color(from: Color, to: Color, column: usize, total_columns: usize) -> Color {
        if total_columns <= 1 {
            return from;
        }
        from.lerp(to, column as f32 / (total_columns - 1) as f32)
    }
}

/// Errors that can occur when generating banners
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    #[error("failed to load font: {0}")]
    FontLoadFailed(String),

    #[error("failed to convert text '{0}' to ASCII art")]
    ConversionFailed(String),
}
