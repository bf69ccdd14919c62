//! Page-level types.

use super::Color;
use crate::error::{Error, Result};
use crate::layout::wrap_text;
use serde::Serialize;

/// US Letter page size in points (8.5 x 11 inches).
pub const LETTER: (f32, f32) = (612.0, 792.0);

/// A4 page size in points (210 x 297 mm).
pub const A4: (f32, f32) = (595.0, 842.0);

/// A positioned piece of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    /// Text to show
    text: String,

    /// Baseline x in points from the left page edge
    x: f32,

    /// Baseline y in points from the bottom page edge
    pub(crate) y: f32,

    /// Font size in points
    font_size: f32,

    /// Fill color
    color: Color,
}

impl TextRun {
    /// Create a black text run.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Result<Self> {
        Self::with_color(text, x, y, font_size, Color::BLACK)
    }

    /// Create a colored text run.
    pub fn with_color(
        text: impl Into<String>,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
    ) -> Result<Self> {
        if font_size <= 0.0 || !font_size.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "font size must be positive, got {}",
                font_size
            )));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "text position must be finite, got ({}, {})",
                x, y
            )));
        }
        Ok(Self {
            text: text.into(),
            x,
            y,
            font_size,
            color,
        })
    }

    /// Text to show.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Fill color, `BLACK` unless set.
    pub fn color(&self) -> Color {
        self.color
    }
}

/// A single output page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    width: f32,
    height: f32,
    runs: Vec<TextRun>,
}

impl Page {
    /// Create a page with the given dimensions in points.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "page dimensions must be positive, got {} x {}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            runs: Vec::new(),
        })
    }

    /// Create a US Letter page.
    pub fn letter() -> Self {
        Self {
            width: LETTER.0,
            height: LETTER.1,
            runs: Vec::new(),
        }
    }

    /// Create an A4 page.
    pub fn a4() -> Self {
        Self {
            width: A4.0,
            height: A4.1,
            runs: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Text runs in drawing order.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Append an already validated run.
    pub fn push_run(&mut self, run: TextRun) -> &mut Self {
        self.runs.push(run);
        self
    }

    /// Add black text at an absolute position.
    pub fn add_text(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        font_size: f32,
    ) -> Result<&mut Self> {
        let run = TextRun::new(text, x, y, font_size)?;
        Ok(self.push_run(run))
    }

    /// Add colored text at an absolute position.
    pub fn add_colored_text(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
    ) -> Result<&mut Self> {
        let run = TextRun::with_color(text, x, y, font_size, color)?;
        Ok(self.push_run(run))
    }

    /// Add text wrapped to `max_width`, one run per line going down the page.
    ///
    /// Lines are spaced `font_size * line_spacing` apart; the first baseline
    /// sits at `y`.
    pub fn add_text_wrapped(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        max_width: f32,
        font_size: f32,
        line_spacing: f32,
    ) -> Result<&mut Self> {
        if line_spacing <= 0.0 || !line_spacing.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "line spacing must be positive, got {}",
                line_spacing
            )));
        }
        let lines = wrap_text(text, max_width, font_size)?;
        let line_height = font_size * line_spacing;
        for (i, line) in lines.into_iter().enumerate() {
            let run = TextRun::new(line, x, y - i as f32 * line_height, font_size)?;
            self.runs.push(run);
        }
        Ok(self)
    }

    /// Check if the page has no text.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Get the text of every run joined by newlines.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(TextRun::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}
