//! Layout options and presets.

use crate::error::{Error, Result};
use crate::model::{A4, LETTER};

/// Options controlling how a sheet is laid out on pages.
///
/// All lengths are in PDF points (1/72 inch).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Body font size
    pub font_size: f32,

    /// Left margin
    pub margin_left: f32,

    /// Right margin
    pub margin_right: f32,

    /// Top margin
    pub margin_top: f32,

    /// Bottom margin
    pub margin_bottom: f32,

    /// Horizontal gap between columns (reduced for sheets wider than six columns)
    pub column_padding: f32,

    /// Line height as a multiple of the font size
    pub line_spacing: f32,

    /// Page width
    pub page_width: f32,

    /// Page height
    pub page_height: f32,

    /// Whether to print the sheet name above the first row
    pub include_sheet_name: bool,
}

impl LayoutOptions {
    /// Create layout options with defaults (US Letter portrait).
    pub fn new() -> Self {
        Self::default()
    }

    /// US Letter portrait.
    pub fn letter() -> Self {
        Self::default().with_page_size(LETTER.0, LETTER.1)
    }

    /// A4 portrait.
    pub fn a4() -> Self {
        Self::default().with_page_size(A4.0, A4.1)
    }

    /// US Letter landscape.
    pub fn landscape() -> Self {
        Self::default().with_page_size(LETTER.1, LETTER.0)
    }

    /// Set the body font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set all four margins.
    pub fn with_margins(mut self, margin: f32) -> Self {
        self.margin_left = margin;
        self.margin_right = margin;
        self.margin_top = margin;
        self.margin_bottom = margin;
        self
    }

    /// Set the horizontal margins.
    pub fn with_horizontal_margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Set the vertical margins.
    pub fn with_vertical_margins(mut self, top: f32, bottom: f32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    /// Set the gap between columns.
    pub fn with_column_padding(mut self, padding: f32) -> Self {
        self.column_padding = padding;
        self
    }

    /// Set the line spacing multiplier.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Swap width and height.
    pub fn rotated(mut self) -> Self {
        std::mem::swap(&mut self.page_width, &mut self.page_height);
        self
    }

    /// Enable or disable the sheet name header.
    pub fn with_sheet_name(mut self, include: bool) -> Self {
        self.include_sheet_name = include;
        self
    }

    /// Omit the sheet name header.
    pub fn without_sheet_name(self) -> Self {
        self.with_sheet_name(false)
    }

    /// Width available for columns.
    pub fn usable_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Height available for rows.
    pub fn usable_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Distance between consecutive baselines.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }

    /// Estimated width of one character (Helvetica average).
    pub fn avg_char_width(&self) -> f32 {
        avg_char_width(self.font_size)
    }

    /// Check that the options describe a usable page.
    pub fn validate(&self) -> Result<()> {
        positive("font size", self.font_size)?;
        positive("page width", self.page_width)?;
        positive("page height", self.page_height)?;
        positive("line spacing", self.line_spacing)?;
        non_negative("left margin", self.margin_left)?;
        non_negative("right margin", self.margin_right)?;
        non_negative("top margin", self.margin_top)?;
        non_negative("bottom margin", self.margin_bottom)?;
        non_negative("column padding", self.column_padding)?;

        if self.usable_width() <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "margins leave no usable width on a {}pt wide page",
                self.page_width
            )));
        }
        if self.usable_height() <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "margins leave no usable height on a {}pt tall page",
                self.page_height
            )));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            margin_left: 50.0,
            margin_right: 50.0,
            margin_top: 50.0,
            margin_bottom: 50.0,
            column_padding: 10.0,
            line_spacing: 1.4,
            page_width: LETTER.0,
            page_height: LETTER.1,
            include_sheet_name: true,
        }
    }
}

/// Average Helvetica glyph width is about half the font size.
pub(crate) fn avg_char_width(font_size: f32) -> f32 {
    font_size * 0.5
}

fn positive(what: &str, value: f32) -> Result<()> {
    if value <= 0.0 || !value.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "{} must be positive, got {}",
            what, value
        )));
    }
    Ok(())
}

fn non_negative(what: &str, value: f32) -> Result<()> {
    if value < 0.0 || !value.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "{} must not be negative, got {}",
            what, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LayoutOptions::default();
        assert_eq!(options.font_size, 10.0);
        assert_eq!(options.page_width, 612.0);
        assert_eq!(options.page_height, 792.0);
        assert_eq!(options.usable_width(), 512.0);
        assert_eq!(options.line_height(), 14.0);
        assert!(options.include_sheet_name);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let a4 = LayoutOptions::a4();
        assert_eq!((a4.page_width, a4.page_height), (595.0, 842.0));

        let landscape = LayoutOptions::landscape();
        assert_eq!((landscape.page_width, landscape.page_height), (792.0, 612.0));
        assert_eq!(LayoutOptions::a4().rotated().page_width, 842.0);
    }

    #[test]
    fn test_builder() {
        let options = LayoutOptions::new()
            .with_font_size(8.0)
            .with_margins(36.0)
            .with_column_padding(6.0)
            .with_line_spacing(1.2)
            .without_sheet_name();

        assert_eq!(options.font_size, 8.0);
        assert_eq!(options.margin_left, 36.0);
        assert_eq!(options.margin_bottom, 36.0);
        assert_eq!(options.column_padding, 6.0);
        assert!(!options.include_sheet_name);
        assert_eq!(options.avg_char_width(), 4.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            LayoutOptions::new().with_font_size(0.0),
            LayoutOptions::new().with_font_size(f32::NAN),
            LayoutOptions::new().with_page_size(0.0, 792.0),
            LayoutOptions::new().with_page_size(612.0, -1.0),
            LayoutOptions::new().with_line_spacing(0.0),
            LayoutOptions::new().with_margins(-5.0),
            LayoutOptions::new().with_column_padding(-1.0),
            LayoutOptions::new().with_margins(400.0),
        ];
        for options in cases {
            let err = options.validate().unwrap_err();
            assert!(err.is_argument_error(), "{:?}", options);
        }
    }
}
