//! Style part (`xl/styles.xml`): the cellXf -> font -> color chain.

use quick_xml::events::{BytesStart, Event};

use super::xml::{attr, PartReader};
use crate::error::{Error, Result};
use crate::model::{parse_color, Color};

/// Legacy indexed palette, first 24 entries.
const INDEXED_PALETTE: [(u8, u8, u8); 24] = [
    (0x00, 0x00, 0x00),
    (0xFF, 0xFF, 0xFF),
    (0xFF, 0x00, 0x00),
    (0x00, 0xFF, 0x00),
    (0x00, 0x00, 0xFF),
    (0xFF, 0xFF, 0x00),
    (0xFF, 0x00, 0xFF),
    (0x00, 0xFF, 0xFF),
    (0x00, 0x00, 0x00),
    (0xFF, 0xFF, 0xFF),
    (0xFF, 0x00, 0x00),
    (0x00, 0xFF, 0x00),
    (0x00, 0x00, 0xFF),
    (0xFF, 0xFF, 0x00),
    (0xFF, 0x00, 0xFF),
    (0x00, 0xFF, 0xFF),
    (0x80, 0x00, 0x00),
    (0x00, 0x80, 0x00),
    (0x00, 0x00, 0x80),
    (0x80, 0x80, 0x00),
    (0x80, 0x00, 0x80),
    (0x00, 0x80, 0x80),
    (0xC0, 0xC0, 0xC0),
    (0x80, 0x80, 0x80),
];

/// Resolve an indexed color; indices past the palette have no color.
pub(crate) fn indexed_color(index: usize) -> Option<Color> {
    INDEXED_PALETTE
        .get(index)
        .map(|&(r, g, b)| Color::from_rgb8(r, g, b))
}

/// Lookup tables built from the style part.
#[derive(Debug, Clone, Default)]
pub(crate) struct StyleTable {
    /// Font index -> font color
    pub font_colors: Vec<Option<Color>>,
    /// Cell style (xf) index -> font index
    pub cell_xf_fonts: Vec<usize>,
}

impl StyleTable {
    /// Resolve a cell's style index to its font color.
    ///
    /// Any broken link in the chain resolves to `None`.
    pub(crate) fn cell_color(&self, style_index: usize) -> Option<Color> {
        let font = *self.cell_xf_fonts.get(style_index)?;
        self.font_colors.get(font).copied().flatten()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Other,
    Fonts,
    CellXfs,
}

pub(crate) fn parse_styles(xml: &str, part: &str) -> Result<StyleTable> {
    let mut reader = PartReader::new(xml, part);
    let mut table = StyleTable::default();
    let mut section = Section::Other;
    // Color of the <font> currently open inside <fonts>
    let mut font: Option<Option<Color>> = None;

    loop {
        let event = reader.read_event()?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match (section, e.local_name().as_ref()) {
                    (Section::Other, b"fonts") if !is_empty => section = Section::Fonts,
                    (Section::Other, b"cellXfs") if !is_empty => section = Section::CellXfs,
                    (Section::Fonts, b"font") => {
                        if is_empty {
                            table.font_colors.push(None);
                        } else {
                            font = Some(None);
                        }
                    }
                    (Section::Fonts, b"color") => {
                        if let Some(slot) = font.as_mut() {
                            *slot = font_color(e).map_err(|err| Error::xml(part, err))?;
                        }
                    }
                    (Section::CellXfs, b"xf") => {
                        let font_id = attr(e, b"fontId")
                            .map_err(|err| Error::xml(part, err))?
                            .and_then(|v| v.trim().parse().ok())
                            .unwrap_or(0);
                        table.cell_xf_fonts.push(font_id);
                    }
                    _ => {}
                }
            }
            Event::End(ref e) => match (section, e.local_name().as_ref()) {
                (Section::Fonts, b"font") => {
                    if let Some(color) = font.take() {
                        table.font_colors.push(color);
                    }
                }
                (Section::Fonts, b"fonts") | (Section::CellXfs, b"cellXfs") => {
                    section = Section::Other;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    log::debug!(
        "{}: {} fonts, {} cell formats",
        part,
        table.font_colors.len(),
        table.cell_xf_fonts.len()
    );
    Ok(table)
}

/// Color of a `<color>` element: `rgb` first, then `indexed`. Theme colors
/// are not resolved.
fn font_color(e: &BytesStart<'_>) -> std::result::Result<Option<Color>, quick_xml::Error> {
    if let Some(rgb) = attr(e, b"rgb")? {
        return Ok(Some(parse_color(&rgb)));
    }
    if let Some(indexed) = attr(e, b"indexed")? {
        return Ok(indexed.trim().parse().ok().and_then(indexed_color));
    }
    Ok(None)
}
