//! Row placement and page breaking.

use super::columns::{plan_columns, ColumnGroup};
use super::options::LayoutOptions;
use super::wrap::wrap_text;
use crate::error::Result;
use crate::model::{Color, Page, Sheet, TextRun};

/// Lay out one sheet into pages.
///
/// Each column group gets its own page sequence. The sheet name header, when
/// enabled, appears once above the first group. A sheet without columns
/// yields a single blank page.
pub fn layout_sheet(sheet: &Sheet, options: &LayoutOptions) -> Result<Vec<Page>> {
    options.validate()?;

    let plan = plan_columns(sheet, options);
    if plan.groups.is_empty() {
        log::debug!("sheet {:?} has no columns, emitting a blank page", sheet.name);
        return Ok(vec![Page::new(options.page_width, options.page_height)?]);
    }

    let mut pages = Vec::new();
    for (index, group) in plan.groups.iter().enumerate() {
        let header = (index == 0 && options.include_sheet_name).then_some(sheet.name.as_str());
        let mut cursor = PageCursor::new(options);
        cursor.layout_group(sheet, group, plan.padding, header)?;
        pages.extend(cursor.finish());
    }

    log::debug!("sheet {:?}: {} pages", sheet.name, pages.len());
    Ok(pages)
}

/// Vertical position on the current page plus the pages produced so far.
struct PageCursor<'a> {
    options: &'a LayoutOptions,
    pages: Vec<Page>,
    current: Option<Page>,
    y: f32,
    rows_on_page: usize,
}

impl<'a> PageCursor<'a> {
    fn new(options: &'a LayoutOptions) -> Self {
        Self {
            options,
            pages: Vec::new(),
            current: None,
            y: options.page_height - options.margin_top,
            rows_on_page: 0,
        }
    }

    fn layout_group(
        &mut self,
        sheet: &Sheet,
        group: &ColumnGroup,
        padding: f32,
        header: Option<&str>,
    ) -> Result<()> {
        let options = self.options;
        let line_height = options.line_height();
        let offsets = group.offsets(options.margin_left, padding);

        if let Some(name) = header {
            if !name.is_empty() {
                let run = TextRun::new(name, options.margin_left, self.y, options.font_size)?;
                self.page()?.push_run(run);
            }
            self.y -= 2.0 * line_height;
        }

        for row in &sheet.rows {
            let mut cells = Vec::with_capacity(group.widths.len());
            let mut max_lines = 0;
            for (slot, col) in group.columns.clone().enumerate() {
                let Some(cell) = row.get(col).filter(|c| !c.is_empty()) else {
                    continue;
                };
                let lines = wrap_text(&cell.text, group.widths[slot], options.font_size)?;
                max_lines = max_lines.max(lines.len());
                cells.push((offsets[slot], cell.color.unwrap_or(Color::BLACK), lines));
            }

            let row_height = line_height * max_lines.max(1) as f32;
            if self.y - row_height < options.margin_bottom && self.rows_on_page > 0 {
                self.break_page();
            }

            for (x, color, lines) in cells {
                for (i, line) in lines.into_iter().enumerate() {
                    if line.is_empty() {
                        continue;
                    }
                    let y = self.y - i as f32 * line_height;
                    let run = TextRun::with_color(line, x, y, options.font_size, color)?;
                    self.page()?.push_run(run);
                }
            }

            self.y -= row_height;
            self.rows_on_page += 1;
        }
        Ok(())
    }

    /// The page being filled, created on first use.
    fn page(&mut self) -> Result<&mut Page> {
        let page = match self.current.take() {
            Some(page) => page,
            None => Page::new(self.options.page_width, self.options.page_height)?,
        };
        Ok(self.current.insert(page))
    }

    fn break_page(&mut self) {
        if let Some(page) = self.current.take() {
            self.pages.push(page);
        }
        self.y = self.options.page_height - self.options.margin_top;
        self.rows_on_page = 0;
    }

    fn finish(mut self) -> Vec<Page> {
        if let Some(page) = self.current.take() {
            self.pages.push(page);
        }
        self.pages
    }
}
