//! Column sizing and grouping.

use std::ops::Range;

use super::options::LayoutOptions;
use crate::model::Sheet;

/// A run of adjacent columns rendered together on one page sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    /// Sheet column indices covered by this group
    pub columns: Range<usize>,
    /// Final width of each column in the group
    pub widths: Vec<f32>,
}

impl ColumnGroup {
    /// Left edge of each column, starting at `origin`.
    pub fn offsets(&self, origin: f32, padding: f32) -> Vec<f32> {
        let mut x = origin;
        self.widths
            .iter()
            .map(|w| {
                let left = x;
                x += w + padding;
                left
            })
            .collect()
    }

    /// Total width including inner padding.
    pub fn total_width(&self, padding: f32) -> f32 {
        let gaps = self.widths.len().saturating_sub(1) as f32;
        self.widths.iter().sum::<f32>() + padding * gaps
    }
}

/// Column plan for a whole sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPlan {
    /// Gap between columns
    pub padding: f32,
    /// Groups in left-to-right order; empty when the sheet has no columns
    pub groups: Vec<ColumnGroup>,
}

/// Size the columns of `sheet` and split them into groups that fit the page.
pub fn plan_columns(sheet: &Sheet, options: &LayoutOptions) -> ColumnPlan {
    let count = sheet.column_count();
    let padding = column_padding(count, options.column_padding);
    let usable = options.usable_width();
    let avg = options.avg_char_width();

    let widths = natural_widths(sheet, count, usable, avg);
    let groups = group_columns(&widths, padding, usable)
        .into_iter()
        .map(|columns| {
            let widths = fit_group(&widths[columns.clone()], padding, usable, avg);
            ColumnGroup { columns, widths }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "sheet {:?}: {} columns in {} groups",
        sheet.name,
        count,
        groups.len()
    );
    ColumnPlan { padding, groups }
}

/// Padding shrinks for sheets wider than six columns.
pub(crate) fn column_padding(column_count: usize, padding: f32) -> f32 {
    if column_count <= 6 {
        padding
    } else {
        (padding * 6.0 / column_count as f32).max(4.0)
    }
}

/// Natural width of every column from its longest line.
pub(crate) fn natural_widths(sheet: &Sheet, count: usize, usable: f32, avg: f32) -> Vec<f32> {
    let max_width = if count <= 2 { usable * 0.95 } else { usable * 0.6 };
    let min_width = (if count > 12 { 5.0 * avg } else { 3.0 * avg }).min(max_width);

    let mut max_chars = vec![0usize; count];
    for row in &sheet.rows {
        for (col, cell) in row.iter().enumerate() {
            let longest = cell
                .text
                .lines()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0);
            max_chars[col] = max_chars[col].max(longest);
        }
    }

    max_chars
        .into_iter()
        .map(|chars| {
            let natural = (chars + 2) as f32 * avg;
            // f32::clamp panics when max_width < min_width on a tiny page
            natural.max(min_width).min(max_width)
        })
        .collect()
}

/// Greedy split into contiguous groups that fit `usable`.
pub(crate) fn group_columns(widths: &[f32], padding: f32, usable: f32) -> Vec<Range<usize>> {
    if widths.is_empty() {
        return Vec::new();
    }
    let gaps = (widths.len() - 1) as f32;
    let total = widths.iter().sum::<f32>() + padding * gaps;
    if total <= usable || widths.len() == 1 {
        return vec![0..widths.len()];
    }

    let mut groups = Vec::new();
    let mut start = 0;
    let mut group_width = 0.0f32;
    for (i, &w) in widths.iter().enumerate() {
        if i == start {
            group_width = w;
        } else if group_width + padding + w > usable {
            groups.push(start..i);
            start = i;
            group_width = w;
        } else {
            group_width += padding + w;
        }
    }
    groups.push(start..widths.len());
    groups
}

/// Scale a group's widths down so it fits, never below one character.
pub(crate) fn fit_group(widths: &[f32], padding: f32, usable: f32, avg: f32) -> Vec<f32> {
    let sum: f32 = widths.iter().sum();
    let gaps = widths.len().saturating_sub(1) as f32;
    if sum <= 0.0 || sum + padding * gaps <= usable {
        return widths.to_vec();
    }
    let factor = (usable - padding * gaps) / sum;
    widths.iter().map(|w| (w * factor).max(avg)).collect()
}
