//! Workbook export: one sheet per category that produced rows.

use crate::config::OutputConfig;
use crate::error::SpiderError;
use crate::models::RankRow;
use crate::store::RankStore;
use log::{error, info};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};

pub const MIN_COLUMN_WIDTH: f64 = 8.0;
pub const MAX_COLUMN_WIDTH: f64 = 50.0;
const WIDTH_FACTOR: f64 = 1.1;
const WIDTH_PADDING: f64 = 2.0;
const HEADER_FONT_SIZE: f64 = 12.0;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook: {0}")]
    Xlsx(#[from] XlsxError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// Every category came back empty; nothing was written
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedCell<'a> {
    pub text: Option<&'a str>,
    pub bold: bool,
}

/// Everything needed to render one sheet
#[derive(Debug, Clone)]
pub struct SheetPlan<'a> {
    pub name: &'static str,
    pub key: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<Option<&'a str>>>,
    pub widths: Vec<f64>,
}

impl<'a> SheetPlan<'a> {
    fn new(name: &'static str, key: &'static str, headers: &'static [&'static str], rows: &'a [RankRow]) -> Self {
        let rows: Vec<Vec<Option<&'a str>>> = rows.iter().map(RankRow::cells).collect();
        let widths = column_widths(&rows, headers.len());
        Self { name, key, headers, rows, widths }
    }

    /// Sheet contents top to bottom: bold header row, then data rows
    pub fn grid(&self) -> Vec<Vec<PlannedCell<'a>>> {
        let header = self
            .headers
            .iter()
            .map(|h| PlannedCell { text: Some(*h), bold: true })
            .collect();

        std::iter::once(header)
            .chain(self.rows.iter().map(|row| {
                row.iter()
                    .map(|text| PlannedCell { text: *text, bold: false })
                    .collect()
            }))
            .collect()
    }
}

/// Width of a single cell before clamping; null counts as empty
fn cell_width(text: Option<&str>) -> f64 {
    let len = text.map_or(0, |t| t.chars().count());
    len as f64 * WIDTH_FACTOR + WIDTH_PADDING
}

/// Per-column width: widest data cell, clamped to [MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH]
pub fn column_widths(rows: &[Vec<Option<&str>>], columns: usize) -> Vec<f64> {
    (0..columns)
        .map(|col| {
            let widest = rows
                .iter()
                .map(|row| cell_width(row.get(col).copied().flatten()))
                .fold(0.0, f64::max);
            widest.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Plan a sheet for every non-empty category, in store order
pub fn plan_sheets(store: &RankStore) -> Vec<SheetPlan<'_>> {
    store
        .iter()
        .filter(|(_, rows)| !rows.is_empty())
        .map(|(category, rows)| {
            SheetPlan::new(category.name, category.key, category.group.headers(), rows)
        })
        .collect()
}

/// Render planned sheets into a workbook at `path`
pub fn write_workbook(plans: &[SheetPlan<'_>], path: &Path) -> Result<(), SaveError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold().set_font_size(HEADER_FONT_SIZE);

    for plan in plans {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(plan.name)?;

        for (r, row) in plan.grid().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let Some(text) = cell.text else { continue };
                if cell.bold {
                    worksheet.write_string_with_format(r as u32, c as u16, text, &header_format)?;
                } else {
                    worksheet.write_string(r as u32, c as u16, text)?;
                }
            }
        }

        for (c, width) in plan.widths.iter().enumerate() {
            worksheet.set_column_width(c as u16, *width)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Write the store to `<dir>/<prefix><timestamp>.xlsx`.
///
/// An empty store (or one whose categories all came back empty) is logged and
/// reported as `NoData` without touching the filesystem.
pub fn save(store: &RankStore, output: &OutputConfig) -> Result<SaveOutcome, SpiderError> {
    info!("Saving data...");

    let plans = plan_sheets(store);
    if plans.is_empty() {
        error!("No data has been saved.");
        return Ok(SaveOutcome::NoData);
    }

    let path = output.dir.join(output.file_name(chrono::Utc::now().timestamp()));
    let save_err = |source: SaveError| SpiderError::Save { path: path.clone(), source };

    if !output.dir.as_os_str().is_empty() && !output.dir.exists() {
        fs::create_dir_all(&output.dir).map_err(|e| save_err(e.into()))?;
    }

    write_workbook(&plans, &path).map_err(save_err)?;

    for plan in &plans {
        info!("Saved {} rows from ['{}']({})", plan.rows.len(), plan.name, plan.key);
    }
    info!("The Bilibili ranking data has been saved. File: {}", path.display());

    Ok(SaveOutcome::Saved(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn short_column_floors_to_minimum() {
        let rows = vec![vec![Some("1")], vec![Some("12")]];
        assert!(approx(column_widths(&rows, 1)[0], MIN_COLUMN_WIDTH));
    }

    #[test]
    fn long_column_caps_at_maximum() {
        let long = "x".repeat(45);
        let rows = vec![vec![Some(long.as_str())]];
        assert!(approx(column_widths(&rows, 1)[0], MAX_COLUMN_WIDTH));
    }

    #[test]
    fn mid_column_uses_formula() {
        let text = "y".repeat(20);
        let rows = vec![vec![Some(text.as_str())], vec![None]];
        assert!(approx(column_widths(&rows, 1)[0], 20.0 * 1.1 + 2.0));
    }

    #[test]
    fn null_counts_as_empty() {
        let rows = vec![vec![None, Some("abcdefghij")]];
        let widths = column_widths(&rows, 2);
        assert!(approx(widths[0], MIN_COLUMN_WIDTH));
        assert!(approx(widths[1], 10.0 * 1.1 + 2.0));
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        // 10 CJK characters, 30 bytes
        let text = "播放量播放量播放量播";
        let rows = vec![vec![Some(text)]];
        assert!(approx(column_widths(&rows, 1)[0], 10.0 * 1.1 + 2.0));
    }
}
