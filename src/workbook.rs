use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Range, Reader, open_workbook_auto};
use umya_spreadsheet::structs::{
    HorizontalAlignmentValues, PatternValues, VerticalAlignmentValues,
};

use crate::table::{CellValue, Table};

// Color::set_argb() turns values found in umya's INDEXED_COLORS into indexed="n",
// which some viewers render with a different palette. Lowercase hex never matches
// that table, so rgb="..." is written as given.
pub const HEADER_FILL_ARGB: &str = "ff4f81bd";
pub const HEADER_FONT_ARGB: &str = "ffffffff";
pub const MIN_COLUMN_WIDTH: f64 = 12.0;

const DEFAULT_SHEET: &str = "Sheet1";

fn column_number_to_name(mut column: u32) -> String {
    // 1 -> A, 26 -> Z, 27 -> AA ...
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

pub fn cell_ref(col_1based: u32, row_1based: u32) -> String {
    format!("{}{}", column_number_to_name(col_1based), row_1based)
}

/// Header length plus a two character margin, never narrower than the floor.
pub fn column_width(header: &str) -> f64 {
    (header.chars().count() as f64 + 2.0).max(MIN_COLUMN_WIDTH)
}

/// Phase one: every table on its own sheet, headers in row 1, no styling.
/// The workbook is dropped once it is on disk.
pub fn write_tables(path: &Path, tables: &[Table]) -> Result<()> {
    if tables.is_empty() {
        return Err(anyhow!("no worksheets to write"));
    }
    for table in tables {
        table.validate()?;
    }

    let mut book = umya_spreadsheet::new_file();

    for (index, table) in tables.iter().enumerate() {
        let sheet = if index == 0 {
            let sheet = book
                .get_sheet_by_name_mut(DEFAULT_SHEET)
                .ok_or_else(|| anyhow!("new workbook has no {DEFAULT_SHEET}"))?;
            sheet.set_name(table.name.as_str());
            sheet
        } else {
            book.new_sheet(table.name.as_str())
                .map_err(|e| anyhow!("cannot add worksheet {}: {e}", table.name))?
        };

        for (col, header) in table.headers().into_iter().enumerate() {
            let addr = cell_ref(col as u32 + 1, 1);
            sheet.get_cell_mut(addr.as_str()).set_value_string(header);
        }

        for row in 0..table.row_count() {
            for (col, value) in table.row(row).into_iter().enumerate() {
                let addr = cell_ref(col as u32 + 1, row as u32 + 2);
                let cell = sheet.get_cell_mut(addr.as_str());
                match value {
                    CellValue::Decimal(n) => {
                        cell.set_value_number(*n);
                    }
                    CellValue::Integer(n) => {
                        cell.set_value_number(*n as f64);
                    }
                    // phone numbers like "+1234567890" must stay text
                    CellValue::Text(_) | CellValue::Date(_) => {
                        cell.set_value_string(value.display());
                    }
                }
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .with_context(|| format!("cannot save workbook: {}", path.display()))?;
    Ok(())
}

fn header_style() -> umya_spreadsheet::Style {
    let mut style = umya_spreadsheet::Style::default();
    let pattern = style.get_fill_mut().get_pattern_fill_mut();
    pattern.set_pattern_type(PatternValues::Solid);
    pattern.get_foreground_color_mut().set_argb(HEADER_FILL_ARGB);
    pattern.get_background_color_mut().set_argb(HEADER_FILL_ARGB);

    let font = style.get_font_mut();
    font.set_bold(true);
    font.get_color_mut().set_argb(HEADER_FONT_ARGB);

    let alignment = style.get_alignment_mut();
    alignment.set_horizontal(HorizontalAlignmentValues::Center);
    alignment.set_vertical(VerticalAlignmentValues::Center);
    style
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("no file name in {}", path.display()))?
        .to_string_lossy();
    Ok(path.with_file_name(format!(".{file_name}.styling")))
}

/// Phase two: reopen the saved workbook, style row 1 of every sheet and
/// size its columns. The styled copy replaces `path` only once it is fully
/// written; on error `path` is left exactly as phase one produced it.
pub fn style_headers(path: &Path) -> Result<()> {
    let mut book = umya_spreadsheet::reader::xlsx::read(path)
        .with_context(|| format!("cannot reopen workbook: {}", path.display()))?;

    let style = header_style();
    let sheet_names: Vec<String> = book
        .get_sheet_collection()
        .iter()
        .map(|s| s.get_name().to_string())
        .collect();

    for sheet_name in &sheet_names {
        let sheet = book
            .get_sheet_by_name_mut(sheet_name)
            .ok_or_else(|| anyhow!("worksheet not found: {sheet_name}"))?;

        for col in 1..=sheet.get_highest_column() {
            let addr = cell_ref(col, 1);
            let header = sheet.get_value(addr.as_str());
            sheet.get_cell_mut(addr.as_str()).set_style(style.clone());
            sheet
                .get_column_dimension_mut(&column_number_to_name(col))
                .set_width(column_width(&header));
        }
    }

    let staging = staging_path(path)?;
    if let Err(err) = umya_spreadsheet::writer::xlsx::write(&book, &staging) {
        let _ = fs::remove_file(&staging);
        return Err(err)
            .with_context(|| format!("cannot save styled workbook: {}", staging.display()));
    }
    fs::rename(&staging, path)
        .with_context(|| format!("cannot replace {} with styled copy", path.display()))?;
    Ok(())
}

fn datatype_to_string(cell: Option<&Data>) -> String {
    match cell {
        None => String::new(),
        Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(n)) => {
            if n.fract() == 0.0 {
                format!("{:.0}", n)
            } else {
                n.to_string()
            }
        }
        Some(Data::Int(n)) => n.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(Data::Error(e)) => format!("{e:?}"),
        Some(other) => format!("{other:?}"),
    }
}

fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let (height, width) = range.get_size();
    (0..height)
        .map(|row| {
            (0..width)
                .map(|col| datatype_to_string(range.get((row, col))))
                .collect()
        })
        .collect()
}

/// All rows of one sheet as display strings, header row included.
pub fn read_rows(path: &Path, sheet_name: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("cannot open {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("cannot read worksheet: {sheet_name}"))?;
    Ok(range_rows(&range))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetSummary {
    pub name: String,
    pub headers: Vec<String>,
    pub data_rows: usize,
}

/// Sheet names, header rows and data row counts as read back from disk.
pub fn summarize(path: &Path) -> Result<Vec<SheetSummary>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("cannot open {}", path.display()))?;

    let mut summaries = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("cannot read worksheet: {name}"))?;
        let mut rows = range_rows(&range).into_iter();
        let headers = rows.next().unwrap_or_default();
        summaries.push(SheetSummary {
            name,
            headers,
            data_rows: rows.len(),
        });
    }
    Ok(summaries)
}
