//! The report assembler: shapes records and derived views into tables, runs
//! them through the worksheet formatter, and persists the result as a
//! multi-sheet xlsx workbook.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    aggregate::{aggregate, pivot, AggregateRow, Dimension, Measure, PivotTable},
    record::Record,
    sheet::{format, Align, CellStyle, StyledSheet},
    table::{Cell, Table},
};

const SHEET_RAW: &str = "Raw Data";
const SHEET_SUMMARY: &str = "Summary";
const SHEET_PIVOT: &str = "Pivot Table";

const TITLE_RAW: &str = "Sales Raw Data";
const TITLE_SUMMARY: &str = "Sales Summary";
const TITLE_PIVOT: &str = "Sales by Region";

/// Builds the complete sales report from `records` and writes it to
/// `output`, returning the path for confirmation.
///
/// The workbook has three sheets: the raw records, per-product totals, and
/// total sales cross-tabulated by product and region. Given the same
/// records, the generated document is structurally identical on every run.
/// An empty record set produces a valid workbook with header-only sheets.
///
/// The write is atomic: the document is serialized to a buffer, written to a
/// temporary file beside `output`, and renamed into place, so a failure
/// leaves no half-written report behind.
///
/// # Errors
///
/// Returns an error if any sheet can't be serialized, or if the output
/// location can't be written.
pub fn build(records: &[Record], output: impl AsRef<Path>) -> Result<PathBuf> {
    let summary = aggregate(records);
    let by_region = pivot(
        records,
        Measure::TotalSales,
        Dimension::Product,
        Dimension::Region,
    );

    let sheets = [
        (SHEET_RAW, format(&raw_table(records)?, TITLE_RAW)),
        (SHEET_SUMMARY, format(&summary_table(&summary)?, TITLE_SUMMARY)),
        (SHEET_PIVOT, format(&pivot_table(&by_region)?, TITLE_PIVOT)),
    ];

    let mut workbook = Workbook::new();
    for (name, styled) in &sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;
        write_sheet(worksheet, styled)?;
    }
    let buffer = workbook.save_to_buffer()?;

    let path = output.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    tmp.write_all(&buffer)
        .with_context(|| format!("writing {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path.to_path_buf())
}

/// Stages the raw records as a table, including the derived `Total_Sales`
/// column.
fn raw_table(records: &[Record]) -> Result<Table> {
    let mut table = Table::new(
        ["Date", "Product", "Region", "Units_Sold", "Unit_Price", "Total_Sales"]
            .map(String::from)
            .to_vec(),
    )?;
    for r in records {
        table.push_row(vec![
            Cell::Date(r.date),
            Cell::Text(r.product.clone()),
            Cell::Text(r.region.clone()),
            Cell::Int(i64::from(r.units_sold)),
            Cell::Float(r.unit_price.as_dollars()),
            Cell::Float(r.total_sales()),
        ])?;
    }
    Ok(table)
}

fn summary_table(rows: &[AggregateRow]) -> Result<Table> {
    let mut table = Table::new(
        ["Product", "Total Units Sold", "Total Revenue", "Average Sale"]
            .map(String::from)
            .to_vec(),
    )?;
    for row in rows {
        table.push_row(vec![
            Cell::Text(row.category.clone()),
            Cell::Int(i64::try_from(row.total_units)?),
            Cell::Float(row.total_revenue),
            Cell::Float(row.average_sale),
        ])?;
    }
    Ok(table)
}

/// Stages a pivot as a table with the row labels as a leading column.
fn pivot_table(p: &PivotTable) -> Result<Table> {
    let mut headers = vec!["Product".to_string()];
    headers.extend(p.col_labels.iter().cloned());
    let mut table = Table::new(headers)?;
    for (label, cells) in p.row_labels.iter().zip(&p.cells) {
        let mut row = vec![Cell::Text(label.clone())];
        row.extend(cells.iter().map(|&v| Cell::Float(v)));
        table.push_row(row)?;
    }
    Ok(table)
}

/// Serializes one styled sheet: fitted widths, title band merged across the
/// table, styled header row, then the data rows.
fn write_sheet(worksheet: &mut Worksheet, sheet: &StyledSheet) -> Result<(), XlsxError> {
    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let cols = sheet.headers.len();
    let title_format = to_format(&CellStyle::title());
    if cols > 1 {
        worksheet.merge_range(0, 0, 0, (cols - 1) as u16, &sheet.title, &title_format)?;
    } else {
        worksheet.write_string_with_format(0, 0, &sheet.title, &title_format)?;
    }

    let header_format = to_format(&CellStyle::header());
    for (col, name) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(1, col as u16, name, &header_format)?;
    }

    for (i, row) in sheet.rows.iter().enumerate() {
        let row_idx = (i + 2) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col_idx = col as u16;
            let fmt = to_format(&cell.style);
            match &cell.value {
                Cell::Text(s) => {
                    worksheet.write_string_with_format(row_idx, col_idx, s, &fmt)?;
                }
                Cell::Int(n) => {
                    worksheet.write_number_with_format(row_idx, col_idx, *n as f64, &fmt)?;
                }
                Cell::Float(x) => {
                    worksheet.write_number_with_format(row_idx, col_idx, *x, &fmt)?;
                }
                Cell::Date(d) => {
                    worksheet.write_datetime_with_format(row_idx, col_idx, d, &fmt)?;
                }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}

fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    if let Some(color) = style.font_color {
        format = format.set_font_color(Color::RGB(color));
    }
    if let Some(fill) = style.fill {
        format = format.set_background_color(Color::RGB(fill));
    }
    if style.bordered {
        format = format.set_border(FormatBorder::Thin);
    }
    format = match style.align {
        Align::Default => format,
        Align::Center => format.set_align(FormatAlign::Center),
        Align::Right => format.set_align(FormatAlign::Right),
    };
    if let Some(num_format) = style.number_format {
        format = format.set_num_format(num_format);
    }
    format
}
