//! Turns a [`Table`] into a styled, width-fitted sheet ready for
//! serialization. Nothing here knows about xlsx; the output is consumed by
//! the workbook writer.

use crate::table::{Cell, Table};

/// Solid fill behind the header row.
pub const HEADER_FILL_RGB: u32 = 0x4F81BD;
/// Number format for values whose magnitude exceeds the currency threshold.
pub const CURRENCY_FORMAT: &str = "$#,##0.00";
/// Number format for everything else numeric.
pub const INTEGER_FORMAT: &str = "0";
/// Number format for date cells.
pub const DATE_FORMAT: &str = "yyyy-mm-dd";
/// Point size of the title band text.
pub const TITLE_FONT_SIZE: f64 = 14.0;

// A value must be strictly greater than this to render as currency; exactly
// 1000 stays integer-formatted. Inherited quirk: large non-money numbers
// render as currency too.
const CURRENCY_THRESHOLD: f64 = 1000.0;

const WIDTH_PADDING: usize = 2;
const WIDTH_SCALE: f64 = 1.2;

/// Horizontal alignment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Default,
    Center,
    Right,
}

/// An immutable style descriptor. Styles are constructed once per rule and
/// applied to cells; nothing mutates one after construction, so no state can
/// leak between cells or sheets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: Option<f64>,
    pub font_color: Option<u32>,
    pub fill: Option<u32>,
    pub bordered: bool,
    pub align: Align,
    pub number_format: Option<&'static str>,
}

impl CellStyle {
    /// Default style: no emphasis, no number format.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Title band: bold, enlarged, centered.
    #[must_use]
    pub fn title() -> Self {
        Self {
            bold: true,
            font_size: Some(TITLE_FONT_SIZE),
            align: Align::Center,
            ..Self::default()
        }
    }

    /// Header row: bold white on a solid fill, thin border, centered.
    #[must_use]
    pub fn header() -> Self {
        Self {
            bold: true,
            font_color: Some(0xFF_FF_FF),
            fill: Some(HEADER_FILL_RGB),
            bordered: true,
            align: Align::Center,
            ..Self::default()
        }
    }

    /// Right-aligned integer number format.
    #[must_use]
    pub fn integer() -> Self {
        Self {
            align: Align::Right,
            number_format: Some(INTEGER_FORMAT),
            ..Self::default()
        }
    }

    /// Right-aligned currency number format.
    #[must_use]
    pub fn currency() -> Self {
        Self {
            align: Align::Right,
            number_format: Some(CURRENCY_FORMAT),
            ..Self::default()
        }
    }

    /// Date number format, default alignment.
    #[must_use]
    pub fn date() -> Self {
        Self {
            number_format: Some(DATE_FORMAT),
            ..Self::default()
        }
    }
}

/// A cell paired with the style it should be rendered in.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    pub value: Cell,
    pub style: CellStyle,
}

/// A formatted table ready for serialization: title band, styled header,
/// styled data rows, and a fitted width per column. Decoupled from the final
/// file format.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledSheet {
    pub title: String,
    pub column_widths: Vec<f64>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<StyledCell>>,
}

/// Applies the full formatting pass to `table`: fitted column widths, header
/// styling, the title band, and per-cell number formats chosen by value
/// magnitude. Formatting never fails: a cell that can't be measured or typed
/// just gets the safe default for that rule.
#[must_use]
pub fn format(table: &Table, title: &str) -> StyledSheet {
    let column_widths = (0..table.column_count())
        .map(|col| column_width(table, col))
        .collect();
    let rows = table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| StyledCell {
                    value: cell.clone(),
                    style: style_for(cell),
                })
                .collect()
        })
        .collect();
    StyledSheet {
        title: title.to_string(),
        column_widths,
        headers: table.headers().to_vec(),
        rows,
    }
}

/// Fitted width of column `col`: the longest rendering among the header and
/// every data cell, plus padding, scaled. Cells that render to nothing
/// contribute zero length rather than breaking the computation.
#[must_use]
pub fn column_width(table: &Table, col: usize) -> f64 {
    let mut max_len = table.headers()[col].chars().count();
    for cell in table.column(col) {
        max_len = max_len.max(cell.display_len());
    }
    (max_len + WIDTH_PADDING) as f64 * WIDTH_SCALE
}

fn style_for(cell: &Cell) -> CellStyle {
    match cell.as_number() {
        Some(v) if v.abs() > CURRENCY_THRESHOLD => CellStyle::currency(),
        Some(_) => CellStyle::integer(),
        None => match cell {
            Cell::Date(_) => CellStyle::date(),
            _ => CellStyle::plain(),
        },
    }
}
