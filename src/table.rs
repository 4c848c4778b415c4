use anyhow::{bail, Result};
use chrono::NaiveDate;

use std::fmt::{self, Display};

/// A single table value. The set of kinds is closed: formatting and width
/// logic match on the variant rather than inspecting types at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Empty,
}

impl Cell {
    /// Returns the numeric value of an `Int` or `Float` cell, or `None` for
    /// everything else. Dates are not numbers for formatting purposes.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Int(n) => Some(*n as f64),
            Cell::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Character length of the cell as displayed. An `Empty` cell (or any
    /// future kind with no sensible rendering) contributes zero, so one odd
    /// value never breaks a column-width computation.
    #[must_use]
    pub fn display_len(&self) -> usize {
        match self {
            Cell::Empty => 0,
            other => other.to_string().chars().count(),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Int(n) => write!(f, "{n}"),
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Empty => Ok(()),
        }
    }
}

/// A write-once staging table: a header row plus data rows, all the same
/// width. Built by the report assembler and consumed immediately by the
/// worksheet formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given column headers.
    ///
    /// # Errors
    ///
    /// Returns an error if two headers share a name; that is a bug in the
    /// caller, not a data problem.
    pub fn new(headers: Vec<String>) -> Result<Self> {
        for (i, name) in headers.iter().enumerate() {
            if headers[..i].contains(name) {
                bail!("duplicate column header: {name}");
            }
        }
        Ok(Self {
            headers,
            rows: Vec::new(),
        })
    }

    /// Appends a data row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row's length doesn't match the header count.
    pub fn push_row(&mut self, cells: Vec<Cell>) -> Result<()> {
        if cells.len() != self.headers.len() {
            bail!(
                "row has {} cells, table has {} columns",
                cells.len(),
                self.headers.len(),
            );
        }
        self.rows.push(cells);
        Ok(())
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Iterates over the data cells of column `col`, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().map(move |row| &row[col])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fn_rejects_duplicate_headers() {
        assert!(Table::new(vec!["A".into(), "B".into(), "A".into()]).is_err());
    }

    #[test]
    fn push_row_fn_rejects_ragged_rows() {
        let mut table = Table::new(vec!["A".into(), "B".into()]).unwrap();
        assert!(table.push_row(vec![Cell::Int(1)]).is_err());
        assert!(table
            .push_row(vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)])
            .is_err());
        assert!(table.push_row(vec![Cell::Int(1), Cell::Int(2)]).is_ok());
    }

    #[test]
    fn display_len_fn_counts_rendered_chars() {
        assert_eq!(Cell::Text("Keyboard".into()).display_len(), 8);
        assert_eq!(Cell::Int(-42).display_len(), 3);
        let date = NaiveDate::from_ymd_opt(2023, 4, 2).unwrap();
        assert_eq!(Cell::Date(date).display_len(), 10);
    }

    #[test]
    fn display_len_fn_treats_empty_as_zero_length() {
        assert_eq!(Cell::Empty.display_len(), 0);
    }

    #[test]
    fn as_number_fn_covers_ints_and_floats_only() {
        assert_eq!(Cell::Int(3).as_number(), Some(3.0));
        assert_eq!(Cell::Float(1.5).as_number(), Some(1.5));
        assert_eq!(Cell::Text("3".into()).as_number(), None);
        let date = NaiveDate::from_ymd_opt(2023, 4, 2).unwrap();
        assert_eq!(Cell::Date(date).as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }

    #[test]
    fn column_fn_iterates_a_single_column() {
        let mut table = Table::new(vec!["A".into(), "B".into()]).unwrap();
        table.push_row(vec![Cell::Int(1), Cell::Int(2)]).unwrap();
        table.push_row(vec![Cell::Int(3), Cell::Int(4)]).unwrap();
        let col: Vec<_> = table.column(1).cloned().collect();
        assert_eq!(col, vec![Cell::Int(2), Cell::Int(4)]);
    }
}
