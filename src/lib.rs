#![doc = include_str!("../README.md")]

pub mod aggregate;
pub mod record;
pub mod sheet;
pub mod table;
pub mod usd;
pub mod workbook;

pub use aggregate::{aggregate, pivot, AggregateRow, Dimension, Measure, PivotTable};
pub use record::Record;
pub use sheet::{format, Align, CellStyle, StyledCell, StyledSheet};
pub use table::{Cell, Table};
pub use usd::Usd;
pub use workbook::build;
