use std::collections::{BTreeMap, BTreeSet};

use crate::record::Record;

/// Per-product sales totals, as shown on the report's `Summary` sheet.
///
/// `average_sale` is the mean revenue per *transaction* for the category
/// (weighted by record count, not by units sold).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub category: String,
    pub total_units: u64,
    pub total_revenue: f64,
    pub average_sale: f64,
}

/// A grouping dimension for the pivot: which record field supplies the
/// row or column labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Product,
    Region,
}

impl Dimension {
    fn value<'a>(self, record: &'a Record) -> &'a str {
        match self {
            Dimension::Product => &record.product,
            Dimension::Region => &record.region,
        }
    }
}

/// The numeric field summed into each pivot cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    TotalSales,
    UnitsSold,
}

impl Measure {
    fn value(self, record: &Record) -> f64 {
        match self {
            Measure::TotalSales => record.total_sales(),
            Measure::UnitsSold => f64::from(record.units_sold),
        }
    }
}

/// A rectangular cross-tabulation: one row per distinct row-dimension value,
/// one column per distinct column-dimension value, each cell the sum of the
/// measure for that pair. Combinations never observed hold an explicit 0.0,
/// and labels on both axes are sorted ascending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PivotTable {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl PivotTable {
    /// Sum of every cell in the table.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }
}

#[derive(Default)]
struct Totals {
    units: u64,
    revenue: f64,
    count: u32,
}

/// Computes per-product totals from `records`: units sold, revenue, and mean
/// sale value. Rows come back sorted ascending by category name, so the
/// output order is reproducible run to run; an empty input yields an empty
/// `Vec`. The input is not modified.
#[must_use]
pub fn aggregate(records: &[Record]) -> Vec<AggregateRow> {
    let mut totals: BTreeMap<&str, Totals> = BTreeMap::new();
    for record in records {
        let t = totals.entry(&record.product).or_default();
        t.units += u64::from(record.units_sold);
        t.revenue += record.total_sales();
        t.count += 1;
    }
    totals
        .into_iter()
        .map(|(category, t)| AggregateRow {
            category: category.to_string(),
            total_units: t.units,
            total_revenue: t.revenue,
            average_sale: t.revenue / f64::from(t.count),
        })
        .collect()
}

/// Cross-tabulates `records`, summing `measure` for every (row, column)
/// label pair.
///
/// The result is always rectangular: both label sets are the sorted distinct
/// values seen in the data, and pairs with no matching records get 0.0
/// rather than being omitted. An empty input yields a table with no rows and
/// no columns.
#[must_use]
pub fn pivot(records: &[Record], measure: Measure, rows: Dimension, cols: Dimension) -> PivotTable {
    let row_labels: BTreeSet<&str> = records.iter().map(|r| rows.value(r)).collect();
    let col_labels: BTreeSet<&str> = records.iter().map(|r| cols.value(r)).collect();
    let mut sums: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for record in records {
        *sums
            .entry((rows.value(record), cols.value(record)))
            .or_default() += measure.value(record);
    }
    let cells = row_labels
        .iter()
        .map(|row| {
            col_labels
                .iter()
                .map(|col| sums.get(&(*row, *col)).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();
    PivotTable {
        row_labels: row_labels.iter().map(ToString::to_string).collect(),
        col_labels: col_labels.iter().map(ToString::to_string).collect(),
        cells,
    }
}
