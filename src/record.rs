use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::warn;
use rand::Rng;
use serde::Deserialize;

use std::path::Path;

use crate::usd::Usd;

/// One sales transaction, as loaded from a CSV file or generated as sample
/// data. Records are read-only once loaded: the whole pipeline takes them by
/// shared reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Units_Sold", alias = "Quantity")]
    pub units_sold: u32,
    #[serde(rename = "Unit_Price")]
    pub unit_price: Usd,
}

impl Record {
    /// Returns the revenue for this transaction in dollars:
    /// `units_sold × unit_price`.
    #[must_use]
    pub fn total_sales(&self) -> f64 {
        f64::from(self.units_sold) * self.unit_price.as_dollars()
    }

    /// Reads sales records from the CSV file at `path`.
    ///
    /// The file must have a header row naming the columns `Date`, `Product`,
    /// `Region`, `Units_Sold` (or `Quantity`), and `Unit_Price`. A row with
    /// missing or unparseable units or price is skipped with a warning rather
    /// than aborting the load.
    ///
    /// # Errors
    ///
    /// Returns any errors from opening or reading the file itself.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Record>> {
        let mut rdr = csv::Reader::from_path(&path)
            .with_context(|| format!("{}", path.as_ref().display()))?;
        let mut records = Vec::new();
        for result in rdr.deserialize() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => warn!("skipping malformed record: {e}"),
            }
        }
        Ok(records)
    }

    /// Generates `n` records of random sample data: five products across four
    /// regions, 2023 dates, 1–50 units at $100–$2000 each.
    #[must_use]
    pub fn sample(n: usize) -> Vec<Record> {
        const PRODUCTS: [&str; 5] = ["Laptop", "Phone", "Tablet", "Monitor", "Keyboard"];
        const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
        let mut rng = rand::thread_rng();
        (0..n)
            .map(|_| {
                // Day capped at 28, so any month is valid.
                let date = NaiveDate::from_ymd_opt(
                    2023,
                    rng.gen_range(1..=12),
                    rng.gen_range(1..=28),
                )
                .unwrap();
                #[allow(clippy::cast_possible_truncation)]
                let cents = (rng.gen_range(100.0..=2000.0) * 100.0_f64).round() as i64;
                Record {
                    date,
                    product: PRODUCTS[rng.gen_range(0..PRODUCTS.len())].to_string(),
                    region: REGIONS[rng.gen_range(0..REGIONS.len())].to_string(),
                    units_sold: rng.gen_range(1..=50),
                    unit_price: Usd::from_cents(cents),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_csv_fn_correctly_parses_sales_data() {
        let records = Record::load_csv("testdata/sales.csv").unwrap();
        assert_eq!(records.len(), 6, "wrong record count");
        let first = &records[0];
        assert_eq!(first.product, "Laptop");
        assert_eq!(first.region, "North");
        assert_eq!(first.units_sold, 10);
        assert_eq!(first.unit_price, Usd::from_cents(125_000));
        assert_eq!(
            first.date,
            NaiveDate::from_ymd_opt(2023, 4, 2).unwrap()
        );
    }

    #[test]
    fn load_csv_fn_accepts_quantity_as_units_column_name() {
        let records = Record::load_csv("testdata/sales_quantity.csv").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].units_sold, 3);
    }

    #[test]
    fn load_csv_fn_skips_malformed_rows_without_failing() {
        // Two of the five data rows have non-numeric units or a missing
        // price, and one has a negative price.
        let records = Record::load_csv("testdata/sales.bad.csv").unwrap();
        assert_eq!(records.len(), 2, "bad rows should be skipped, not kept");
    }

    #[test]
    fn load_csv_fn_returns_error_for_missing_file() {
        assert!(Record::load_csv("testdata/no_such_file.csv").is_err());
    }

    #[test]
    fn total_sales_fn_multiplies_units_by_price() {
        let record = Record {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            product: "Laptop".into(),
            region: "North".into(),
            units_sold: 3,
            unit_price: Usd::from_cents(1050),
        };
        assert!((record.total_sales() - 31.5).abs() < 1e-9);
    }

    #[test]
    fn sample_fn_generates_records_within_documented_ranges() {
        let records = Record::sample(100);
        assert_eq!(records.len(), 100);
        for r in &records {
            assert!((1..=50).contains(&r.units_sold));
            assert!(r.unit_price >= Usd::from_cents(10_000));
            assert!(r.unit_price <= Usd::from_cents(200_000));
        }
    }
}
