use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use sales_workbook::{build, Record};

/// Generates a formatted Excel workbook report from sales data.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// CSV file of sales records; omit to use random sample data
    input: Option<PathBuf>,
    /// Output path for the workbook [default: Sales_Report_<timestamp>.xlsx]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Number of sample records to generate when no input file is given
    #[arg(long, default_value_t = 100)]
    sample_size: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let records = match &args.input {
        Some(path) => Record::load_csv(path)?,
        None => Record::sample(args.sample_size),
    };
    let output = args.output.unwrap_or_else(|| {
        let stamp = Local::now().format("%Y%m%d_%H%M");
        PathBuf::from(format!("Sales_Report_{stamp}.xlsx"))
    });
    let path = build(&records, output)?;
    println!("Report generated successfully: {}", path.display());
    Ok(())
}
