use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};

use chrono::NaiveDate;
use gridfolio::portfolio::{GridOptimizer, OptimizationReport, PriceMatrix};
use ndarray::Array2;

fn main() -> Result<(), Box<dyn Error>> {
  let path = match env::args().nth(1) {
    Some(path) => path,
    None => {
      eprintln!("usage: gridfolio <closes.csv>");
      eprintln!("  first column: date (YYYY-MM-DD), then one close column per symbol");
      std::process::exit(2);
    }
  };

  let (symbols, dates, closes) = read_closes_csv(&path)?;
  println!(
    "Loaded {} trading days for {} symbols from {}",
    dates.len(),
    symbols.len(),
    path
  );

  let prices = PriceMatrix::new(closes)?;
  let normalized = prices.normalized();

  let optimizer = GridOptimizer::new(0.1, symbols.len());
  println!(
    "Scanning {} candidate allocations...",
    optimizer.candidates().len()
  );
  let best = optimizer.optimize_par(&normalized)?;

  let report = OptimizationReport {
    symbols,
    start_date: dates[0],
    end_date: dates[dates.len() - 1],
    best,
  };
  report.to_table().printstd();

  Ok(())
}

/// Parse a CSV of daily closes: header `date,SYM1,SYM2,...`, one row per
/// trading day in chronological order.
fn read_closes_csv(
  path: &str,
) -> Result<(Vec<String>, Vec<NaiveDate>, Array2<f64>), Box<dyn Error>> {
  let reader = BufReader::new(File::open(path)?);
  let mut lines = reader.lines();

  let header = lines.next().ok_or("empty file")??;
  let symbols: Vec<String> = header
    .split(',')
    .skip(1)
    .map(|s| s.trim().to_string())
    .collect();
  if symbols.is_empty() {
    return Err("header has no symbol columns".into());
  }

  let mut dates = Vec::new();
  let mut flat = Vec::new();
  for line in lines {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }

    let mut fields = line.split(',');
    let date = fields.next().ok_or("missing date field")?;
    dates.push(NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")?);

    let closes: Vec<f64> = fields
      .map(|f| f.trim().parse::<f64>())
      .collect::<Result<_, _>>()?;
    if closes.len() != symbols.len() {
      return Err(format!(
        "row for {} has {} closes, expected {}",
        date,
        closes.len(),
        symbols.len()
      )
      .into());
    }
    flat.extend(closes);
  }

  let matrix = Array2::from_shape_vec((dates.len(), symbols.len()), flat)?;
  Ok((symbols, dates, matrix))
}
