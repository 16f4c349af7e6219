//! # Optimization Report
//!
//! $$
//! (\mathbf{w}^\*, \sigma, \bar r, \mathrm{Sharpe}, R) \mapsto \text{table}
//! $$
//!
//! Structured summary of a grid search for the presentation layer.

use chrono::NaiveDate;
use prettytable::Table;
use prettytable::row;

use super::optimize::BestCandidate;

/// Everything the presentation layer needs about a finished search: the
/// inputs that framed it (symbols, date range) and the winning candidate.
#[derive(Clone, Debug)]
pub struct OptimizationReport {
  /// Instrument symbols in price-matrix column order.
  pub symbols: Vec<String>,
  /// First trading day of the simulated range.
  pub start_date: NaiveDate,
  /// Last trading day of the simulated range.
  pub end_date: NaiveDate,
  /// Winner of the grid search.
  pub best: BestCandidate,
}

impl OptimizationReport {
  /// Render the report as a console table.
  pub fn to_table(&self) -> Table {
    let allocation = self
      .symbols
      .iter()
      .zip(self.best.allocation.iter())
      .map(|(symbol, weight)| format!("{symbol} {weight:.2}"))
      .collect::<Vec<_>>()
      .join(", ");

    let mut table = Table::new();
    table.add_row(row!["Start Date", self.start_date]);
    table.add_row(row!["End Date", self.end_date]);
    table.add_row(row!["Optimal Allocation", allocation]);
    table.add_row(row!["Volatility", format!("{:.6}", self.best.result.std_dev)]);
    table.add_row(row![
      "Average Daily Return",
      format!("{:.6}", self.best.result.mean_daily_return)
    ]);
    table.add_row(row!["Sharpe Ratio", format!("{:.4}", self.best.result.sharpe)]);
    table.add_row(row![
      "Cumulative Return",
      format!("{:.4}", self.best.result.cumulative_return)
    ]);
    table
  }
}
