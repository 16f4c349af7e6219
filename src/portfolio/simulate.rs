//! # Portfolio Simulator
//!
//! $$
//! \mathrm{Sharpe} = \sqrt{252}\,\frac{\bar r}{\sigma_r}
//! $$
//!
//! Risk/return statistics of one allocation over a normalized price history.

use anyhow::Result;
use anyhow::bail;
use ndarray::Array1;
use ndarray::Axis;

use super::TRADING_DAYS_PER_YEAR;
use super::prices::NormalizedPrices;

/// Summary statistics of one simulated allocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationResult {
  /// Population standard deviation of the daily-return series.
  pub std_dev: f64,
  /// Arithmetic mean of the daily-return series.
  pub mean_daily_return: f64,
  /// Annualized Sharpe ratio, `sqrt(252) * mean / std_dev`. Non-finite when
  /// the return series has zero volatility.
  pub sharpe: f64,
  /// Terminal portfolio value relative to day 0 (1.1 means +10%). Kept as
  /// the raw ratio, not the ratio minus one.
  pub cumulative_return: f64,
}

/// Simulate holding `allocation` over the whole price history.
///
/// The portfolio value series is the row sum of the weight-scaled normalized
/// prices; it starts at 1.0 on day 0 because the weights sum to 1. The value
/// series is then converted to day-over-day returns with a leading zero, and
/// the statistics are taken over that full series. Pure: inputs are never
/// mutated and identical inputs produce bit-identical results.
pub fn simulate(
  prices: &NormalizedPrices,
  allocation: &Array1<f64>,
) -> Result<SimulationResult> {
  if allocation.len() != prices.num_instruments() {
    bail!(
      "allocation has {} weights but the price matrix has {} instruments",
      allocation.len(),
      prices.num_instruments()
    );
  }

  let weighted = prices.data() * allocation;
  let mut values = weighted.sum_axis(Axis(1));

  // terminal relative value, read before the in-place return conversion
  let cumulative_return = values[values.len() - 1];

  for i in (1..values.len()).rev() {
    values[i] = values[i] / values[i - 1] - 1.0;
  }
  values[0] = 0.0;

  let mean_daily_return = values.mean().unwrap_or(0.0);
  let std_dev = values.std(0.0);
  let sharpe = TRADING_DAYS_PER_YEAR.sqrt() * mean_daily_return / std_dev;

  Ok(SimulationResult {
    std_dev,
    mean_daily_return,
    sharpe,
    cumulative_return,
  })
}
