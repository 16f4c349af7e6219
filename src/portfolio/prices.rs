//! # Price Matrices
//!
//! $$
//! \tilde P_{ij} = \frac{P_{ij}}{P_{0j}}
//! $$
//!
//! Validated close-price tables and their day-0 normalized form.

use anyhow::Result;
use anyhow::bail;
use ndarray::Array2;

/// Historical daily close prices.
///
/// Rows are trading days in chronological order (row 0 is the first day),
/// columns are instruments in symbol-list order. Construction rejects
/// matrices that cannot be simulated: fewer than 2 rows, no columns, or any
/// value that is non-finite or not strictly positive.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceMatrix {
  data: Array2<f64>,
}

impl PriceMatrix {
  /// Validate and wrap a close-price table.
  pub fn new(data: Array2<f64>) -> Result<Self> {
    if data.nrows() < 2 {
      bail!(
        "price matrix needs at least 2 trading days, got {}",
        data.nrows()
      );
    }
    if data.ncols() == 0 {
      bail!("price matrix has no instrument columns");
    }
    for ((day, instrument), &price) in data.indexed_iter() {
      if !price.is_finite() || price <= 0.0 {
        bail!(
          "invalid close price {} at day {}, instrument column {}",
          price,
          day,
          instrument
        );
      }
    }

    Ok(Self { data })
  }

  /// Number of trading days (rows).
  pub fn num_days(&self) -> usize {
    self.data.nrows()
  }

  /// Number of instruments (columns).
  pub fn num_instruments(&self) -> usize {
    self.data.ncols()
  }

  /// Borrow the underlying close prices.
  pub fn data(&self) -> &Array2<f64> {
    &self.data
  }

  /// Rescale every column so its day-0 price is 1.0.
  pub fn normalized(&self) -> NormalizedPrices {
    NormalizedPrices {
      data: &self.data / &self.data.row(0),
    }
  }
}

/// A [`PriceMatrix`] rescaled so that row 0 is all 1.0.
///
/// Only constructible through [`PriceMatrix::normalized`], so the validation
/// invariants (>= 2 rows, positive finite values) carry over.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedPrices {
  data: Array2<f64>,
}

impl NormalizedPrices {
  /// Number of trading days (rows).
  pub fn num_days(&self) -> usize {
    self.data.nrows()
  }

  /// Number of instruments (columns).
  pub fn num_instruments(&self) -> usize {
    self.data.ncols()
  }

  /// Borrow the normalized prices.
  pub fn data(&self) -> &Array2<f64> {
    &self.data
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;
  use ndarray::array;

  #[test]
  fn rejects_single_row() {
    let err = PriceMatrix::new(array![[1.0, 2.0]]).unwrap_err();
    assert!(err.to_string().contains("at least 2 trading days"));
  }

  #[test]
  fn rejects_empty_columns() {
    let err = PriceMatrix::new(Array2::zeros((3, 0))).unwrap_err();
    assert!(err.to_string().contains("no instrument columns"));
  }

  #[test]
  fn rejects_non_positive_price() {
    let err = PriceMatrix::new(array![[1.0, 2.0], [0.0, 2.1]]).unwrap_err();
    assert!(err.to_string().contains("invalid close price"));
  }

  #[test]
  fn rejects_nan_price() {
    let err = PriceMatrix::new(array![[1.0, 2.0], [f64::NAN, 2.1]]).unwrap_err();
    assert!(err.to_string().contains("invalid close price"));
  }

  #[test]
  fn normalization_sets_day_zero_to_one() {
    let prices = PriceMatrix::new(array![[50.0, 20.0], [55.0, 18.0], [60.0, 20.0]]).unwrap();
    let normalized = prices.normalized();

    for &v in normalized.data().row(0) {
      assert_relative_eq!(v, 1.0);
    }
    assert_relative_eq!(normalized.data()[[1, 0]], 1.1);
    assert_relative_eq!(normalized.data()[[1, 1]], 0.9);
    assert_relative_eq!(normalized.data()[[2, 0]], 1.2);
  }

  #[test]
  fn normalization_leaves_source_untouched() {
    let data = array![[50.0, 20.0], [55.0, 18.0]];
    let prices = PriceMatrix::new(data.clone()).unwrap();
    let _ = prices.normalized();

    assert_eq!(prices.data(), &data);
  }
}
