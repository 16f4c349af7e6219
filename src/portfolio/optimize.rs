//! # Grid Optimizer
//!
//! $$
//! \mathbf{w}^\* = \arg\max_{\mathbf{w} \in \mathcal{W}} \mathrm{Sharpe}(\mathbf{w})
//! $$
//!
//! Brute-force search for the highest-Sharpe allocation on the weight grid.

use anyhow::Result;
use anyhow::bail;
use impl_new_derive::ImplNew;
use ndarray::Array1;
use rayon::prelude::*;
use tracing::debug;
use tracing::info;

use super::allocation::grid_allocations;
use super::prices::NormalizedPrices;
use super::simulate::SimulationResult;
use super::simulate::simulate;

/// The winning allocation of a grid search.
#[derive(Clone, Debug, PartialEq)]
pub struct BestCandidate {
  /// Fractional capital weights, one per instrument, summing to 1.
  pub allocation: Array1<f64>,
  /// Statistics of the winning allocation.
  pub result: SimulationResult,
  /// Position in enumeration order; ties on sharpe keep the lowest index.
  pub index: usize,
}

/// Exhaustive search over the discrete allocation grid.
#[derive(ImplNew, Clone, Debug)]
pub struct GridOptimizer {
  /// Step size partitioning `[0, 1]`, e.g. 0.1 for an 11-point grid.
  pub grid_step: f64,
  /// Number of instruments; must match the price matrix column count.
  pub num_instruments: usize,
}

impl GridOptimizer {
  /// Materialize the candidate allocations in enumeration order.
  pub fn candidates(&self) -> Vec<Array1<f64>> {
    grid_allocations(self.grid_step, self.num_instruments)
  }

  /// Sequential search: fold every candidate through [`simulate`], keeping
  /// the strictly greatest finite sharpe. Candidates with non-finite sharpe
  /// (zero-volatility degenerates) are disqualified and can never win.
  pub fn optimize(&self, prices: &NormalizedPrices) -> Result<BestCandidate> {
    let candidates = self.feasible_candidates(prices)?;

    let mut best: Option<BestCandidate> = None;
    for (index, allocation) in candidates.into_iter().enumerate() {
      let result = simulate(prices, &allocation)?;
      debug!(index, sharpe = result.sharpe, "simulated candidate allocation");

      if !result.sharpe.is_finite() {
        continue;
      }
      if best
        .as_ref()
        .map_or(true, |b| result.sharpe > b.result.sharpe)
      {
        best = Some(BestCandidate {
          allocation,
          result,
          index,
        });
      }
    }

    self.finish(best)
  }

  /// Parallel search over the same candidate list. Each worker simulates
  /// locally and the results are merged with a commutative max-by-sharpe
  /// reduction (lower enumeration index wins ties), so the outcome is
  /// bit-identical to [`GridOptimizer::optimize`].
  pub fn optimize_par(&self, prices: &NormalizedPrices) -> Result<BestCandidate> {
    let candidates = self.feasible_candidates(prices)?;

    let best = candidates
      .into_par_iter()
      .enumerate()
      .map(|(index, allocation)| {
        simulate(prices, &allocation).map(|result| BestCandidate {
          allocation,
          result,
          index,
        })
      })
      .filter(|candidate| {
        candidate
          .as_ref()
          .map_or(true, |c| c.result.sharpe.is_finite())
      })
      .try_reduce_with(|a, b| Ok(prefer(a, b)));

    match best {
      Some(candidate) => self.finish(Some(candidate?)),
      None => self.finish(None),
    }
  }

  fn feasible_candidates(&self, prices: &NormalizedPrices) -> Result<Vec<Array1<f64>>> {
    if self.num_instruments != prices.num_instruments() {
      bail!(
        "optimizer is configured for {} instruments but the price matrix has {}",
        self.num_instruments,
        prices.num_instruments()
      );
    }

    let candidates = self.candidates();
    if candidates.is_empty() {
      bail!(
        "no feasible allocation: grid step {} cannot reach a unit sum over {} instruments",
        self.grid_step,
        self.num_instruments
      );
    }
    Ok(candidates)
  }

  fn finish(&self, best: Option<BestCandidate>) -> Result<BestCandidate> {
    match best {
      Some(best) => {
        info!(
          sharpe = best.result.sharpe,
          cumulative_return = best.result.cumulative_return,
          "grid search complete"
        );
        Ok(best)
      }
      None => bail!(
        "all candidate allocations were disqualified: every portfolio had zero volatility"
      ),
    }
  }
}

/// Commutative, associative merge: strictly greater sharpe wins, equal
/// sharpe keeps the earlier enumeration index.
fn prefer(a: BestCandidate, b: BestCandidate) -> BestCandidate {
  if b.result.sharpe > a.result.sharpe {
    b
  } else if a.result.sharpe > b.result.sharpe {
    a
  } else if a.index <= b.index {
    a
  } else {
    b
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::portfolio::prices::PriceMatrix;
  use ndarray::Array;
  use ndarray::array;
  use ndarray_rand::RandomExt;
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use rand_distr::Uniform;
  use tracing_test::traced_test;

  fn normalized(data: ndarray::Array2<f64>) -> NormalizedPrices {
    PriceMatrix::new(data).unwrap().normalized()
  }

  #[test]
  fn all_in_on_the_steady_riser() {
    // instrument 0 rises steadily, instrument 1 is noisy with no drift
    let prices = normalized(array![[1.0, 1.0], [1.1, 1.3], [1.21, 0.8], [1.33, 1.0]]);
    let best = GridOptimizer::new(0.5, 2).optimize(&prices).unwrap();

    assert_eq!(best.allocation, array![1.0, 0.0]);
    assert!(best.result.sharpe.is_finite());
  }

  #[test]
  fn infeasible_grid_reports_no_feasible_allocation() {
    let prices = normalized(array![[1.0, 1.0], [1.1, 0.9]]);
    let err = GridOptimizer::new(0.3, 2).optimize(&prices).unwrap_err();

    assert!(err.to_string().contains("no feasible allocation"));
  }

  #[test]
  fn constant_prices_disqualify_every_candidate() {
    let prices = normalized(array![[2.0, 5.0], [2.0, 5.0], [2.0, 5.0]]);
    let err = GridOptimizer::new(0.5, 2).optimize(&prices).unwrap_err();

    assert!(err.to_string().contains("disqualified"));
  }

  #[test]
  fn instrument_count_mismatch_fails_fast() {
    let prices = normalized(array![[1.0, 1.0], [1.1, 0.9]]);
    let err = GridOptimizer::new(0.5, 3).optimize(&prices).unwrap_err();

    assert!(err.to_string().contains("configured for 3 instruments"));
  }

  #[test]
  fn identical_columns_keep_the_first_seen_candidate() {
    // every allocation over identical columns yields the same portfolio, so
    // the strict comparison must keep the first-enumerated winner
    let prices = normalized(array![[1.0, 1.0], [1.2, 1.2], [1.1, 1.1]]);
    let best = GridOptimizer::new(0.5, 2).optimize(&prices).unwrap();

    assert_eq!(best.index, 0);
    assert_eq!(best.allocation, array![0.0, 1.0]);

    let parallel = GridOptimizer::new(0.5, 2).optimize_par(&prices).unwrap();
    assert_eq!(parallel, best);
  }

  #[test]
  fn parallel_search_matches_sequential_bit_for_bit() {
    let mut rng = StdRng::seed_from_u64(42);
    let closes = Array::random_using((60, 4), Uniform::new(20.0, 180.0), &mut rng);
    let prices = normalized(closes);

    let optimizer = GridOptimizer::new(0.1, 4);
    let sequential = optimizer.optimize(&prices).unwrap();
    let parallel = optimizer.optimize_par(&prices).unwrap();

    assert_eq!(sequential, parallel);
  }

  #[test]
  #[traced_test]
  fn search_logs_a_completion_event() {
    let prices = normalized(array![[1.0, 1.0], [1.1, 0.9], [1.2, 1.0]]);
    GridOptimizer::new(0.5, 2).optimize(&prices).unwrap();

    assert!(logs_contain("grid search complete"));
  }
}
