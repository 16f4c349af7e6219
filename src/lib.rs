//! # Gridfolio
//!
//! `gridfolio` searches every capital allocation on a discrete weight grid
//! and keeps the one that maximizes the annualized Sharpe ratio of the
//! resulting portfolio's daily returns. The search is exhaustive and exact
//! over the grid, with no continuous optimizer involved.
//!
//! ## Modules
//!
//! | Module                    | Description                                                         |
//! |---------------------------|---------------------------------------------------------------------|
//! | [`portfolio::prices`]     | Validated close-price matrices and their day-0 normalized form.     |
//! | [`portfolio::allocation`] | Enumeration of every discrete allocation vector summing to 1.       |
//! | [`portfolio::simulate`]   | Risk/return statistics of one allocation over a price history.      |
//! | [`portfolio::optimize`]   | Sequential and rayon-parallel brute-force best-Sharpe search.       |
//! | [`portfolio::report`]     | Structured search summary for the presentation layer.               |
//!
//! ## Parallelism
//!
//! Every candidate simulation is independent and side-effect-free, so
//! [`portfolio::GridOptimizer::optimize_par`] fans the search out over rayon
//! workers and merges results with a commutative max-by-Sharpe reduction that
//! is bit-identical to the sequential fold.
//!
//! ## Example Usage
//!
//! ```rust
//! use gridfolio::portfolio::{GridOptimizer, PriceMatrix};
//! use ndarray::array;
//!
//! let prices = PriceMatrix::new(array![[1.0, 1.0], [1.1, 0.9], [1.2, 1.0]])?;
//! let best = GridOptimizer::new(0.1, 2).optimize(&prices.normalized())?;
//! println!("sharpe {:.4} at {}", best.result.sharpe, best.allocation);
//! # anyhow::Ok(())
//! ```

pub mod portfolio;
