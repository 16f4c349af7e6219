//! # Portfolio
//!
//! $$
//! \mathbf{w}^\* = \arg\max_{\mathbf{w} \in \mathcal{W}} \sqrt{252}\,\frac{\bar r_p(\mathbf{w})}{\sigma_p(\mathbf{w})}
//! $$
//!
//! Brute-force portfolio allocation search over a discrete weight grid.

pub mod allocation;
pub mod optimize;
pub mod prices;
pub mod report;
pub mod simulate;

pub use allocation::SUM_TOLERANCE;
pub use allocation::grid_allocations;
pub use allocation::grid_points;
pub use optimize::BestCandidate;
pub use optimize::GridOptimizer;
pub use prices::NormalizedPrices;
pub use prices::PriceMatrix;
pub use report::OptimizationReport;
pub use simulate::SimulationResult;
pub use simulate::simulate;

/// NYSE trading days per year, used to annualize the Sharpe ratio.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
