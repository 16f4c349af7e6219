//! # Allocation Grid
//!
//! $$
//! \mathcal{W} = \left\{ \mathbf{w} \in \{0, s, 2s, \dots\}^N : \textstyle\sum_i w_i = 1 \right\}
//! $$
//!
//! Enumeration of every discrete capital allocation on a fixed weight grid.

use ndarray::Array1;

/// Tolerance for the unit-sum constraint.
///
/// The constraint is tested against this band rather than exact float
/// equality, so that grids like `0.1 + 0.2 + 0.3 + 0.4` are not lost to
/// rounding drift.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Grid points `0, s, 2s, ...` up to and including 1.0.
pub fn grid_points(grid_step: f64) -> Vec<f64> {
  if !grid_step.is_finite() || grid_step <= 0.0 {
    return Vec::new();
  }

  let mut points = Vec::new();
  let mut k = 0usize;
  loop {
    let p = k as f64 * grid_step;
    if p > 1.0 + SUM_TOLERANCE {
      break;
    }
    points.push(p);
    k += 1;
  }
  points
}

/// Enumerate every allocation of `num_instruments` grid weights summing to 1.
///
/// Enumeration is nested lexicographic over ascending grid values with the
/// first instrument varying slowest. The result is materialized, ordered and
/// duplicate-free. A grid that cannot reach a unit sum (for example step 0.3
/// over 2 instruments) yields an empty vector; callers must treat that as the
/// no-feasible-allocation case rather than a valid search space.
pub fn grid_allocations(grid_step: f64, num_instruments: usize) -> Vec<Array1<f64>> {
  if num_instruments == 0 {
    return Vec::new();
  }

  let points = grid_points(grid_step);
  let mut out = Vec::new();
  let mut current = Vec::with_capacity(num_instruments);
  fill_slots(&points, num_instruments, 0.0, &mut current, &mut out);
  out
}

fn fill_slots(
  points: &[f64],
  slots_left: usize,
  sum: f64,
  current: &mut Vec<f64>,
  out: &mut Vec<Array1<f64>>,
) {
  if slots_left == 0 {
    if (sum - 1.0).abs() <= SUM_TOLERANCE {
      out.push(Array1::from_vec(current.clone()));
    }
    return;
  }

  for &p in points {
    // points ascend, the remaining ones can only overshoot the budget
    if sum + p > 1.0 + SUM_TOLERANCE {
      break;
    }
    current.push(p);
    fill_slots(points, slots_left - 1, sum + p, current, out);
    current.pop();
  }
}
