//! Sequence segmentation into runs of fixations.
//!
//! A run is a maximal stretch of consecutive fixations hypothesised to sit
//! on one line of text. Segmentation never reorders anything: runs are
//! contiguous index ranges that together cover `[0, n)` in order.
//!
//! Two boundary rules are provided:
//! - proximity ([`split_by_proximity`]): a new run starts wherever the
//!   horizontal or vertical jump between consecutive fixations exceeds a
//!   threshold. Used by `chain` and `slice`.
//! - saccade direction ([`split_by_saccade`]): a new run starts at every
//!   regressive saccade (leftward for left-to-right text, rightward for
//!   right-to-left text), optionally also at large vertical jumps. Used by
//!   `merge`.
//!
//! `split` derives its own boundaries from clustered saccade lengths and
//! hands them to [`split_at`].

use std::ops::Range;

/// Contiguous, non-empty range of fixation indices.
pub type Run = Range<usize>;

/// Split `[0, n)` so that a run starts at every index in `boundaries`.
///
/// Boundaries outside `1..n` are ignored, as are duplicates; they need not be
/// sorted.
pub fn split_at(n: usize, boundaries: &[usize]) -> Vec<Run> {
    if n == 0 {
        return Vec::new();
    }
    let mut cuts: Vec<usize> = boundaries
        .iter()
        .copied()
        .filter(|&b| b > 0 && b < n)
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut runs = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        runs.push(start..cut);
        start = cut;
    }
    runs.push(start..n);
    runs
}

/// Runs broken wherever `|dx| > x_thresh` or `|dy| > y_thresh`.
pub fn split_by_proximity(points: &[[i32; 2]], x_thresh: f64, y_thresh: f64) -> Vec<Run> {
    let boundaries: Vec<usize> = (1..points.len())
        .filter(|&i| {
            let dx = (points[i][0] - points[i - 1][0]).abs() as f64;
            let dy = (points[i][1] - points[i - 1][1]).abs() as f64;
            dx > x_thresh || dy > y_thresh
        })
        .collect();
    split_at(points.len(), &boundaries)
}

/// Runs broken at every regressive saccade and, when `y_thresh` is given,
/// wherever `|dy| > y_thresh`.
pub fn split_by_saccade(
    points: &[[i32; 2]],
    right_to_left: bool,
    y_thresh: Option<f64>,
) -> Vec<Run> {
    let boundaries: Vec<usize> = (1..points.len())
        .filter(|&i| {
            let dx = points[i][0] - points[i - 1][0];
            let regressive = if right_to_left { dx > 0 } else { dx < 0 };
            let jump = y_thresh
                .map(|t| (points[i][1] - points[i - 1][1]).abs() as f64 > t)
                .unwrap_or(false);
            regressive || jump
        })
        .collect();
    split_at(points.len(), &boundaries)
}

/// Horizontal saccade lengths `x[i + 1] - x[i]`.
pub fn saccade_dx(points: &[[i32; 2]]) -> Vec<i32> {
    points.windows(2).map(|w| w[1][0] - w[0][0]).collect()
}

/// Mean y of the fixations in `run`.
pub fn run_mean_y(points: &[[i32; 2]], run: &Run) -> f64 {
    let sum: f64 = points[run.clone()].iter().map(|p| p[1] as f64).sum();
    sum / run.len() as f64
}
