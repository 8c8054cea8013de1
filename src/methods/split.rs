use super::common::snap_runs;
use crate::cluster1d::kmeans;
use crate::params::SplitParams;
use crate::segments::{saccade_dx, split_at};
use log::debug;

/// Separate return sweeps from ordinary saccades by 2-means clustering of
/// the horizontal saccade lengths, then snap each resulting run to the line
/// nearest its mean height.
///
/// The clusters are seeded at the shortest and longest saccade. With fewer
/// than two saccades, or when every saccade has the same length, no sweeps
/// are found and the whole sequence is one run.
///
/// # Panics
///
/// Panics if `midlines` is empty. [`Method::assign`](super::Method::assign)
/// rejects empty layouts before dispatching here.
pub fn split(
    fixations: &[[i32; 2]],
    midlines: &[i32],
    right_to_left: bool,
    params: &SplitParams,
) -> Vec<i32> {
    let dx = saccade_dx(fixations);
    let lo = dx.iter().copied().min();
    let hi = dx.iter().copied().max();

    let mut boundaries = Vec::new();
    if let (Some(lo), Some(hi)) = (lo, hi) {
        if dx.len() >= 2 && lo < hi {
            let values: Vec<f64> = dx.iter().map(|&d| d as f64).collect();
            let clustering = kmeans(&values, &[lo as f64, hi as f64], params.max_iterations);
            let (c0, c1) = (clustering.centers[0], clustering.centers[1]);
            // Sweeps run against the reading direction.
            let sweep = match (right_to_left, c0 < c1) {
                (false, true) | (true, false) => 0,
                _ => 1,
            };
            boundaries = clustering
                .labels
                .iter()
                .enumerate()
                .filter(|(_, label)| **label == sweep)
                .map(|(i, _)| i + 1)
                .collect();
            debug!(
                "split: centers ({c0:.1}, {c1:.1}), {} return sweeps",
                boundaries.len()
            );
        }
    }

    let runs = split_at(fixations.len(), &boundaries);
    snap_runs(fixations, &runs, midlines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_regression() -> Vec<[i32; 2]> {
        vec![
            [100, 130],
            [250, 128],
            [400, 135],
            [550, 131],
            [110, 232],
            [260, 228],
            [200, 230],
            [410, 236],
            [120, 331],
            [270, 329],
        ]
    }

    #[test]
    fn short_regressions_are_not_sweeps() {
        let out = split(&with_regression(), &[100, 200, 300], false, &SplitParams::default());
        assert_eq!(out, vec![100, 100, 100, 100, 200, 200, 200, 200, 300, 300]);
    }

    #[test]
    fn mirrored_text_reads_right_to_left() {
        let mirrored: Vec<[i32; 2]> = with_regression().iter().map(|p| [1000 - p[0], p[1]]).collect();
        let out = split(&mirrored, &[100, 200, 300], true, &SplitParams::default());
        assert_eq!(out, vec![100, 100, 100, 100, 200, 200, 200, 200, 300, 300]);
    }

    #[test]
    fn uniform_saccades_form_one_run() {
        let pts = [[100, 100], [200, 100], [300, 100]];
        assert_eq!(
            split(&pts, &[100, 200], false, &SplitParams::default()),
            vec![100, 100, 100]
        );
        // A single saccade cannot be clustered; the run snaps by mean y.
        assert_eq!(
            split(&[[100, 100], [300, 210]], &[100, 200], false, &SplitParams::default()),
            vec![200, 200]
        );
    }
}
