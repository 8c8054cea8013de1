use super::common::LineFit;
use crate::params::MergeParams;
use crate::segments::split_by_saccade;
use log::debug;

/// Relaxation schedule: minimum sizes of the two candidate runs and whether
/// the gradient/error constraints still apply.
struct Phase {
    min_i: usize,
    min_j: usize,
    constrained: bool,
}

const PHASES: [Phase; 4] = [
    Phase {
        min_i: 3,
        min_j: 3,
        constrained: true,
    },
    Phase {
        min_i: 1,
        min_j: 3,
        constrained: true,
    },
    Phase {
        min_i: 1,
        min_j: 1,
        constrained: true,
    },
    Phase {
        min_i: 1,
        min_j: 1,
        constrained: false,
    },
];

/// Split the trial at regressive saccades, then repeatedly merge the pair of
/// sequences whose combined regression line fits best until one sequence per
/// line remains. Sequences map to lines in order of mean y.
///
/// # Panics
///
/// Panics if `midlines` is empty. [`Method::assign`](super::Method::assign)
/// rejects empty layouts before dispatching here.
pub fn merge(
    fixations: &[[i32; 2]],
    midlines: &[i32],
    right_to_left: bool,
    params: &MergeParams,
) -> Vec<i32> {
    let m = midlines.len();
    let runs = split_by_saccade(fixations, right_to_left, Some(params.y_thresh));
    let mut sequences: Vec<Vec<usize>> = runs.into_iter().map(|run| run.collect()).collect();
    debug!("merge: {} initial sequences for {} lines", sequences.len(), m);

    for (phase_index, phase) in PHASES.iter().enumerate() {
        while sequences.len() > m {
            let Some((i, j)) = best_merger(fixations, &sequences, phase, params) else {
                break;
            };
            let tail = sequences.remove(j);
            let mut merged = sequences.remove(i);
            merged.extend(tail);
            sequences.push(merged);
        }
        debug!(
            "merge: phase {} done, {} sequences remain",
            phase_index + 1,
            sequences.len()
        );
    }

    let mean_y: Vec<f64> = sequences
        .iter()
        .map(|seq| seq.iter().map(|&k| fixations[k][1] as f64).sum::<f64>() / seq.len() as f64)
        .collect();
    let mut order: Vec<usize> = (0..sequences.len()).collect();
    order.sort_by(|&a, &b| {
        mean_y[a]
            .partial_cmp(&mean_y[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = vec![midlines[0]; fixations.len()];
    for (line, &seq) in order.iter().enumerate() {
        for &k in &sequences[seq] {
            out[k] = midlines[line];
        }
    }
    out
}

/// Lowest-error admissible pair `(i, j)` with `i < j`; the first pair found
/// wins ties.
fn best_merger(
    fixations: &[[i32; 2]],
    sequences: &[Vec<usize>],
    phase: &Phase,
    params: &MergeParams,
) -> Option<(usize, usize)> {
    let mut best = None;
    let mut best_error = f64::INFINITY;
    for i in 0..sequences.len().saturating_sub(1) {
        if sequences[i].len() < phase.min_i {
            continue;
        }
        for j in (i + 1)..sequences.len() {
            if sequences[j].len() < phase.min_j {
                continue;
            }
            let points = sequences[i]
                .iter()
                .chain(&sequences[j])
                .map(|&k| &fixations[k]);
            let Some(fit) = LineFit::fit(points) else {
                continue;
            };
            let admissible = !phase.constrained
                || (fit.gradient.abs() <= params.gradient_thresh
                    && fit.rms_error <= params.error_thresh);
            if admissible && fit.rms_error < best_error {
                best = Some((i, j));
                best_error = fit.rms_error;
            }
        }
    }
    best
}
