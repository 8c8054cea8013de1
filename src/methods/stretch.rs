use super::common::nearest_line;
use crate::optimize::nelder_mead;
use crate::params::StretchParams;
use log::debug;
use nalgebra::DVector;

/// Fitted vertical transform and the resulting assignment.
#[derive(Clone, Debug)]
pub struct StretchFit {
    pub assignment: Vec<i32>,
    /// Vertical scale factor applied to every fixation.
    pub stretch: f64,
    /// Vertical offset added after scaling.
    pub offset: f64,
    /// Summed snap distance at the optimum.
    pub objective: f64,
    pub converged: bool,
}

fn snap(midlines: &[i32], y: f64) -> i32 {
    midlines[nearest_line(midlines, y)]
}

/// Find the scale `s` and offset `o` that bring the fixation heights closest
/// to the lines, then snap each `y * s + o` to its nearest midline.
///
/// The objective is the summed absolute distance between each transformed
/// y and its nearest midline; the search starts at `s = 1, o = 0` and is
/// kept inside the configured bounds.
///
/// # Panics
///
/// Panics if `midlines` is empty. [`Method::assign`](super::Method::assign)
/// rejects empty layouts before dispatching here.
pub fn stretch(fixations: &[[i32; 2]], midlines: &[i32], params: &StretchParams) -> StretchFit {
    let ys: Vec<f64> = fixations.iter().map(|p| p[1] as f64).collect();
    let objective = |v: &DVector<f64>| -> f64 {
        ys.iter()
            .map(|&y| {
                let t = y * v[0] + v[1];
                (t - snap(midlines, t) as f64).abs()
            })
            .sum()
    };

    let bounds = [params.stretch_bounds, params.offset_bounds];
    let best = nelder_mead(
        objective,
        &[1.0, 0.0],
        &[params.stretch_step, params.offset_step],
        Some(&bounds),
        &params.optimizer,
    );
    let (s, o) = (best.x[0], best.x[1]);
    debug!(
        "stretch: scale={s:.4} offset={o:.2} distance={:.2} iterations={}",
        best.value, best.iterations
    );

    StretchFit {
        assignment: ys.iter().map(|&y| snap(midlines, y * s + o)).collect(),
        stretch: s,
        offset: o,
        objective: best.value,
        converged: best.converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three lines of five fixations recorded 10% too tall.
    fn stretched() -> Vec<[i32; 2]> {
        let mut pts = Vec::new();
        for (line, y) in [110, 220, 330].iter().enumerate() {
            for w in 0..5 {
                let jitter = ((w * 3 + line) % 5) as i32 - 2;
                pts.push([100 + w as i32 * 150, y + jitter]);
            }
        }
        pts
    }

    #[test]
    fn undoes_vertical_scaling() {
        let params = StretchParams {
            stretch_bounds: (0.8, 1.2),
            ..StretchParams::default()
        };
        let fit = stretch(&stretched(), &[100, 200, 300], &params);
        assert!((fit.stretch - 1.0 / 1.1).abs() < 0.01, "stretch={}", fit.stretch);
        assert!(fit.offset.abs() < 2.0, "offset={}", fit.offset);
        let expected: Vec<i32> = [100, 200, 300]
            .iter()
            .flat_map(|&l| std::iter::repeat(l).take(5))
            .collect();
        assert_eq!(fit.assignment, expected);
    }

    #[test]
    fn parameters_stay_within_bounds() {
        let params = StretchParams::default();
        let fit = stretch(&stretched(), &[100, 200, 300], &params);
        assert!(fit.stretch >= params.stretch_bounds.0 && fit.stretch <= params.stretch_bounds.1);
        assert!(fit.offset >= params.offset_bounds.0 && fit.offset <= params.offset_bounds.1);
    }
}
