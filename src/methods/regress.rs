use crate::optimize::{nelder_mead, Squash};
use crate::params::RegressParams;
use log::debug;
use nalgebra::{DMatrix, DVector};
use statrs::distribution::{Continuous, Normal};

/// Fitted parallel-lines model and the resulting assignment.
#[derive(Clone, Debug)]
pub struct RegressFit {
    pub assignment: Vec<i32>,
    /// Shared slope of the fitted lines (px of y per px of x).
    pub slope: f64,
    /// Shared vertical offset from the midlines.
    pub offset: f64,
    /// Shared Gaussian scatter around each line.
    pub std: f64,
    /// Negative log-likelihood at the optimum.
    pub objective: f64,
    pub converged: bool,
}

struct Model<'a> {
    fixations: &'a [[i32; 2]],
    midlines: &'a [i32],
    slope: Squash,
    offset: Squash,
    std: Squash,
}

impl Model<'_> {
    fn unpack(&self, u: &DVector<f64>) -> (f64, f64, f64) {
        (
            self.slope.apply(u[0]),
            self.offset.apply(u[1]),
            self.std.apply(u[2]),
        )
    }

    /// Log-density of every fixation (rows) under every line (columns). A
    /// non-positive scatter makes every density `-inf`.
    fn log_density(&self, u: &DVector<f64>) -> DMatrix<f64> {
        let (k, o, s) = self.unpack(u);
        DMatrix::from_fn(self.fixations.len(), self.midlines.len(), |i, j| {
            let [x, y] = self.fixations[i];
            let expected = x as f64 * k + self.midlines[j] as f64 + o;
            Normal::new(expected, s)
                .map(|normal| normal.ln_pdf(y as f64))
                .unwrap_or(f64::NEG_INFINITY)
        })
    }

    fn negative_log_likelihood(&self, u: &DVector<f64>) -> f64 {
        let density = self.log_density(u);
        -density.row_iter().map(|row| row.max()).sum::<f64>()
    }
}

/// Fit `m` parallel lines `y = k * x + midline + o` with shared scatter `s`
/// and assign each fixation to the line under which it is most likely.
///
/// `k`, `o` and `s` are searched inside their configured bounds through a
/// probit reparameterisation; the search starts at the bound midpoints.
///
/// # Panics
///
/// Panics if `midlines` is empty. [`Method::assign`](super::Method::assign)
/// rejects empty layouts before dispatching here.
pub fn regress(fixations: &[[i32; 2]], midlines: &[i32], params: &RegressParams) -> RegressFit {
    let model = Model {
        fixations,
        midlines,
        slope: Squash::new(params.slope_bounds),
        offset: Squash::new(params.offset_bounds),
        std: Squash::new(params.std_bounds),
    };

    let step = [params.initial_step; 3];
    let best = nelder_mead(
        |u| model.negative_log_likelihood(u),
        &[0.0, 0.0, 0.0],
        &step,
        None,
        &params.optimizer,
    );

    let density = model.log_density(&best.x);
    let assignment = density
        .row_iter()
        .map(|row| {
            let mut best_line = 0;
            for j in 1..row.len() {
                if row[j] > row[best_line] {
                    best_line = j;
                }
            }
            midlines[best_line]
        })
        .collect();

    let (slope, offset, std) = model.unpack(&best.x);
    debug!(
        "regress: slope={:.4} offset={:.2} std={:.2} nll={:.3} iterations={}",
        slope, offset, std, best.value, best.iterations
    );
    RegressFit {
        assignment,
        slope,
        offset,
        std,
        objective: best.value,
        converged: best.converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_a_uniform_offset() {
        let mut fixations = Vec::new();
        for (line, y) in [120, 220, 320].iter().enumerate() {
            for w in 0..6 {
                let jitter = ((w * 7 + line * 3) % 5) as i32 - 2;
                fixations.push([100 + w as i32 * 120, y + jitter]);
            }
        }
        let fit = regress(&fixations, &[100, 200, 300], &RegressParams::default());
        assert!((fit.offset - 20.0).abs() < 2.0, "offset={}", fit.offset);
        let expected: Vec<i32> = [100, 200, 300]
            .iter()
            .flat_map(|&l| std::iter::repeat(l).take(6))
            .collect();
        assert_eq!(fit.assignment, expected);
    }

    #[test]
    fn parameters_stay_within_bounds() {
        let fixations = [[100, 400], [900, 10]];
        let params = RegressParams::default();
        let fit = regress(&fixations, &[100, 200], &params);
        assert!(fit.slope >= params.slope_bounds.0 && fit.slope <= params.slope_bounds.1);
        assert!(fit.offset >= params.offset_bounds.0 && fit.offset <= params.offset_bounds.1);
        assert!(fit.std >= params.std_bounds.0 && fit.std <= params.std_bounds.1);
        assert!(fit.assignment.iter().all(|y| [100, 200].contains(y)));
    }
}
