use crate::segments::{run_mean_y, Run};
use nalgebra::DVector;

/// Index of the midline closest to `y`; ties go to the upper (lower index)
/// line.
pub fn nearest_line(midlines: &[i32], y: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &m) in midlines.iter().enumerate() {
        let dist = (m as f64 - y).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Snap each run to the line nearest its mean y.
pub(crate) fn snap_runs(points: &[[i32; 2]], runs: &[Run], midlines: &[i32]) -> Vec<i32> {
    let mut out = vec![0; points.len()];
    for run in runs {
        let line = midlines[nearest_line(midlines, run_mean_y(points, run))];
        out[run.clone()].fill(line);
    }
    out
}

/// Ordinary least-squares line `y = gradient * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineFit {
    pub gradient: f64,
    pub intercept: f64,
    /// Root-mean-square vertical residual.
    pub rms_error: f64,
}

impl LineFit {
    /// Fit a line through `points`. When every x coincides the fit is the
    /// horizontal line through the mean y.
    pub fn fit<'a, I>(points: I) -> Option<LineFit>
    where
        I: IntoIterator<Item = &'a [i32; 2]>,
    {
        let (xs, ys): (Vec<f64>, Vec<f64>) = points
            .into_iter()
            .map(|p| (p[0] as f64, p[1] as f64))
            .unzip();
        if xs.is_empty() {
            return None;
        }
        let xs = DVector::from_vec(xs);
        let ys = DVector::from_vec(ys);
        let (mx, my) = (xs.mean(), ys.mean());
        let dx = xs.add_scalar(-mx);
        let dy = ys.add_scalar(-my);

        let sxx = dx.dot(&dx);
        let gradient = if sxx <= 1e-12 { 0.0 } else { dx.dot(&dy) / sxx };
        let intercept = my - gradient * mx;

        let residuals = ys - xs.map(|x| gradient * x + intercept);
        let rms_error = (residuals.norm_squared() / residuals.len() as f64).sqrt();
        Some(LineFit {
            gradient,
            intercept,
            rms_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_line_ties_go_up() {
        let lines = [100, 200, 300];
        assert_eq!(nearest_line(&lines, 150.0), 0);
        assert_eq!(nearest_line(&lines, 150.5), 1);
        assert_eq!(nearest_line(&lines, -500.0), 0);
        assert_eq!(nearest_line(&lines, 900.0), 2);
    }

    #[test]
    fn fit_exact_line() {
        let pts = [[0, 10], [10, 12], [20, 14]];
        let fit = LineFit::fit(pts.iter()).unwrap();
        assert!((fit.gradient - 0.2).abs() < 1e-12);
        assert!((fit.intercept - 10.0).abs() < 1e-12);
        assert!(fit.rms_error < 1e-12);
    }

    #[test]
    fn fit_vertical_stack_is_horizontal() {
        let pts = [[50, 10], [50, 30]];
        let fit = LineFit::fit(pts.iter()).unwrap();
        assert_eq!(fit.gradient, 0.0);
        assert_eq!(fit.intercept, 20.0);
        assert_eq!(fit.rms_error, 10.0);
        assert!(LineFit::fit(std::iter::empty()).is_none());
    }

    #[test]
    fn snap_runs_fills_each_run() {
        let pts = [[0, 90], [10, 110], [0, 240]];
        let out = snap_runs(&pts, &[0..2, 2..3], &[100, 200, 300]);
        assert_eq!(out, vec![100, 100, 200]);
    }
}
