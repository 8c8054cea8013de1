use super::DriftCorrector;
use crate::diagnostics::CorrectionReport;
use crate::error::CorrectionError;
use crate::geometry::LineGeometry;
use crate::methods::{self, Method};
use crate::types::FixationSequence;
use log::debug;
use std::time::Instant;

impl DriftCorrector {
    /// Discard active fixations whose warped line lies more than
    /// `params.bounce.threshold` pixels from their recorded y.
    ///
    /// Warping uses the reference points named by `params.bounce.reference`.
    /// No y is changed; rejected fixations are only marked as discarded.
    pub fn reject_bounces<G: LineGeometry + ?Sized>(
        &self,
        sequence: &mut FixationSequence,
        geometry: &G,
    ) -> Result<CorrectionReport, CorrectionError> {
        let start = Instant::now();
        let bounce = &self.params().bounce;
        let indices = sequence.active_indices();
        let points = sequence.active_coordinates();
        if points.is_empty() {
            return Err(CorrectionError::EmptySequence);
        }
        let reference = methods::reference_points(geometry, bounce.reference);
        let warped = methods::warp(&points, &reference)?;

        let mut discarded = 0;
        for ((&i, p), &y) in indices.iter().zip(&points).zip(&warped) {
            if (y - p[1]).abs() as f64 > bounce.threshold {
                if let Some(f) = sequence.get_mut(i) {
                    f.discarded = true;
                    discarded += 1;
                }
            }
        }

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "bounce rejection: {discarded} of {} fixations beyond {} px",
            indices.len(),
            bounce.threshold
        );
        Ok(CorrectionReport {
            method: Method::Warp,
            fixations: indices.len(),
            moved: 0,
            discarded,
            elapsed_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TextLayout;
    use crate::params::CorrectionParams;

    #[test]
    fn marks_far_fixations_without_moving_them() {
        // Two lines of three words, 100 px apart.
        let layout = TextLayout::regular(100, 100, 50, 60, 40, &[3, 3]);
        let mut params = CorrectionParams::default();
        params.bounce.threshold = 40.0;
        let corrector = DriftCorrector::new(params);

        let mut seq = FixationSequence::from_xy(&[
            [80, 105],
            [180, 98],
            [280, 160],
            [80, 203],
            [180, 199],
            [280, 201],
        ]);
        let before = seq.clone();
        let report = corrector.reject_bounces(&mut seq, &layout).unwrap();

        assert_eq!(report.discarded, 1);
        assert_eq!(report.moved, 0);
        for (f, g) in seq.iter().zip(&before) {
            assert_eq!(f.y, g.y);
        }
        let flags: Vec<bool> = seq.iter().map(|f| f.discarded).collect();
        assert_eq!(flags, vec![false, false, true, false, false, false]);
    }
}
