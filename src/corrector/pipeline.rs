use crate::diagnostics::{ConsensusReport, CorrectionReport, TimingBreakdown};
use crate::ensemble;
use crate::error::CorrectionError;
use crate::geometry::LineGeometry;
use crate::methods::Method;
use crate::params::CorrectionParams;
use crate::types::FixationSequence;
use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::time::Instant;

/// Corrects fixation sequences with a fixed set of parameters.
#[derive(Clone, Debug, Default)]
pub struct DriftCorrector {
    params: CorrectionParams,
}

impl DriftCorrector {
    pub fn new(params: CorrectionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CorrectionParams {
        &self.params
    }

    /// Snap every active fixation of `sequence` to a line chosen by
    /// `method`. Only y changes.
    pub fn correct<G: LineGeometry + ?Sized>(
        &self,
        method: Method,
        sequence: &mut FixationSequence,
        geometry: &G,
    ) -> Result<CorrectionReport, CorrectionError> {
        let start = Instant::now();
        let indices = sequence.active_indices();
        let points = sequence.active_coordinates();
        let assigned = method.assign(&points, geometry, &self.params)?;
        let moved = write_back(sequence, &indices, &assigned);

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "{method}: {} fixations, {moved} moved in {elapsed_ms:.3} ms",
            indices.len()
        );
        Ok(CorrectionReport {
            method,
            fixations: indices.len(),
            moved,
            discarded: 0,
            elapsed_ms,
        })
    }

    /// Like [`correct`](Self::correct), but on a copy of `sequence`.
    pub fn correct_copy<G: LineGeometry + ?Sized>(
        &self,
        method: Method,
        sequence: &FixationSequence,
        geometry: &G,
    ) -> Result<(FixationSequence, CorrectionReport), CorrectionError> {
        let mut copy = sequence.clone();
        let report = self.correct(method, &mut copy, geometry)?;
        Ok((copy, report))
    }

    /// Run every method in `methods` on the active fixations and write the
    /// per-fixation majority vote. At least two methods are required.
    ///
    /// With the `parallel` feature the jury runs on the rayon pool; the vote
    /// always sees the results in the order the methods were given.
    pub fn correct_by_consensus<G: LineGeometry + Sync + ?Sized>(
        &self,
        methods: &[Method],
        sequence: &mut FixationSequence,
        geometry: &G,
    ) -> Result<ConsensusReport, CorrectionError> {
        if methods.len() < 2 {
            return Err(CorrectionError::invalid(format!(
                "consensus needs at least two methods, got {}",
                methods.len()
            )));
        }
        let start = Instant::now();
        let indices = sequence.active_indices();
        let points = sequence.active_coordinates();

        let run = |method: Method| {
            let t = Instant::now();
            let assigned = method.assign(&points, geometry, &self.params);
            (assigned, t.elapsed().as_secs_f64() * 1000.0)
        };
        #[cfg(feature = "parallel")]
        let results: Vec<_> = methods.par_iter().map(|&m| run(m)).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = methods.iter().map(|&m| run(m)).collect();

        let mut jury = Vec::with_capacity(methods.len());
        let mut timing = TimingBreakdown::default();
        for (&method, (assigned, elapsed_ms)) in methods.iter().zip(results) {
            jury.push(assigned?);
            timing.push(method, elapsed_ms);
        }
        let consensus = ensemble::vote(&jury)?;
        let moved = write_back(sequence, &indices, &consensus.assignment);
        timing.total_ms = start.elapsed().as_secs_f64() * 1000.0;

        info!(
            "consensus of {} methods: {moved} of {} fixations moved, kappa {:?}",
            methods.len(),
            indices.len(),
            consensus.kappa
        );
        Ok(ConsensusReport {
            methods: methods.to_vec(),
            kappa: consensus.kappa,
            fixations: indices.len(),
            moved,
            timing,
        })
    }
}

/// Write `assigned[k]` into the y of fixation `indices[k]`; returns how many
/// changed.
fn write_back(sequence: &mut FixationSequence, indices: &[usize], assigned: &[i32]) -> usize {
    let mut moved = 0;
    for (&i, &y) in indices.iter().zip(assigned) {
        if let Some(f) = sequence.get_mut(i) {
            if f.y != y {
                f.y = y;
                moved += 1;
            }
        }
    }
    moved
}

/// Correct `sequence` in place with the method called `method_name`.
///
/// The name is checked before anything else, so an unknown method leaves the
/// sequence untouched.
pub fn correct_drift<G: LineGeometry + ?Sized>(
    method_name: &str,
    sequence: &mut FixationSequence,
    geometry: &G,
    params: &CorrectionParams,
) -> Result<CorrectionReport, CorrectionError> {
    let method: Method = method_name.parse()?;
    DriftCorrector::new(params.clone()).correct(method, sequence, geometry)
}
