use super::common::snap_runs;
use crate::params::ChainParams;
use crate::segments::split_by_proximity;
use log::debug;

/// Chain fixations into runs by proximity and snap each run to the line
/// nearest its mean y.
///
/// # Panics
///
/// Panics if `midlines` is empty. [`Method::assign`](super::Method::assign)
/// rejects empty layouts before dispatching here.
pub fn chain(fixations: &[[i32; 2]], midlines: &[i32], params: &ChainParams) -> Vec<i32> {
    let runs = split_by_proximity(fixations, params.x_thresh, params.y_thresh);
    debug!("chain: {} fixations in {} runs", fixations.len(), runs.len());
    snap_runs(fixations, &runs, midlines)
}
