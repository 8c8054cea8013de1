use crate::cluster1d::kmeans;
use crate::params::ClusterParams;
use log::debug;

/// Cluster fixation heights into one group per line and map the groups to
/// lines in order of their centroids.
///
/// Centroids start on the midlines, so the result is fully determined by the
/// input.
///
/// # Panics
///
/// Panics if `midlines` is empty. [`Method::assign`](super::Method::assign)
/// rejects empty layouts before dispatching here.
pub fn cluster(fixations: &[[i32; 2]], midlines: &[i32], params: &ClusterParams) -> Vec<i32> {
    let ys: Vec<f64> = fixations.iter().map(|p| p[1] as f64).collect();
    let seeds: Vec<f64> = midlines.iter().map(|&m| m as f64).collect();
    let clustering = kmeans(&ys, &seeds, params.max_iterations);

    let order = clustering.order_by_center();
    let mut line_of_cluster = vec![0usize; order.len()];
    for (rank, &cluster) in order.iter().enumerate() {
        line_of_cluster[cluster] = rank;
    }
    debug!(
        "cluster: sizes={:?} centers={:?}",
        clustering.sizes(),
        clustering.centers
    );

    clustering
        .labels
        .iter()
        .map(|&label| midlines[line_of_cluster[label]])
        .collect()
}
