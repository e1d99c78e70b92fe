//! Mutual reachability distance
//!
//! MRD(a, b) = max(core_dist(a), core_dist(b), dist(a, b))
//!
//! A pair of points is never closer than the density radius of either of them, so points in
//! sparse regions are pushed away from the others.

use ndarray::Array2;
use num_traits::Float;

/// mutual reachability distance from the two core distances and the actual distance
pub fn mutual_reachability_distance<F: Float>(core_dist_a: F, core_dist_b: F, distance: F) -> F {
    core_dist_a.max(core_dist_b).max(distance)
}

/// Turns a cluster distance matrix into its mutual reachability matrix, reusing the allocation.
/// The upper triangle is computed and mirrored, the diagonal is set to 0.
pub(crate) fn into_mutual_reachability<F: Float>(mut dists: Array2<F>, core: &[F]) -> Array2<F> {
    let n = dists.nrows();
    assert_eq!(n, core.len());
    for i in 0..n {
        dists[[i, i]] = F::zero();
        for j in (i + 1)..n {
            let mrd = mutual_reachability_distance(core[i], core[j], dists[[i, j]]);
            dists[[i, j]] = mrd;
            dists[[j, i]] = mrd;
        }
    }
    dists
} // end of into_mutual_reachability
