//! Density separation of a cluster (DSPC).
//!
//! For a cluster A it is the smallest mutual reachability distance max(core_A(p), core_B(q), dist(p,q))
//! between a qualifying point p of A and a qualifying point q of any other non degenerate cluster B.
//! Core distances are those computed inside each cluster.
//!
//! For a given A the scan over the other clusters runs in parallel and ends with a min reduction.

use num_traits::Float;
use rayon::prelude::*;

use crate::distance::{checked_distance, DistanceFunction};
use crate::error::Result;
use crate::relation::DataId;

use super::core_distance::ClusterPoints;
use super::mreach::mutual_reachability_distance;
use super::TreeDegrees;

/// The qualifying points of a cluster with their core distances.
pub(crate) struct SeparationSide<'a, T, F> {
    /// rank of the cluster in its clustering
    pub(crate) index: usize,
    ids: Vec<DataId>,
    vectors: Vec<&'a [T]>,
    core: Vec<F>,
}

impl<'a, T, F: Float> SeparationSide<'a, T, F> {
    pub(crate) fn new(points: &ClusterPoints<'a, T>, core: &[F], degrees: &TreeDegrees) -> Self {
        let nodes = degrees.qualifying_nodes();
        SeparationSide {
            index: points.index,
            ids: nodes.iter().map(|&n| points.ids[n]).collect(),
            vectors: nodes.iter().map(|&n| points.vectors[n]).collect(),
            core: nodes.iter().map(|&n| core[n]).collect(),
        }
    }

    pub(crate) fn nb_points(&self) -> usize {
        self.ids.len()
    }
} // end of impl SeparationSide

/// smallest mutual reachability distance between qualifying points of two clusters
pub(crate) fn separation_between<T, F, D>(a: &SeparationSide<T, F>, b: &SeparationSide<T, F>, distance: &D) -> Result<F>
where
    F: Float,
    D: DistanceFunction<T, F> + ?Sized,
{
    let mut dspc = F::infinity();
    for i in 0..a.nb_points() {
        for j in 0..b.nb_points() {
            let d = checked_distance(distance, a.vectors[i], b.vectors[j], a.ids[i], b.ids[j])?;
            let mrd = mutual_reachability_distance(a.core[i], b.core[j], d);
            if mrd < dspc {
                dspc = mrd;
            }
        }
    }
    Ok(dspc)
} // end of separation_between

/// Density separation of cluster `a` against all other sides.
/// Returns None if there is no other cluster to separate from.
pub(crate) fn density_separation<T, F, D>(
    a: &SeparationSide<T, F>,
    sides: &[SeparationSide<T, F>],
    distance: &D,
    parallel: bool,
) -> Result<Option<F>>
where
    T: Sync,
    F: Float + Send + Sync,
    D: DistanceFunction<T, F> + ?Sized,
{
    let nb_others = sides.iter().filter(|b| b.index != a.index).count();
    if nb_others == 0 {
        return Ok(None);
    }
    let dspc = if parallel {
        sides
            .par_iter()
            .filter(|b| b.index != a.index)
            .map(|b| separation_between(a, b, distance))
            .try_reduce(F::infinity, |x, y| Ok(x.min(y)))?
    } else {
        sides
            .iter()
            .filter(|b| b.index != a.index)
            .map(|b| separation_between(a, b, distance))
            .try_fold(F::infinity(), |acc, s| s.map(|s| acc.min(s)))?
    };
    log::trace!("density_separation cluster {} against {} clusters : {:.3e}", a.index, nb_others, dspc.to_f64().unwrap_or(f64::NAN));
    Ok(Some(dspc))
} // end of density_separation
