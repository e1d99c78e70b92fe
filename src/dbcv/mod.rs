//! module dbcv
//!
//! Density-Based Clustering Validation index of a clustering.
//!
//! For each non degenerate cluster we compute:
//! - core distances of its points, an inverse distance power mean estimating local density,
//! - the mutual reachability matrix: max(core(i), core(j), dist(i,j)),
//! - a minimum spanning tree of this matrix (dense Prim, or Kruskal),
//! - degrees of tree nodes. Nodes of degree > 1 are internal, leaves are boundary nodes,
//! - the density sparseness (DSC): largest tree edge between internal nodes.
//!
//! Then for each cluster the density separation (DSPC) is the smallest mutual reachability distance
//! between its internal points and internal points of any other cluster. If a cluster has no edge between
//! internal nodes all its points and edges are used.
//!
//! The validity of a cluster is (DSPC - DSC) / max(DSPC, DSC) and the index is the sum of validities
//! weighted by the fraction of points in each cluster. It lies in [-1, 1], higher is better.
//!
//! - Density-Based Clustering Validation.
//!   Moulavi D., Jaskowiak P.A., Campello R.J.G.B., Zimek A., Sander J. SDM 2014
//!
//! - Density-Based Clustering Based on Hierarchical Density Estimates.
//!   Campello Moulavi Sander (2013)
//!

use ndarray::Array2;
use num_traits::Float;

use crate::params::MstAlgo;

pub mod core_distance;
pub mod degree;
pub mod evaluator;
pub mod kruskal;
pub mod mreach;
pub mod prim;
pub mod separation;
pub mod sparseness;

pub use core_distance::core_distances;
pub use degree::TreeDegrees;
pub use evaluator::{ClusterValidity, DbcvEvaluator, DbcvResult, DBCV_MEASURE};
pub use mreach::mutual_reachability_distance;
pub use sparseness::density_sparseness;

/// An edge of a spanning tree, nodes are indexes in the cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MstEdge<F> {
    pub a: usize,
    pub b: usize,
    pub weight: F,
}

impl<F> MstEdge<F> {
    pub fn new(a: usize, b: usize, weight: F) -> Self {
        MstEdge { a, b, weight }
    }
}

/// spanning tree of a dense symmetric matrix with the requested algorithm
pub fn spanning_tree<F: Float>(matrix: &Array2<F>, algo: MstAlgo) -> Vec<MstEdge<F>> {
    match algo {
        MstAlgo::Prim => prim::prim_dense(matrix),
        MstAlgo::Kruskal => kruskal::kruskal_dense(matrix),
    }
}

// usize to F. Cannot fail for f32 and f64
pub(crate) fn to_float<F: Float>(n: usize) -> F {
    F::from(n).unwrap_or_else(F::max_value)
}

// checks n-1 edges and connectivity by a traversal
#[cfg(test)]
pub(crate) fn is_spanning_tree<F>(n: usize, edges: &[MstEdge<F>]) -> bool {
    if edges.len() + 1 != n {
        return false;
    }
    let mut adjacency = vec![Vec::<usize>::new(); n];
    for e in edges {
        adjacency[e.a].push(e.b);
        adjacency[e.b].push(e.a);
    }
    let mut seen = vec![false; n];
    let mut stack = vec![0];
    seen[0] = true;
    while let Some(node) = stack.pop() {
        for &m in &adjacency[node] {
            if !seen[m] {
                seen[m] = true;
                stack.push(m);
            }
        }
    }
    seen.into_iter().all(|s| s)
}
