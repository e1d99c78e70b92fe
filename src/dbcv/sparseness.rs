//! Density sparseness of a cluster (DSC): the heaviest qualifying edge of its spanning tree.

use num_traits::Float;

use super::{MstEdge, TreeDegrees};

/// Max weight over tree edges joining two internal nodes, or over all edges if the tree has no such edge.
/// Returns 0 for an empty tree.
pub fn density_sparseness<F: Float>(edges: &[MstEdge<F>], degrees: &TreeDegrees) -> F {
    edges
        .iter()
        .filter(|e| degrees.edge_qualifies(e))
        .fold(F::zero(), |dsc, e| dsc.max(e.weight))
}
