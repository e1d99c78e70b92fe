//! Degrees of the nodes of a cluster spanning tree.
//!
//! A node of degree > 1 is internal, a leaf is a boundary node.
//! If the tree has at least one edge between two internal nodes, boundary nodes (and edges touching them)
//! are left out of the sparseness and separation computations. Otherwise (paths of 2 or 3 nodes,
//! stars ...) every node and edge qualifies.

use super::MstEdge;

/// node degrees of a spanning tree and its internal edge flag.
#[derive(Clone, Debug)]
pub struct TreeDegrees {
    degrees: Vec<u32>,
    has_internal_edge: bool,
}

impl TreeDegrees {
    pub fn from_edges<F>(nb_nodes: usize, edges: &[MstEdge<F>]) -> Self {
        let mut degrees = vec![0u32; nb_nodes];
        for edge in edges {
            degrees[edge.a] += 1;
            degrees[edge.b] += 1;
        }
        let has_internal_edge = edges.iter().any(|e| degrees[e.a] > 1 && degrees[e.b] > 1);
        TreeDegrees {
            degrees,
            has_internal_edge,
        }
    } // end of from_edges

    pub fn get_degrees(&self) -> &[u32] {
        &self.degrees
    }

    pub fn is_internal(&self, node: usize) -> bool {
        self.degrees[node] > 1
    }

    /// true if some edge joins two internal nodes
    pub fn has_internal_edge(&self) -> bool {
        self.has_internal_edge
    }

    /// does the node take part in sparseness and separation computations
    pub fn qualifies(&self, node: usize) -> bool {
        !self.has_internal_edge || self.is_internal(node)
    }

    pub fn edge_qualifies<F>(&self, edge: &MstEdge<F>) -> bool {
        self.qualifies(edge.a) && self.qualifies(edge.b)
    }

    /// nodes taking part in separation, in increasing order
    pub fn qualifying_nodes(&self) -> Vec<usize> {
        (0..self.degrees.len()).filter(|&n| self.qualifies(n)).collect()
    }
} // end of impl TreeDegrees
