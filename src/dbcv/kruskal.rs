//! Find minimum-spanning-tree of a dense symmetric matrix using
//! [Kruskal's algorithm](https://en.wikipedia.org/wiki/Kruskal's_algorithm).
//!
//! This is the alternative to [prim_dense](super::prim::prim_dense). It sorts the n(n-1)/2 edges
//! so it is slower on dense matrices, but it gives a second, independent construction of the tree.

use std::cmp::Ordering;
use std::mem;

use ndarray::Array2;
use num_traits::Float;

use super::MstEdge;

/// union find structure <http://en.wikipedia.org/wiki/Disjoint-set_data_structure>
/// with path halving and union by rank.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
} // end of UnionFind

impl UnionFind {
    /// each node is its own set
    pub fn new(nb_nodes: usize) -> Self {
        UnionFind {
            parent: (0..nb_nodes).collect(),
            rank: vec![1; nb_nodes],
        }
    }

    /// representative of node, compressing path by path halving
    pub fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// merges the sets of a and b. Returns false if they were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return false;
        }
        if self.rank[ra] < self.rank[rb] {
            mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] += 1;
        }
        true
    } // end of union

    #[cfg(test)]
    fn get_parent(&self) -> &Vec<usize> {
        &self.parent
    }
} // end of impl UnionFind

/// Minimal-spanning-tree of the complete graph given by a dense symmetric matrix.
/// Returns n-1 edges in increasing weight order (none if n < 2).
pub fn kruskal_dense<F: Float>(matrix: &Array2<F>) -> Vec<MstEdge<F>> {
    let n = matrix.nrows();
    assert_eq!(n, matrix.ncols(), "kruskal_dense needs a square matrix");
    if n < 2 {
        return Vec::new();
    }
    let mut edges = Vec::<MstEdge<F>>::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push(MstEdge::new(i, j, matrix[[i, j]]));
        }
    }
    // stable sort keeps row order among equal weights
    edges.sort_by(|e1, e2| e1.weight.partial_cmp(&e2.weight).unwrap_or(Ordering::Equal));
    //
    let mut unionf = UnionFind::new(n);
    let mut tree = Vec::<MstEdge<F>>::with_capacity(n - 1);
    for edge in edges {
        if unionf.union(edge.a, edge.b) {
            tree.push(edge);
            if tree.len() == n - 1 {
                break;
            }
        }
    }
    log::trace!("kruskal_dense nb nodes {}, nb edges {}", n, tree.len());
    tree
} // end of kruskal_dense

//===============================================================================================================
