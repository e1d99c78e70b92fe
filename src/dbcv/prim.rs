//! Prim's algorithm on a dense symmetric matrix.
//!
//! O(n²) with flat arrays: for each node outside the tree we keep the lightest edge linking it to the tree.

use ndarray::Array2;
use num_traits::Float;

use super::MstEdge;

/// Minimum spanning tree of the complete graph given by a dense symmetric matrix.
/// Returns exactly n-1 edges (none if n < 2), in order of insertion in the tree.
pub fn prim_dense<F: Float>(matrix: &Array2<F>) -> Vec<MstEdge<F>> {
    let n = matrix.nrows();
    assert_eq!(n, matrix.ncols(), "prim_dense needs a square matrix");
    if n < 2 {
        return Vec::new();
    }
    let mut in_tree = vec![false; n];
    // lightest known edge from the tree to each node, and the tree node it comes from
    let mut best = vec![F::infinity(); n];
    let mut from = vec![0usize; n];
    let mut edges = Vec::<MstEdge<F>>::with_capacity(n - 1);
    //
    let mut current = 0;
    in_tree[current] = true;
    for _ in 1..n {
        let mut next: Option<usize> = None;
        for j in 0..n {
            if in_tree[j] {
                continue;
            }
            let w = matrix[[current, j]];
            if w < best[j] {
                best[j] = w;
                from[j] = current;
            }
            match next {
                Some(k) if best[k] <= best[j] => {}
                _ => next = Some(j),
            }
        }
        let next = match next {
            Some(k) => k,
            None => break,
        };
        in_tree[next] = true;
        edges.push(MstEdge::new(from[next], next, best[next]));
        current = next;
    }
    log::trace!("prim_dense nb nodes {}, nb edges {}", n, edges.len());
    edges
} // end of prim_dense

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    use crate::dbcv::is_spanning_tree;

    #[test]
    fn test_prim_path() {
        // 4 points at 0, 1, 2, 3 on a line
        let m = array![[0., 1., 2., 3.], [1., 0., 1., 2.], [2., 1., 0., 1.], [3., 2., 1., 0.]];
        let edges = prim_dense(&m);
        assert!(is_spanning_tree(4, &edges));
        let total: f64 = edges.iter().map(|e| e.weight).sum();
        assert_eq!(total, 3.);
    }

    #[test]
    fn test_prim_star() {
        // node 2 is close to everybody, others are far apart
        let m = array![
            [0., 10., 1., 10.],
            [10., 0., 2., 10.],
            [1., 2., 0., 3.],
            [10., 10., 3., 0.]
        ];
        let edges = prim_dense(&m);
        assert!(is_spanning_tree(4, &edges));
        assert!(edges.iter().all(|e| e.a == 2 || e.b == 2));
        let total: f64 = edges.iter().map(|e| e.weight).sum();
        assert_eq!(total, 6.);
    }

    #[test]
    fn test_prim_ties_and_small() {
        let m = array![[0., 1., 1.], [1., 0., 1.], [1., 1., 0.]];
        let edges = prim_dense(&m);
        assert!(is_spanning_tree(3, &edges));
        //
        let single = array![[0.0_f64]];
        assert!(prim_dense(&single).is_empty());
        let pair = array![[0., 4.], [4., 0.]];
        assert_eq!(prim_dense(&pair), vec![MstEdge::new(0, 1, 4.)]);
    }

    #[test]
    fn test_prim_infinite_weights() {
        let inf = f64::INFINITY;
        let m = array![[0., inf, inf], [inf, 0., inf], [inf, inf, 0.]];
        let edges = prim_dense(&m);
        assert!(is_spanning_tree(3, &edges));
    }
}
