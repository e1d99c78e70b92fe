//! Core distance computation for DBCV
//!
//! The core distance of a point is an inverse distance power mean over the other points of its cluster:
//! core(p) = ( 1/(n-1) * sum_{q != p} dist(p,q)^(-d) )^(-1/d), where d is the dimension of the data.
//! Points surrounded by close neighbours get a small core distance, isolated points a large one.
//! The sum is computed relative to the nearest neighbour distance so that it neither underflows
//! in high dimension nor overflows for very small distances.
//!
//! Pairwise distances of a cluster are computed once in a dense matrix, which is then turned
//! in place into the mutual reachability matrix (see [mreach](super::mreach)).

use ndarray::Array2;
use num_traits::Float;

use crate::distance::{checked_distance, DistanceFunction};
use crate::error::Result;
use crate::params::ZeroDistancePolicy;
use crate::relation::DataId;

use super::to_float;

/// vectors of a non degenerate cluster, in cluster order
pub(crate) struct ClusterPoints<'a, T> {
    /// rank of the cluster in its clustering
    pub(crate) index: usize,
    pub(crate) ids: &'a [DataId],
    pub(crate) vectors: Vec<&'a [T]>,
}

impl<'a, T> ClusterPoints<'a, T> {
    pub(crate) fn size(&self) -> usize {
        self.ids.len()
    }
}

/// Symmetric matrix of distances between points of a cluster. Each pair is evaluated once.
pub(crate) fn distance_matrix<T, F, D>(points: &ClusterPoints<T>, distance: &D) -> Result<Array2<F>>
where
    F: Float,
    D: DistanceFunction<T, F> + ?Sized,
{
    let n = points.size();
    let mut dists = Array2::<F>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d = checked_distance(distance, points.vectors[i], points.vectors[j], points.ids[i], points.ids[j])?;
            dists[[i, j]] = d;
            dists[[j, i]] = d;
        }
    }
    Ok(dists)
} // end of distance_matrix

/// Core distances of all points of a cluster given their distance matrix.
///
/// The matrix must have at least 2 rows.
/// On failure returns the index (in the cluster) of a point whose core distance is undefined:
/// a null distance under [ZeroDistancePolicy::Reject], or a non finite result.
pub fn core_distances<F: Float>(
    dists: &Array2<F>,
    dim: usize,
    policy: ZeroDistancePolicy,
) -> std::result::Result<Vec<F>, usize> {
    let n = dists.nrows();
    debug_assert!(n >= 2, "core distances need at least 2 points");
    let floor = match policy {
        ZeroDistancePolicy::Reject => None,
        ZeroDistancePolicy::Floor(eps) => Some(F::from(eps).unwrap_or_else(F::min_positive_value)),
    };
    let exponent = dim as i32;
    let nb_neighbours: F = to_float(n - 1);
    let inv_dim = -F::one() / to_float(dim);
    // distance of a pair as seen by the estimator
    let get_dist = |i: usize, j: usize| -> F {
        match floor {
            Some(eps) => dists[[i, j]].max(eps),
            None => dists[[i, j]],
        }
    };
    //
    let mut core = Vec::<F>::with_capacity(n);
    for i in 0..n {
        // terms are rescaled by the nearest neighbour distance m: each (m/d)^dim is in (0,1] and one equals 1
        let mut m = F::infinity();
        for j in (0..n).filter(|&j| j != i) {
            let d = get_dist(i, j);
            if d <= F::zero() {
                log::debug!("core_distances null distance between nodes {} and {}", i, j);
                return Err(i);
            }
            m = m.min(d);
        }
        let sum = (0..n)
            .filter(|&j| j != i)
            .fold(F::zero(), |acc, j| acc + (m / get_dist(i, j)).powi(exponent));
        let c = m * (sum / nb_neighbours).powf(inv_dim);
        if !c.is_finite() || c <= F::zero() {
            log::debug!("core_distances undefined core distance at node {}, nearest neighbour at {:.3e}", i, m.to_f64().unwrap_or(f64::NAN));
            return Err(i);
        }
        core.push(c);
    }
    Ok(core)
} // end of core_distances

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    use crate::distance::Euclidean;
    use crate::error::DbcvError;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn line_points(xs: &[f64]) -> Vec<Vec<f64>> {
        xs.iter().map(|&x| vec![x, 0.]).collect()
    }

    #[test]
    fn test_distance_matrix_symmetric() {
        log_init_test();
        let data = line_points(&[0., 1., 3.]);
        let ids: Vec<DataId> = vec![0, 1, 2];
        let points = ClusterPoints {
            index: 0,
            ids: &ids,
            vectors: data.iter().map(|v| v.as_slice()).collect(),
        };
        let dists: Array2<f64> = distance_matrix(&points, &Euclidean).unwrap();
        assert_eq!(dists.dim(), (3, 3));
        for i in 0..3 {
            assert_eq!(dists[[i, i]], 0.);
            for j in 0..3 {
                assert_eq!(dists[[i, j]], dists[[j, i]]);
            }
        }
        assert_abs_diff_eq!(dists[[0, 2]], 3., epsilon = 1.0e-12);
    }

    #[test]
    fn test_distance_matrix_invalid_distance() {
        let data = line_points(&[0., 1.]);
        let ids: Vec<DataId> = vec![5, 8];
        let points = ClusterPoints {
            index: 0,
            ids: &ids,
            vectors: data.iter().map(|v| v.as_slice()).collect(),
        };
        let bad = |_: &[f64], _: &[f64]| -> f64 { f64::NAN };
        let res: Result<Array2<f64>> = distance_matrix(&points, &bad);
        assert!(matches!(res, Err(DbcvError::InvalidDistance { a: 5, b: 8, .. })));
    }

    #[test]
    fn test_core_distance_two_points() {
        // with 2 points the core distance is the distance itself, whatever the dimension
        let dists = ndarray::array![[0., 2.5], [2.5, 0.]];
        for dim in 1..5 {
            let core = core_distances(&dists, dim, ZeroDistancePolicy::Reject).unwrap();
            assert_abs_diff_eq!(core[0], 2.5, epsilon = 1.0e-12);
            assert_abs_diff_eq!(core[1], 2.5, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn test_core_distance_three_points_on_line() {
        log_init_test();
        // points at 0, 1, 2 in dimension 2
        let dists = ndarray::array![[0., 1., 2.], [1., 0., 1.], [2., 1., 0.]];
        let core = core_distances(&dists, 2, ZeroDistancePolicy::Reject).unwrap();
        let end = ((1. + 0.25) / 2.0_f64).powf(-0.5);
        assert_abs_diff_eq!(core[0], end, epsilon = 1.0e-12);
        assert_abs_diff_eq!(core[1], 1., epsilon = 1.0e-12);
        assert_abs_diff_eq!(core[2], end, epsilon = 1.0e-12);
        // the middle point is denser
        assert!(core[1] < core[0]);
    }

    #[test]
    fn test_core_distance_zero_distance() {
        let dists = ndarray::array![[0., 0., 1.], [0., 0., 1.], [1., 1., 0.]];
        assert_eq!(core_distances(&dists, 2, ZeroDistancePolicy::Reject), Err(0));
        //
        let core = core_distances(&dists, 2, ZeroDistancePolicy::Floor(1.0e-3)).unwrap();
        assert!(core.iter().all(|c| c.is_finite() && *c > 0.));
        // coincident points are very dense
        assert!(core[0] < 0.01);
        assert_abs_diff_eq!(core[0], core[1], epsilon = 1.0e-15);
    }

    #[test]
    fn test_core_distance_high_dimension() {
        log_init_test();
        // two pairs at distance 3, 100 apart, in dimension 784
        let dists = ndarray::array![
            [0., 3., 100., 100.],
            [3., 0., 100., 100.],
            [100., 100., 0., 3.],
            [100., 100., 3., 0.]
        ];
        let core = core_distances(&dists, 784, ZeroDistancePolicy::Reject).unwrap();
        // the nearest neighbour dominates: core is 3 * 3^(1/784)
        let expected = 3. * 3.0_f64.powf(1. / 784.);
        for c in core {
            assert_abs_diff_eq!(c, expected, epsilon = 1.0e-9);
        }
    }

    #[test]
    fn test_core_distance_small_distances() {
        let dists = ndarray::array![[0., 0.01], [0.01, 0.]];
        let core = core_distances(&dists, 200, ZeroDistancePolicy::Reject).unwrap();
        assert_abs_diff_eq!(core[0], 0.01, epsilon = 1.0e-12);
        assert_abs_diff_eq!(core[1], 0.01, epsilon = 1.0e-12);
        // floored coincident points keep a core distance of the order of the floor
        let dists = ndarray::array![[0., 0., 1.], [0., 0., 1.], [1., 1., 0.]];
        let core = core_distances(&dists, 60, ZeroDistancePolicy::Floor(1.0e-6)).unwrap();
        let expected = 1.0e-6 * 2.0_f64.powf(1. / 60.);
        assert_abs_diff_eq!(core[0], expected, epsilon = 1.0e-12);
        assert_abs_diff_eq!(core[1], expected, epsilon = 1.0e-12);
        assert!(core[0] > 0.);
        assert_abs_diff_eq!(core[2], 1., epsilon = 1.0e-12);
    }
}
