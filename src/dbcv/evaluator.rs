//! The evaluator: drives per cluster computations, the separation scan and the final reduction.
//!
//! Stages of an evaluation:
//! 1. checks: parameters, relation size and dimensionality, cluster membership.
//! 2. for each non degenerate cluster (in parallel): core distances, mutual reachability matrix,
//!    spanning tree, degrees and density sparseness. Each cluster owns its matrix, dropped at the end of the stage.
//! 3. once all clusters are done: density separation of each cluster.
//! 4. reduction to the index, weighting cluster validities by cluster size / relation size.
//!
//! Degenerate clusters (noise or less than 2 points) get weight 0 and validity 0.
//! If no cluster is left the index is 0.

use num_traits::Float;
use rayon::prelude::*;

use crate::clustering::Clustering;
use crate::distance::DistanceFunction;
use crate::error::{DbcvError, Result};
use crate::params::DbcvParams;
use crate::relation::Relation;
use crate::report::{EvaluationReport, Measurement};

use super::core_distance::{core_distances, distance_matrix, ClusterPoints};
use super::mreach::into_mutual_reachability;
use super::separation::{density_separation, SeparationSide};
use super::{density_sparseness, spanning_tree, to_float, TreeDegrees};

/// label of the index in evaluation reports
pub const DBCV_MEASURE: &str = "Density Based Clustering Validation";

/// Per cluster quantities of an evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterValidity<F> {
    /// rank of the cluster in the clustering
    pub index: usize,
    pub size: usize,
    pub noise: bool,
    /// density sparseness, None for degenerate clusters
    pub dsc: Option<F>,
    /// density separation, None for degenerate clusters or if there is no other cluster
    pub dspc: Option<F>,
    pub has_internal_edge: bool,
    /// (dspc - dsc) / max(dspc, dsc), in [-1, 1]
    pub validity: F,
    /// size / relation size, 0 for degenerate clusters
    pub weight: F,
}

impl<F: Float> ClusterValidity<F> {
    fn degenerate(index: usize, size: usize, noise: bool) -> Self {
        ClusterValidity {
            index,
            size,
            noise,
            dsc: None,
            dspc: None,
            has_internal_edge: false,
            validity: F::zero(),
            weight: F::zero(),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.dsc.is_none()
    }
}

/// The index and its per cluster details
#[derive(Clone, Debug, PartialEq)]
pub struct DbcvResult<F> {
    score: F,
    clusters: Vec<ClusterValidity<F>>,
}

impl<F: Float> DbcvResult<F> {
    /// the index, in [-1, 1]
    pub fn get_score(&self) -> F {
        self.score
    }

    pub fn get_clusters(&self) -> &[ClusterValidity<F>] {
        &self.clusters
    }

    /// number of clusters that took part in the index
    pub fn get_nb_evaluated(&self) -> usize {
        self.clusters.iter().filter(|c| !c.is_degenerate()).count()
    }

    /// sum of cluster weights, the fraction of the relation covered by non degenerate clusters
    pub fn total_weight(&self) -> F {
        self.clusters.iter().fold(F::zero(), |acc, c| acc + c.weight)
    }

    /// records the index in group "Distance-based Evaluation" of the report
    pub fn add_to_report(&self, report: &mut EvaluationReport) {
        let value = self.score.to_f64().unwrap_or(f64::NAN);
        report
            .find_or_create_group("Distance-based Evaluation")
            .add_measure(Measurement::new(DBCV_MEASURE, value, -1., 1., 1., false));
    }

    pub fn to_report(&self) -> EvaluationReport {
        let mut report = EvaluationReport::new("Internal Clustering Evaluation", "internal evaluation");
        self.add_to_report(&mut report);
        report
    }
} // end of impl DbcvResult

/// validity of a cluster. 0 if both quantities are 0, or if there is no separation.
pub fn cluster_validity<F: Float>(dsc: F, dspc: Option<F>) -> F {
    match dspc {
        None => F::zero(),
        Some(dspc) => {
            let denom = dspc.max(dsc);
            if denom > F::zero() {
                (dspc - dsc) / denom
            } else {
                F::zero()
            }
        }
    }
}

// what stage 2 keeps of a cluster
struct ClusterState<'a, T, F> {
    side: SeparationSide<'a, T, F>,
    dsc: F,
    has_internal_edge: bool,
}

/// Computes the Density-Based Clustering Validation index with a given distance.
pub struct DbcvEvaluator<D> {
    distance: D,
    params: DbcvParams,
}

impl<D> DbcvEvaluator<D> {
    /// evaluator with default parameters
    pub fn new(distance: D) -> Self {
        DbcvEvaluator::with_params(distance, DbcvParams::default())
    }

    pub fn with_params(distance: D, params: DbcvParams) -> Self {
        lazy_static::initialize(&crate::LOG);
        DbcvEvaluator { distance, params }
    }

    pub fn get_params(&self) -> &DbcvParams {
        &self.params
    }

    /// Evaluates a clustering of a relation.
    ///
    /// Fails if the relation is empty or not spatial, if a cluster references an unknown point, or if a core
    /// distance or a distance value is unusable. No partial result is returned.
    pub fn evaluate<T, F, R>(&self, relation: &R, clustering: &Clustering) -> Result<DbcvResult<F>>
    where
        R: Relation<T> + ?Sized,
        T: Sync,
        F: Float + Send + Sync,
        D: DistanceFunction<T, F>,
    {
        self.params.check()?;
        let nb_points = relation.size();
        if nb_points == 0 {
            log::error!("evaluate : empty relation");
            return Err(DbcvError::EmptyRelation);
        }
        let dim = match relation.dimensionality() {
            Some(dim) => dim,
            None => {
                log::error!("evaluate : relation has no dimensionality");
                return Err(DbcvError::NonSpatialRelation);
            }
        };
        let clusters = clustering.get_clusters();
        log::debug!("dbcv evaluation, nb points : {}, dim : {}, nb clusters : {}", nb_points, dim, clusters.len());
        //
        // gather vectors of non degenerate clusters
        let mut views = Vec::<ClusterPoints<T>>::with_capacity(clusters.len());
        for (index, cluster) in clusters.iter().enumerate() {
            let mut vectors = Vec::with_capacity(cluster.size());
            for &id in cluster.get_ids() {
                match relation.get(id) {
                    Some(v) => vectors.push(v),
                    None => {
                        log::error!("cluster {} references unknown point {}", index, id);
                        return Err(DbcvError::UnknownPoint { id, size: nb_points });
                    }
                }
            }
            if cluster.is_degenerate() {
                log::trace!("skipping degenerate cluster {} (size {}, noise {})", index, cluster.size(), cluster.is_noise());
                continue;
            }
            views.push(ClusterPoints {
                index,
                ids: cluster.get_ids(),
                vectors,
            });
        }
        if views.is_empty() {
            log::info!("no non degenerate cluster, dbcv set to 0");
            let clusters = clusters
                .iter()
                .enumerate()
                .map(|(i, c)| ClusterValidity::degenerate(i, c.size(), c.is_noise()))
                .collect();
            return Ok(DbcvResult {
                score: F::zero(),
                clusters,
            });
        }
        //
        log::debug!("dbcv : core distances, spanning trees and sparseness of {} clusters", views.len());
        let states: Vec<ClusterState<T, F>> = if self.params.parallel {
            views
                .par_iter()
                .map(|points| self.analyze_cluster(points, dim))
                .collect::<Result<Vec<_>>>()?
        } else {
            views
                .iter()
                .map(|points| self.analyze_cluster(points, dim))
                .collect::<Result<Vec<_>>>()?
        };
        drop(views);
        //
        log::debug!("dbcv : density separation");
        let (sides, others): (Vec<SeparationSide<T, F>>, Vec<(F, bool)>) = states
            .into_iter()
            .map(|s| (s.side, (s.dsc, s.has_internal_edge)))
            .unzip();
        let mut dspcs = Vec::<Option<F>>::with_capacity(sides.len());
        for side in &sides {
            dspcs.push(density_separation(side, &sides, &self.distance, self.params.parallel)?);
        }
        //
        log::debug!("dbcv : reduction");
        let total: F = to_float(nb_points);
        let mut score = F::zero();
        let mut validities = Vec::<ClusterValidity<F>>::with_capacity(clusters.len());
        let mut k = 0;
        for (index, cluster) in clusters.iter().enumerate() {
            if k < sides.len() && sides[k].index == index {
                let (dsc, has_internal_edge) = others[k];
                let dspc = dspcs[k];
                let validity = cluster_validity(dsc, dspc);
                let weight = to_float::<F>(cluster.size()) / total;
                score = score + weight * validity;
                validities.push(ClusterValidity {
                    index,
                    size: cluster.size(),
                    noise: false,
                    dsc: Some(dsc),
                    dspc,
                    has_internal_edge,
                    validity,
                    weight,
                });
                k += 1;
            } else {
                validities.push(ClusterValidity::degenerate(index, cluster.size(), cluster.is_noise()));
            }
        }
        log::debug!("dbcv : {:.6e} over {} clusters", score.to_f64().unwrap_or(f64::NAN), sides.len());
        Ok(DbcvResult {
            score,
            clusters: validities,
        })
    } // end of evaluate

    /// evaluates and records the index in the report
    pub fn evaluate_into<T, F, R>(
        &self,
        relation: &R,
        clustering: &Clustering,
        report: &mut EvaluationReport,
    ) -> Result<DbcvResult<F>>
    where
        R: Relation<T> + ?Sized,
        T: Sync,
        F: Float + Send + Sync,
        D: DistanceFunction<T, F>,
    {
        let res = self.evaluate(relation, clustering)?;
        res.add_to_report(report);
        Ok(res)
    }

    // core distances, mutual reachability, spanning tree, degrees and sparseness of one cluster
    fn analyze_cluster<'a, T, F>(&self, points: &ClusterPoints<'a, T>, dim: usize) -> Result<ClusterState<'a, T, F>>
    where
        F: Float,
        D: DistanceFunction<T, F>,
    {
        let dists = distance_matrix(points, &self.distance)?;
        let core = core_distances(&dists, dim, self.params.zero_distance).map_err(|node| {
            log::error!("undefined core distance in cluster {} at point {}", points.index, points.ids[node]);
            DbcvError::UndefinedCoreDistance {
                cluster: points.index,
                point: points.ids[node],
            }
        })?;
        let mrd = into_mutual_reachability(dists, &core);
        let edges = spanning_tree(&mrd, self.params.mst);
        let degrees = TreeDegrees::from_edges(points.size(), &edges);
        let dsc = density_sparseness(&edges, &degrees);
        log::trace!(
            "cluster {} size {} : dsc {:.3e}, internal edge : {}",
            points.index,
            points.size(),
            dsc.to_f64().unwrap_or(f64::NAN),
            degrees.has_internal_edge()
        );
        Ok(ClusterState {
            side: SeparationSide::new(points, &core, &degrees),
            dsc,
            has_internal_edge: degrees.has_internal_edge(),
        })
    } // end of analyze_cluster
} // end of impl DbcvEvaluator

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    use crate::clustering::Cluster;
    use crate::distance::{Euclidean, SqEuclidean};
    use crate::params::{MstAlgo, ZeroDistancePolicy};
    use crate::relation::VectorRelation;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_cluster_validity() {
        assert_eq!(cluster_validity(1., Some(10.)), 0.9);
        assert_eq!(cluster_validity(10., Some(1.)), -0.9);
        assert_eq!(cluster_validity(0., Some(0.)), 0.);
        assert_eq!(cluster_validity(3., None), 0.);
    }

    #[test]
    fn test_square_scenario() {
        log_init_test();
        // two vertical pairs at distance 1: sparseness equals separation
        let rel = VectorRelation::new(vec![vec![0., 0.], vec![0., 1.], vec![1., 0.], vec![1., 1.]]);
        let clustering = Clustering::new(vec![Cluster::new(vec![0, 1]), Cluster::new(vec![2, 3])]);
        let res: DbcvResult<f64> = DbcvEvaluator::new(Euclidean).evaluate(&rel, &clustering).unwrap();
        for c in res.get_clusters() {
            // core distances are 1, the only edge has weight 1
            assert_abs_diff_eq!(c.dsc.unwrap(), 1., epsilon = 1.0e-9);
            assert_abs_diff_eq!(c.dspc.unwrap(), 1., epsilon = 1.0e-9);
            assert!(!c.has_internal_edge);
            assert_abs_diff_eq!(c.weight, 0.5, epsilon = 1.0e-12);
        }
        assert_abs_diff_eq!(res.get_score(), 0., epsilon = 1.0e-9);
    }

    #[test]
    fn test_separated_pairs() {
        let rel = VectorRelation::new(vec![vec![0., 0.], vec![0., 1.], vec![10., 0.], vec![10., 1.]]);
        let clustering = Clustering::new(vec![Cluster::new(vec![0, 1]), Cluster::new(vec![2, 3])]);
        let res: DbcvResult<f64> = DbcvEvaluator::new(Euclidean).evaluate(&rel, &clustering).unwrap();
        // dsc = 1, dspc = 10
        assert_abs_diff_eq!(res.get_score(), 0.9, epsilon = 1.0e-9);
    }

    #[test]
    fn test_path_cluster_uses_internal_edge() {
        // a path of 4 points with one internal edge, and a far pair
        let rel = VectorRelation::new(vec![
            vec![0., 0.],
            vec![1., 0.],
            vec![2., 0.],
            vec![3., 0.],
            vec![20., 0.],
            vec![20., 1.],
        ]);
        let clustering = Clustering::new(vec![Cluster::new(vec![0, 1, 2, 3]), Cluster::new(vec![4, 5])]);
        let res: DbcvResult<f64> = DbcvEvaluator::new(Euclidean).evaluate(&rel, &clustering).unwrap();
        let path = &res.get_clusters()[0];
        assert!(path.has_internal_edge);
        // core distance of the two middle points : ((1 + 1 + 1/4) / 3)^(-1/2)
        let core_mid = (2.25_f64 / 3.).powf(-0.5);
        let core_end = ((1. + 0.25 + 1. / 9.) / 3.0_f64).powf(-0.5);
        assert_abs_diff_eq!(path.dsc.unwrap(), core_mid, epsilon = 1.0e-9);
        // separation from middle point (2,0) to (20,0)
        assert_abs_diff_eq!(path.dspc.unwrap(), 18., epsilon = 1.0e-9);
        assert!(core_end > core_mid);
        let vc_path = (18. - core_mid) / 18.;
        let pair = &res.get_clusters()[1];
        let vc_pair = (18. - 1.) / 18.;
        assert_abs_diff_eq!(pair.validity, vc_pair, epsilon = 1.0e-9);
        let expected = 4. / 6. * vc_path + 2. / 6. * vc_pair;
        assert_abs_diff_eq!(res.get_score(), expected, epsilon = 1.0e-9);
    }

    #[test]
    fn test_degenerate_clusters() {
        let rel = VectorRelation::new(vec![
            vec![0., 0.],
            vec![0., 1.],
            vec![1., 0.],
            vec![5., 5.],
            vec![9., 9.],
            vec![-3., 4.],
        ]);
        let clustering = Clustering::new(vec![
            Cluster::new(vec![0, 1, 2]),
            Cluster::new(vec![3]),
            Cluster::noise(vec![4, 5]),
        ]);
        let res: DbcvResult<f64> = DbcvEvaluator::new(Euclidean).evaluate(&rel, &clustering).unwrap();
        // a single non degenerate cluster: no separation, validity 0
        assert_eq!(res.get_nb_evaluated(), 1);
        assert!(res.get_clusters()[0].dspc.is_none());
        assert_eq!(res.get_clusters()[0].validity, 0.);
        assert_eq!(res.get_score(), 0.);
        for c in &res.get_clusters()[1..] {
            assert!(c.is_degenerate());
            assert_eq!(c.weight, 0.);
            assert_eq!(c.validity, 0.);
        }
        assert!(res.get_clusters()[2].noise);
        assert_abs_diff_eq!(res.total_weight(), 0.5, epsilon = 1.0e-12);
    }

    #[test]
    fn test_no_cluster_left() {
        let rel = VectorRelation::new(vec![vec![0., 0.], vec![0., 1.]]);
        let clustering = Clustering::new(vec![Cluster::noise(vec![0, 1])]);
        let res: DbcvResult<f64> = DbcvEvaluator::new(Euclidean).evaluate(&rel, &clustering).unwrap();
        assert_eq!(res.get_score(), 0.);
        assert_eq!(res.get_nb_evaluated(), 0);
        //
        let res: DbcvResult<f64> = DbcvEvaluator::new(Euclidean).evaluate(&rel, &Clustering::default()).unwrap();
        assert_eq!(res.get_score(), 0.);
        assert!(res.get_clusters().is_empty());
    }

    #[test]
    fn test_errors() {
        let evaluator = DbcvEvaluator::new(Euclidean);
        // ragged rows
        let rel = VectorRelation::new(vec![vec![0., 0.], vec![1.]]);
        let clustering = Clustering::new(vec![Cluster::new(vec![0, 1])]);
        let res: Result<DbcvResult<f64>> = evaluator.evaluate(&rel, &clustering);
        assert_eq!(res, Err(DbcvError::NonSpatialRelation));
        // unknown point, even in noise
        let rel = VectorRelation::new(vec![vec![0., 0.], vec![1., 0.]]);
        let clustering = Clustering::new(vec![Cluster::new(vec![0, 1]), Cluster::noise(vec![7])]);
        let res: Result<DbcvResult<f64>> = evaluator.evaluate(&rel, &clustering);
        assert_eq!(res, Err(DbcvError::UnknownPoint { id: 7, size: 2 }));
        // empty relation
        let rel = VectorRelation::<f64>::new(Vec::new());
        let res: Result<DbcvResult<f64>> = evaluator.evaluate(&rel, &Clustering::default());
        assert_eq!(res, Err(DbcvError::EmptyRelation));
        // infinite distance between clusters
        let rel = VectorRelation::new(vec![vec![0., 0.], vec![0., 1.], vec![10., 0.], vec![10., 1.]]);
        let clustering = Clustering::new(vec![Cluster::new(vec![0, 1]), Cluster::new(vec![2, 3])]);
        let far = |va: &[f64], vb: &[f64]| -> f64 {
            if (va[0] - vb[0]).abs() > 5. {
                f64::INFINITY
            } else {
                (va[1] - vb[1]).abs()
            }
        };
        let res: Result<DbcvResult<f64>> = DbcvEvaluator::new(far).evaluate(&rel, &clustering);
        assert!(matches!(res, Err(DbcvError::InvalidDistance { .. })));
    }

    #[test]
    fn test_high_dimension() {
        log_init_test();
        // two pairs of points at distance 3, about 100 apart, in dimension 784
        let dim = 784;
        let mut data = vec![vec![0.; dim]; 4];
        data[1][0] = 3.;
        data[2][1] = 100.;
        data[3][1] = 100.;
        data[3][0] = 3.;
        let rel = VectorRelation::new(data);
        let clustering = Clustering::new(vec![Cluster::new(vec![0, 1]), Cluster::new(vec![2, 3])]);
        let res: DbcvResult<f64> = DbcvEvaluator::new(Euclidean).evaluate(&rel, &clustering).unwrap();
        // with 2 points core distances are the distance itself, the separation is 100
        let dsc = 3.;
        for c in res.get_clusters() {
            assert_abs_diff_eq!(c.dsc.unwrap(), dsc, epsilon = 1.0e-9);
            assert_abs_diff_eq!(c.dspc.unwrap(), 100., epsilon = 1.0e-9);
        }
        assert_abs_diff_eq!(res.get_score(), (100. - dsc) / 100., epsilon = 1.0e-9);
    }

    #[test]
    fn test_coincident_points() {
        let rel = VectorRelation::new(vec![
            vec![0., 0.],
            vec![0., 0.],
            vec![0., 1.],
            vec![5., 0.],
            vec![5., 1.],
        ]);
        let clustering = Clustering::new(vec![Cluster::new(vec![0, 1, 2]), Cluster::new(vec![3, 4])]);
        let res: Result<DbcvResult<f64>> = DbcvEvaluator::new(Euclidean).evaluate(&rel, &clustering);
        assert_eq!(res, Err(DbcvError::UndefinedCoreDistance { cluster: 0, point: 0 }));
        //
        let mut params = DbcvParams::default();
        params.set_zero_distance_floor(1.0e-6);
        let res: DbcvResult<f64> = DbcvEvaluator::with_params(Euclidean, params).evaluate(&rel, &clustering).unwrap();
        assert!(res.get_score().is_finite());
        assert!(res.get_score() > 0.);
        // a bad floor is rejected
        let params = DbcvParams::new(ZeroDistancePolicy::Floor(-1.), MstAlgo::Prim, true);
        let res: Result<DbcvResult<f64>> = DbcvEvaluator::with_params(Euclidean, params).evaluate(&rel, &clustering);
        assert!(matches!(res, Err(DbcvError::InvalidParameter(_))));
    }

    #[test]
    fn test_squared_euclidean_and_report() {
        let rel = VectorRelation::new(vec![vec![0., 0.], vec![0., 1.], vec![10., 0.], vec![10., 1.]]);
        let clustering = Clustering::new(vec![Cluster::new(vec![0, 1]), Cluster::new(vec![2, 3])]);
        let mut report = EvaluationReport::new("Internal Clustering Evaluation", "internal evaluation");
        let res: DbcvResult<f64> = DbcvEvaluator::new(SqEuclidean)
            .evaluate_into(&rel, &clustering, &mut report)
            .unwrap();
        // dsc = 1, dspc = 100
        assert_abs_diff_eq!(res.get_score(), 0.99, epsilon = 1.0e-9);
        let measure = report
            .get_group("Distance-based Evaluation")
            .and_then(|g| g.get_measure(DBCV_MEASURE))
            .unwrap();
        assert_abs_diff_eq!(measure.value, 0.99, epsilon = 1.0e-9);
        assert_eq!((measure.min, measure.max), (-1., 1.));
        assert_eq!(res.to_report(), report);
    }

    #[test]
    fn test_f32_scores() {
        let rel = VectorRelation::new(vec![vec![0.0_f32, 0.], vec![0., 1.], vec![10., 0.], vec![10., 1.]]);
        let clustering = Clustering::from_labels(&[0, 0, 1, 1]);
        let res: DbcvResult<f32> = DbcvEvaluator::new(Euclidean).evaluate(&rel, &clustering).unwrap();
        assert_abs_diff_eq!(res.get_score(), 0.9_f32, epsilon = 1.0e-5);
    }
}
