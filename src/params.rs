//! This module defines parameters driving a dbcv evaluation.
//!
//! The core distance of a point $p$ in a cluster $C$ of size $n$, in a space of dimension $d$, is
//! the inverse distance power mean:
//!
//! $$ core(p) = \left( \frac{1}{n-1} \sum_{q \in C, q \neq p} \frac{1}{dist(p,q)^{d}} \right)^{-1/d} $$
//!
//! It is undefined as soon as two points of a cluster are at null distance. The [ZeroDistancePolicy]
//! decides what to do then: stop with an error (the default) or floor the distances at a small positive value.
//!

use crate::error::{DbcvError, Result};

/// What to do when two points of a cluster are at distance 0 in the core distance estimator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZeroDistancePolicy {
    /// stop the evaluation with [DbcvError::UndefinedCoreDistance]
    Reject,
    /// distances below the value are replaced by the value, in the core distance estimator only.
    Floor(f64),
}

/// The minimum spanning tree algorithm run on each cluster mutual reachability matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MstAlgo {
    /// dense Prim, O(n²) with flat arrays
    Prim,
    /// Kruskal with union-find over the n(n-1)/2 edges of the matrix
    Kruskal,
}

/// main parameters driving the evaluation
#[derive(Clone, Copy, Debug)]
pub struct DbcvParams {
    /// policy for coincident points. default to Reject
    pub zero_distance: ZeroDistancePolicy,
    /// spanning tree algorithm. default to Prim
    pub mst: MstAlgo,
    /// run per cluster computations and separation scans with rayon. default to true
    pub parallel: bool,
} // end of DbcvParams

impl Default for DbcvParams {
    fn default() -> Self {
        DbcvParams {
            zero_distance: ZeroDistancePolicy::Reject,
            mst: MstAlgo::Prim,
            parallel: true,
        }
    }
}

impl DbcvParams {
    pub fn new(zero_distance: ZeroDistancePolicy, mst: MstAlgo, parallel: bool) -> Self {
        DbcvParams {
            zero_distance,
            mst,
            parallel,
        }
    }

    pub fn log(&self) {
        log::info!("DbcvParams");
        log::info!("\t zero distance policy : {:?}", self.zero_distance);
        log::info!("\t spanning tree algorithm : {:?}", self.mst);
        log::info!("\t parallel : {}", self.parallel);
    }

    /// floor null distances at eps instead of rejecting them
    pub fn set_zero_distance_floor(&mut self, eps: f64) {
        self.zero_distance = ZeroDistancePolicy::Floor(eps);
    }

    pub fn set_mst_algo(&mut self, mst: MstAlgo) {
        self.mst = mst;
    }

    /// set to false to run everything on the calling thread
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub(crate) fn check(&self) -> Result<()> {
        if let ZeroDistancePolicy::Floor(eps) = self.zero_distance {
            if !(eps > 0. && eps.is_finite()) {
                log::error!("zero distance floor must be positive and finite, got {:.3e}", eps);
                return Err(DbcvError::InvalidParameter(format!(
                    "zero distance floor must be positive and finite, got {}",
                    eps
                )));
            }
        }
        Ok(())
    }
} // end of impl DbcvParams
