// gathers modules and traits to use

pub use crate::clustering::{Cluster, Clustering};

pub use crate::dbcv::{ClusterValidity, DbcvEvaluator, DbcvResult, DBCV_MEASURE};

pub use crate::distance::{AnnDistance, DistanceFunction, Euclidean, SqEuclidean};

pub use crate::error::{DbcvError, Result};

pub use crate::params::{DbcvParams, MstAlgo, ZeroDistancePolicy};

pub use crate::relation::{DataId, Relation, VectorRelation};

pub use crate::report::{EvaluationReport, Measurement};
