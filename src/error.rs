//! Error types of the dbcv crate.
//!
//! Any numerical failure met while building the per cluster structures aborts the whole evaluation,
//! the score is never returned partially.

use thiserror::Error;

use crate::relation::DataId;

/// Result type alias for evaluation operations.
pub type Result<T> = std::result::Result<T, DbcvError>;

/// Errors that can occur during a DBCV evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbcvError {
    /// The relation cannot give a dimensionality, so the density estimator has no exponent.
    #[error("relation is not spatial: no dimensionality available for the core distance estimator")]
    NonSpatialRelation,

    /// A core distance cannot be computed (null distance to a cluster neighbour, or non finite result).
    #[error("core distance undefined for point {point} of cluster {cluster}")]
    UndefinedCoreDistance { cluster: usize, point: DataId },

    /// The distance function returned a negative, NaN or infinite value.
    #[error("invalid distance {value} between points {a} and {b}")]
    InvalidDistance { a: DataId, b: DataId, value: f64 },

    /// A cluster references a point the relation does not hold.
    #[error("unknown point {id} (relation size: {size})")]
    UnknownPoint { id: DataId, size: usize },

    /// The relation is empty.
    #[error("empty relation")]
    EmptyRelation,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
