//! The distance plugged into the evaluator.
//!
//! The evaluator consumes exactly one symmetric, non negative distance, given at construction.
//! It can be a closure, one of the two minkowski distances defined here, or any distance of the
//! [hnsw_rs](https://crates.io/crates/hnsw_rs) distance library wrapped in [AnnDistance].
//!
//! The distance is called concurrently from rayon threads, hence the `Sync` bound.

use num_traits::Float;

use hnsw_rs::prelude::Distance;

use crate::error::{DbcvError, Result};
use crate::relation::DataId;

/// A symmetric pairwise distance between two vectors of `T`, with values in `F`.
pub trait DistanceFunction<T, F>: Sync {
    fn distance(&self, va: &[T], vb: &[T]) -> F;
}

impl<T, F, Func> DistanceFunction<T, F> for Func
where
    Func: Fn(&[T], &[T]) -> F + Sync,
{
    fn distance(&self, va: &[T], vb: &[T]) -> F {
        self(va, vb)
    }
}

/// Euclidean distance computed in `T` and cast to `F`
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl<T, F> DistanceFunction<T, F> for Euclidean
where
    T: Float + Sync,
    F: Float,
{
    fn distance(&self, va: &[T], vb: &[T]) -> F {
        let d2 = squared_l2(va, vb);
        F::from(d2.sqrt()).unwrap_or_else(F::nan)
    }
}

/// Squared euclidean distance, the default distance of the index in its original presentation.
#[derive(Clone, Copy, Debug, Default)]
pub struct SqEuclidean;

impl<T, F> DistanceFunction<T, F> for SqEuclidean
where
    T: Float + Sync,
    F: Float,
{
    fn distance(&self, va: &[T], vb: &[T]) -> F {
        F::from(squared_l2(va, vb)).unwrap_or_else(F::nan)
    }
}

fn squared_l2<T: Float>(va: &[T], vb: &[T]) -> T {
    va.iter()
        .zip(vb.iter())
        .fold(T::zero(), |acc, (&a, &b)| acc + (a - b) * (a - b))
}

/// Adapter for distances of hnsw_rs (DistL1, DistL2, DistCosine, DistJeffreys ...).
///
/// These distances return a f32, which is cast to `F`.
pub struct AnnDistance<D>(pub D);

impl<T, F, D> DistanceFunction<T, F> for AnnDistance<D>
where
    T: Send + Sync,
    F: Float,
    D: Distance<T> + Sync,
{
    fn distance(&self, va: &[T], vb: &[T]) -> F {
        F::from(self.0.eval(va, vb)).unwrap_or_else(F::nan)
    }
}

/// calls the distance and checks it is a usable value (finite and non negative).
pub(crate) fn checked_distance<T, F, D>(distance: &D, va: &[T], vb: &[T], a: DataId, b: DataId) -> Result<F>
where
    F: Float,
    D: DistanceFunction<T, F> + ?Sized,
{
    let d = distance.distance(va, vb);
    if !d.is_finite() || d < F::zero() {
        let value = d.to_f64().unwrap_or(f64::NAN);
        log::error!("invalid distance {:.3e} between points {} and {}", value, a, b);
        return Err(DbcvError::InvalidDistance { a, b, value });
    }
    Ok(d)
} // end of checked_distance
