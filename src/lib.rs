//! Density-Based Clustering Validation (DBCV) index of a clustering.
//!
//! See the [dbcv] module for a description of the index.
//!
//! Logging goes through the log crate, set RUST_LOG to get traces (env_logger).

use lazy_static::lazy_static;

pub mod clustering;
pub mod dbcv;
pub mod distance;
pub mod error;
pub mod params;
pub mod prelude;
pub mod relation;
pub mod report;
pub mod tools;

pub use error::{DbcvError, Result};

lazy_static! {
    static ref LOG: u64 = init_log();
}

// install a logger facility
fn init_log() -> u64 {
    let _res = env_logger::try_init();
    log::info!("\n ************** initializing logger *****************\n");
    1
}
