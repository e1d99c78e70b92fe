//! Some tools around evaluation: csv input of labelled points.

pub mod io;
