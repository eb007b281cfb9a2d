#![forbid(unsafe_code)]

mod error;
mod percolation;
mod stats;
mod tracker;
mod union_find;

pub use error::{Error, Result};
pub use percolation::Percolation;
pub use stats::{run_trial, Config, PercolationStats, Sampling, CONFIDENCE_95};
pub use union_find::UnionFind;
