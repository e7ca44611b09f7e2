//! imsight-stats - Statistical core for flag-rate analysis
//!
//! This crate provides the computations behind imsight:
//!
//! - **Binning**: equal-width or explicit-edge discretization of a feature
//! - **Univariate**: per-interval count, positive count and rate of a binary flag
//! - **Aggregate**: grouped multi-metric aggregation keyed by `(column, metric)`
//! - **Summary**: sum, mean, variance, median and friends for a numeric sample
//!
//! Everything here is pure; presentation lives in `imsight-render`.

pub mod aggregate;
pub mod binning;
pub mod error;
pub mod summary;
pub mod univariate;

pub use aggregate::*;
pub use binning::*;
pub use error::*;
pub use summary::*;
pub use univariate::*;
