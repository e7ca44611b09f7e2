//! imsight-core - Flag-rate analysis for tabular data
//!
//! This crate ties the imsight workspace together:
//!
//! - **UnivariateAnalysis**: bin a numeric feature, compute the rate of a
//!   binary flag per interval, print a table and draw a dual-axis chart
//! - **Pivot**: group rows by key columns and apply several named metrics per
//!   column in one pass
//!
//! The computing stages live in `imsight-stats`, presentation in
//! `imsight-render`; both are re-exported here.
//!
//! # Example
//!
//! ```
//! use imsight_core::{Frame, UnivariateAnalysis};
//!
//! let frame = Frame::new()
//!     .with_column("age", vec![21.0, 35.0, 47.0, 62.0])?
//!     .with_column("churned", vec![false, false, true, true])?;
//!
//! let report = UnivariateAnalysis::new("age", "churned", 2)
//!     .with_detail(false)
//!     .run(&frame)?;
//!
//! assert_eq!(report.rows.len(), 2);
//! # Ok::<(), imsight_core::ImsightError>(())
//! ```

pub mod analysis;
pub mod error;
pub mod pivot;

pub use analysis::*;
pub use error::*;
pub use pivot::*;

pub use imsight_frame::{DataColumn, Frame, Value};
pub use imsight_render::{presets, Chart, PresentationConfig};
pub use imsight_stats::{
    AggregateOp, AggregatedFrame, AggregationSpec, BinSpec, BinSummary, SummaryOrder,
};
