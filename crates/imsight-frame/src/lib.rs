//! imsight-frame - In-memory tabular datasets
//!
//! This crate provides the dataset model shared by the imsight crates:
//!
//! - **Frame**: named, equal-length, typed columns
//! - **Schema**: column descriptors and types
//! - **Value**: totally ordered scalar view of a cell
//! - **GroupedFrame**: rows partitioned by one or more key columns
//!
//! # Design
//!
//! Data is stored column-wise. Loading from files is out of scope; callers
//! build frames from vectors they already hold.

pub mod error;
pub mod frame;
pub mod group;
pub mod schema;
pub mod value;

pub use error::*;
pub use frame::*;
pub use group::*;
pub use schema::*;
pub use value::*;
