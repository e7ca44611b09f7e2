//! imsight-render - Presentation for flag-rate analysis
//!
//! Turns computed results into something a person can read:
//!
//! - **Table**: fixed-width text tables for summary rows and aggregations
//! - **Chart**: dual-axis SVG chart, flag rate as a line over count bars
//! - **Export**: CSV and JSON output at full precision
//! - **Config**: figure size and display decimals, loadable from TOML
//!
//! Rendering never alters the values it is given.

pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod table;

pub use axis::{
    format_number, format_percent, group_thousands, AxisConfig, AxisPosition, TickMark,
};
pub use chart::{render_chart, Chart};
pub use config::{presets, PresentationConfig};
pub use error::*;
pub use export::*;
pub use table::*;
