//! Multi-metric pivot over grouped rows

use imsight_frame::Frame;
use imsight_render::{format_aggregate_table, PresentationConfig};
use imsight_stats::{aggregate, AggregatedFrame, AggregationSpec};

use crate::error::ImsightResult;

/// Group `frame` by `keys` and apply every metric in `spec`
pub fn pivot(
    frame: &Frame,
    keys: &[&str],
    spec: &AggregationSpec,
) -> ImsightResult<AggregatedFrame> {
    let grouped = frame.group_by(keys)?;
    Ok(aggregate(&grouped, spec)?)
}

/// Pivot and render the result as a text table
///
/// The returned table uses `config.float_decimals`; the returned values are
/// not rounded.
pub fn pivot_table(
    frame: &Frame,
    keys: &[&str],
    spec: &AggregationSpec,
    config: &PresentationConfig,
) -> ImsightResult<(AggregatedFrame, String)> {
    let result = pivot(frame, keys, spec)?;
    let table = format_aggregate_table(&result, config);
    Ok((result, table))
}
