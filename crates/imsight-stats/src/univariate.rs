//! Binned flag rates for a single feature
//!
//! The feature column is discretized with a [`BinSpec`]; for every interval
//! that received at least one row the summarizer reports how many rows carry
//! a flag value, how many of those are positive, and the resulting rate.

use std::cmp::Ordering;

use imsight_frame::{DataColumn, Frame};
use serde::{Deserialize, Serialize};

use crate::binning::{BinSpec, Interval};
use crate::error::{StatsError, StatsResult};

/// Default number of decimals in interval labels
pub const DEFAULT_PRECISION: usize = 2;

/// Order of the summary rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryOrder {
    /// Ascending flag rate, ties in interval order; undefined rates last
    #[default]
    ByRate,
    /// Interval order
    ByInterval,
}

/// Flag statistics for one non-empty interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinSummary {
    /// The interval these statistics cover
    pub interval: Interval,
    /// Interval bounds rendered at the requested precision
    pub label: String,
    /// Mean of the flag, `None` when no row in the interval has a flag value
    pub rate: Option<f64>,
    /// Rows in the interval with a flag value
    pub count: usize,
    /// Rows in the interval with a positive flag
    pub positives: usize,
}

/// Computes [`BinSummary`] rows for a feature/flag pair
#[derive(Debug, Clone, PartialEq)]
pub struct RateSummarizer {
    bins: BinSpec,
    precision: usize,
    order: SummaryOrder,
}

impl RateSummarizer {
    /// Create a summarizer for a binning specification
    pub fn new(bins: impl Into<BinSpec>) -> Self {
        Self {
            bins: bins.into(),
            precision: DEFAULT_PRECISION,
            order: SummaryOrder::default(),
        }
    }

    /// Set the number of decimals used in interval labels
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the row order
    pub fn with_order(mut self, order: SummaryOrder) -> Self {
        self.order = order;
        self
    }

    /// The binning specification
    pub fn bins(&self) -> &BinSpec {
        &self.bins
    }

    /// Compute the summary rows
    ///
    /// Rows whose feature value falls outside every interval are dropped.
    pub fn summarize(&self, frame: &Frame, feature: &str, flag: &str) -> StatsResult<Vec<BinSummary>> {
        let values = frame.numeric_column(feature)?;
        let flags = flag_values(flag, frame.column(flag)?)?;
        let bins = self.bins.resolve(&values)?;

        let mut members = vec![0usize; bins.len()];
        let mut counts = vec![0usize; bins.len()];
        let mut positives = vec![0usize; bins.len()];
        let mut dropped = 0usize;

        for (x, f) in values.iter().zip(&flags) {
            let Some(idx) = bins.assign(*x) else {
                dropped += 1;
                continue;
            };
            members[idx] += 1;
            if let Some(positive) = f {
                counts[idx] += 1;
                if *positive {
                    positives[idx] += 1;
                }
            }
        }

        let mut rows: Vec<BinSummary> = bins
            .intervals()
            .iter()
            .filter(|interval| members[interval.index] > 0)
            .map(|interval| {
                let count = counts[interval.index];
                let pos = positives[interval.index];
                BinSummary {
                    interval: *interval,
                    label: interval.label(self.precision),
                    rate: (count > 0).then(|| pos as f64 / count as f64),
                    count,
                    positives: pos,
                }
            })
            .collect();

        if self.order == SummaryOrder::ByRate {
            // sort_by is stable, so equal rates keep interval order
            rows.sort_by(|a, b| compare_rates(a.rate, b.rate));
        }

        tracing::debug!(
            feature,
            flag,
            intervals = bins.len(),
            non_empty = rows.len(),
            dropped,
            "summarized flag rate by interval"
        );

        Ok(rows)
    }
}

/// Compute summary rows with default precision and rate ordering
pub fn summarize(
    frame: &Frame,
    feature: &str,
    flag: &str,
    bins: impl Into<BinSpec>,
) -> StatsResult<Vec<BinSummary>> {
    RateSummarizer::new(bins).summarize(frame, feature, flag)
}

fn compare_rates(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Per-row flag: `Some(positive)` or `None` when missing
fn flag_values(name: &str, column: &DataColumn) -> StatsResult<Vec<Option<bool>>> {
    match column {
        DataColumn::Bool(v) => Ok(v.iter().map(|&b| Some(b)).collect()),
        DataColumn::Int64(_) | DataColumn::Float64(_) => column
            .to_f64()
            .unwrap_or_default()
            .into_iter()
            .map(|x| {
                if x.is_nan() {
                    Ok(None)
                } else if x == 0.0 {
                    Ok(Some(false))
                } else if x == 1.0 {
                    Ok(Some(true))
                } else {
                    Err(StatsError::NonBinaryFlag {
                        column: name.to_string(),
                        value: x,
                    })
                }
            })
            .collect(),
        DataColumn::String(_) => Err(StatsError::TypeMismatch {
            column: name.to_string(),
            expected: "bool or binary numeric".to_string(),
            actual: column.dtype(),
        }),
    }
}
