//! Discretization of a continuous feature into contiguous intervals
//!
//! A [`BinSpec`] is either a bin count K (equal-width intervals over the
//! observed range) or an explicit list of increasing edges. Every interval is
//! left-closed and right-open, `[lo, hi)`, except the last one, which is
//! closed, `[lo, hi]`, so the largest edge still belongs to a bin.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Relative widening applied when all observed values are equal
const DEGENERATE_PAD: f64 = 0.001;

/// How to discretize a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BinSpec {
    /// K equal-width intervals spanning the observed range
    Count(i64),
    /// Explicit, strictly increasing interval edges
    Edges(Vec<f64>),
}

impl BinSpec {
    /// K equal-width bins
    pub fn count(k: i64) -> Self {
        BinSpec::Count(k)
    }

    /// Explicit edges
    pub fn edges(edges: impl Into<Vec<f64>>) -> Self {
        BinSpec::Edges(edges.into())
    }

    /// Check the specification without looking at any data
    pub fn validate(&self) -> StatsResult<()> {
        match self {
            BinSpec::Count(k) if *k <= 0 => Err(StatsError::InvalidBinning(format!(
                "bin count must be positive, got {}",
                k
            ))),
            BinSpec::Count(_) => Ok(()),
            BinSpec::Edges(edges) => {
                if edges.len() < 2 {
                    return Err(StatsError::InvalidBinning(format!(
                        "at least two edges are required, got {}",
                        edges.len()
                    )));
                }
                if let Some(bad) = edges.iter().find(|e| !e.is_finite()) {
                    return Err(StatsError::InvalidBinning(format!(
                        "edges must be finite, got {}",
                        bad
                    )));
                }
                if let Some(pair) = edges.windows(2).find(|w| w[0] >= w[1]) {
                    return Err(StatsError::InvalidBinning(format!(
                        "edges must be strictly increasing, got {} then {}",
                        pair[0], pair[1]
                    )));
                }
                Ok(())
            }
        }
    }

    /// Resolve the specification against observed feature values
    ///
    /// Equal-width bins over a feature with no finite values resolve to no
    /// intervals at all.
    pub fn resolve(&self, values: &[f64]) -> StatsResult<Bins> {
        self.validate()?;

        match self {
            BinSpec::Edges(edges) => Ok(Bins::from_edges(edges.clone())),
            BinSpec::Count(k) => {
                let k = *k as usize;
                let (min, max) = match finite_range(values) {
                    Some(range) => range,
                    None => return Ok(Bins::from_edges(Vec::new())),
                };

                let (min, max) = if min == max {
                    let pad = if min == 0.0 {
                        DEGENERATE_PAD
                    } else {
                        min.abs() * DEGENERATE_PAD
                    };
                    ((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
                } else {
                    (min, max)
                };

                // Interpolate rather than step by `max - min`, which overflows
                // for spans wider than f64::MAX
                let mut edges: Vec<f64> = (0..k)
                    .map(|i| {
                        let t = i as f64 / k as f64;
                        (min * (1.0 - t) + max * t).max(min).min(max)
                    })
                    .collect();
                edges.push(max);
                Ok(Bins::from_edges(edges))
            }
        }
    }
}

impl From<i64> for BinSpec {
    fn from(k: i64) -> Self {
        BinSpec::Count(k)
    }
}

impl From<i32> for BinSpec {
    fn from(k: i32) -> Self {
        BinSpec::Count(i64::from(k))
    }
}

impl From<usize> for BinSpec {
    fn from(k: usize) -> Self {
        BinSpec::Count(i64::try_from(k).unwrap_or(i64::MAX))
    }
}

impl From<&[f64]> for BinSpec {
    fn from(edges: &[f64]) -> Self {
        BinSpec::Edges(edges.to_vec())
    }
}

impl From<Vec<f64>> for BinSpec {
    fn from(edges: Vec<f64>) -> Self {
        BinSpec::Edges(edges)
    }
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// One interval of a resolved binning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Position in edge order
    pub index: usize,
    /// Lower bound (always inclusive)
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Whether the upper bound is inclusive (only for the last interval)
    pub closed_right: bool,
}

impl Interval {
    /// Check membership under the half-open convention
    pub fn contains(&self, x: f64) -> bool {
        if self.closed_right {
            x >= self.lower && x <= self.upper
        } else {
            x >= self.lower && x < self.upper
        }
    }

    /// Label with both bounds at a fixed number of decimals, e.g. `[1.00, 5.50)`
    pub fn label(&self, precision: usize) -> String {
        let close = if self.closed_right { ']' } else { ')' };
        format!(
            "[{:.prec$}, {:.prec$}{}",
            self.lower,
            self.upper,
            close,
            prec = precision
        )
    }
}

/// A resolved set of contiguous intervals
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    edges: Vec<f64>,
    intervals: Vec<Interval>,
}

impl Bins {
    fn from_edges(edges: Vec<f64>) -> Self {
        let n = edges.len().saturating_sub(1);
        let intervals = edges
            .windows(2)
            .enumerate()
            .map(|(index, w)| Interval {
                index,
                lower: w[0],
                upper: w[1],
                closed_right: index + 1 == n,
            })
            .collect();

        Self { edges, intervals }
    }

    /// Interval edges
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Intervals in edge order
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Number of intervals
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if there are no intervals
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Index of the interval holding `x`, or `None` when `x` is outside every
    /// interval or not finite
    ///
    /// Time complexity: O(log n)
    pub fn assign(&self, x: f64) -> Option<usize> {
        let first = *self.edges.first()?;
        let last = *self.edges.last()?;

        if !x.is_finite() || x < first || x > last || self.intervals.is_empty() {
            return None;
        }
        if x == last {
            return Some(self.intervals.len() - 1);
        }

        // Number of edges <= x, so the interval starts at the previous edge
        let upper = self.edges.partition_point(|&e| e <= x);
        upper
            .checked_sub(1)
            .map(|idx| idx.min(self.intervals.len() - 1))
    }
}
