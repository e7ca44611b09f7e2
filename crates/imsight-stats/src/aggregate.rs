//! Grouped multi-metric aggregation
//!
//! An [`AggregationSpec`] lists `(column, metric name, function)` triples.
//! Applying it to a [`GroupedFrame`] yields an [`AggregatedFrame`] with one
//! row per group and one [`MetricColumn`] per `(column, metric)` pair.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use imsight_frame::{ColumnType, DataColumn, GroupedFrame, Value};
use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::summary::SummaryStats;

/// Aggregation functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateOp {
    /// Sum of non-null values (0 for an empty group)
    Sum,
    /// Average of non-null values
    Mean,
    /// Number of non-null values
    Count,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
    /// Median value
    Median,
    /// Sample standard deviation
    Std,
    /// Sample variance
    Var,
    /// First non-null value
    First,
    /// Last non-null value
    Last,
    /// Number of distinct non-null values
    NUnique,
}

impl AggregateOp {
    /// All supported functions
    pub const ALL: [AggregateOp; 11] = [
        AggregateOp::Sum,
        AggregateOp::Mean,
        AggregateOp::Count,
        AggregateOp::Min,
        AggregateOp::Max,
        AggregateOp::Median,
        AggregateOp::Std,
        AggregateOp::Var,
        AggregateOp::First,
        AggregateOp::Last,
        AggregateOp::NUnique,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Mean => "mean",
            AggregateOp::Count => "count",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Median => "median",
            AggregateOp::Std => "std",
            AggregateOp::Var => "var",
            AggregateOp::First => "first",
            AggregateOp::Last => "last",
            AggregateOp::NUnique => "nunique",
        }
    }

    /// Whether the function needs numeric (or boolean) input
    pub fn requires_numeric(&self) -> bool {
        !matches!(
            self,
            AggregateOp::Count | AggregateOp::First | AggregateOp::Last | AggregateOp::NUnique
        )
    }

    /// Whether the function accepts a column of this type
    pub fn accepts(&self, dtype: ColumnType) -> bool {
        !self.requires_numeric() || dtype.is_numeric() || dtype == ColumnType::Bool
    }

    /// Apply the function to the given rows of a column
    ///
    /// Sum, min and max of an integer column stay integers.
    pub fn apply(&self, column: &DataColumn, rows: &[usize]) -> Value {
        if let (DataColumn::Int64(data), AggregateOp::Sum | AggregateOp::Min | AggregateOp::Max) =
            (column, self)
        {
            return reduce_ints(*self, data, rows);
        }

        let mut values = rows.iter().map(|&r| column.value(r)).filter(|v| !v.is_null());

        match self {
            AggregateOp::Count => Value::Int(values.count() as i64),
            AggregateOp::First => values.next().unwrap_or(Value::Null),
            AggregateOp::Last => values.last().unwrap_or(Value::Null),
            AggregateOp::NUnique => Value::Int(values.collect::<BTreeSet<_>>().len() as i64),
            numeric => {
                let data: Vec<f64> = values.filter_map(|v| v.as_f64()).collect();
                let stats = SummaryStats::from_data(&data);
                let result = match numeric {
                    AggregateOp::Sum => stats.sum,
                    AggregateOp::Mean => stats.mean,
                    AggregateOp::Min => stats.min,
                    AggregateOp::Max => stats.max,
                    AggregateOp::Median => stats.median,
                    AggregateOp::Std => stats.std_dev,
                    _ => stats.variance,
                };
                Value::from(result)
            }
        }
    }
}

/// Exact sum, min or max over integer rows
///
/// A sum that overflows `i64` is returned as a float.
fn reduce_ints(op: AggregateOp, data: &[i64], rows: &[usize]) -> Value {
    let ints: Vec<i64> = rows.iter().filter_map(|&r| data.get(r).copied()).collect();

    match op {
        AggregateOp::Min => ints.iter().min().map_or(Value::Null, |&x| Value::Int(x)),
        AggregateOp::Max => ints.iter().max().map_or(Value::Null, |&x| Value::Int(x)),
        _ => match ints.iter().try_fold(0_i64, |acc, &x| acc.checked_add(x)) {
            Some(total) => Value::Int(total),
            None => Value::Float(ints.iter().map(|&x| x as f64).sum()),
        },
    }
}

impl FromStr for AggregateOp {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregateOp::Sum),
            "mean" | "avg" | "average" => Ok(AggregateOp::Mean),
            "count" | "size" => Ok(AggregateOp::Count),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            "median" => Ok(AggregateOp::Median),
            "std" => Ok(AggregateOp::Std),
            "var" => Ok(AggregateOp::Var),
            "first" => Ok(AggregateOp::First),
            "last" => Ok(AggregateOp::Last),
            "nunique" => Ok(AggregateOp::NUnique),
            _ => Err(StatsError::UnknownAggregation(s.to_string())),
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `(column, metric, function)` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub column: String,
    pub metric: String,
    pub op: AggregateOp,
}

/// Which functions to apply to which columns, under which metric names
///
/// Entries keep insertion order; a `(column, metric)` pair may appear once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSpec {
    entries: Vec<MetricSpec>,
}

impl AggregationSpec {
    /// Create an empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a column → (metric name → function name) mapping
    pub fn from_mapping<C, M, S>(mapping: impl IntoIterator<Item = (C, M)>) -> StatsResult<Self>
    where
        C: AsRef<str>,
        M: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut spec = Self::new();
        for (column, metrics) in mapping {
            for (metric, func) in metrics {
                spec.add_named(column.as_ref(), metric.as_ref(), func.as_ref())?;
            }
        }
        Ok(spec)
    }

    /// Add an entry, builder style
    pub fn with(
        mut self,
        column: impl Into<String>,
        metric: impl Into<String>,
        op: AggregateOp,
    ) -> StatsResult<Self> {
        self.add(column, metric, op)?;
        Ok(self)
    }

    /// Add an entry whose function is given by name
    pub fn with_named(
        mut self,
        column: impl Into<String>,
        metric: impl Into<String>,
        func: &str,
    ) -> StatsResult<Self> {
        self.add_named(column, metric, func)?;
        Ok(self)
    }

    /// Add an entry
    pub fn add(
        &mut self,
        column: impl Into<String>,
        metric: impl Into<String>,
        op: AggregateOp,
    ) -> StatsResult<()> {
        let column = column.into();
        let metric = metric.into();

        if self.get(&column, &metric).is_some() {
            return Err(StatsError::DuplicateMetric { column, metric });
        }

        self.entries.push(MetricSpec { column, metric, op });
        Ok(())
    }

    /// Add an entry whose function is given by name
    pub fn add_named(
        &mut self,
        column: impl Into<String>,
        metric: impl Into<String>,
        func: &str,
    ) -> StatsResult<()> {
        let op = func.parse()?;
        self.add(column, metric, op)
    }

    /// Look up an entry
    pub fn get(&self, column: &str, metric: &str) -> Option<&MetricSpec> {
        self.entries
            .iter()
            .find(|e| e.column == column && e.metric == metric)
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[MetricSpec] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Values of one `(column, metric)` pair, one per group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricColumn {
    pub column: String,
    pub metric: String,
    pub op: AggregateOp,
    pub values: Vec<Value>,
}

/// Flat result of a grouped aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedFrame {
    /// Names of the group key columns
    pub key_columns: Vec<String>,
    /// Key tuple of each group, in group order
    pub keys: Vec<Vec<Value>>,
    /// One column per `(column, metric)` pair, in specification order
    pub columns: Vec<MetricColumn>,
}

impl AggregatedFrame {
    /// Number of groups (rows)
    pub fn num_groups(&self) -> usize {
        self.keys.len()
    }

    /// Look up a metric column
    pub fn get(&self, column: &str, metric: &str) -> Option<&MetricColumn> {
        self.columns
            .iter()
            .find(|c| c.column == column && c.metric == metric)
    }

    /// Row index of a group key
    pub fn group_index(&self, key: &[Value]) -> Option<usize> {
        self.keys.iter().position(|k| k.as_slice() == key)
    }

    /// Value of a metric for a group
    pub fn value(&self, key: &[Value], column: &str, metric: &str) -> Option<&Value> {
        let row = self.group_index(key)?;
        self.get(column, metric)?.values.get(row)
    }
}

/// Apply an aggregation specification to every group
///
/// All referenced columns are checked before any value is computed.
pub fn aggregate(grouped: &GroupedFrame<'_>, spec: &AggregationSpec) -> StatsResult<AggregatedFrame> {
    let mut inputs = Vec::with_capacity(spec.len());
    for entry in spec.entries() {
        let column = grouped.column(&entry.column)?;
        if !entry.op.accepts(column.dtype()) {
            return Err(StatsError::TypeMismatch {
                column: entry.column.clone(),
                expected: format!("numeric column for {}", entry.op),
                actual: column.dtype(),
            });
        }
        inputs.push((entry, column));
    }

    let mut columns = Vec::with_capacity(inputs.len());
    for (entry, column) in inputs {
        let values = grouped
            .groups()
            .iter()
            .map(|group| entry.op.apply(column, &group.rows))
            .collect();

        columns.push(MetricColumn {
            column: entry.column.clone(),
            metric: entry.metric.clone(),
            op: entry.op,
            values,
        });
    }

    tracing::debug!(
        groups = grouped.len(),
        metrics = columns.len(),
        "aggregated grouped frame"
    );

    Ok(AggregatedFrame {
        key_columns: grouped.key_columns().to_vec(),
        keys: grouped.groups().iter().map(|g| g.key.clone()).collect(),
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsight_frame::Frame;

    fn sales() -> Frame {
        Frame::new()
            .with_column("region", vec!["US", "EU", "US", "EU", "EU"])
            .and_then(|f| f.with_column("amount", vec![10.0, 20.0, 30.0, f64::NAN, 60.0]))
            .and_then(|f| f.with_column("units", vec![1_i64, 2, 3, 4, 5]))
            .and_then(|f| f.with_column("product", vec!["a", "b", "a", "c", "b"]))
            .unwrap()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("sum".parse::<AggregateOp>().unwrap(), AggregateOp::Sum);
        assert_eq!("AVG".parse::<AggregateOp>().unwrap(), AggregateOp::Mean);
        assert_eq!(" nunique ".parse::<AggregateOp>().unwrap(), AggregateOp::NUnique);
        assert_eq!(
            "mode".parse::<AggregateOp>().unwrap_err(),
            StatsError::UnknownAggregation("mode".to_string())
        );
        for op in AggregateOp::ALL {
            assert_eq!(op.name().parse::<AggregateOp>().unwrap(), op);
        }
    }

    #[test]
    fn test_duplicate_metric_rejected() {
        let err = AggregationSpec::new()
            .with("amount", "total", AggregateOp::Sum)
            .and_then(|s| s.with("amount", "total", AggregateOp::Mean))
            .unwrap_err();
        assert_eq!(
            err,
            StatsError::DuplicateMetric {
                column: "amount".to_string(),
                metric: "total".to_string(),
            }
        );
    }

    #[test]
    fn test_from_mapping() {
        let spec = AggregationSpec::from_mapping(vec![
            ("amount", vec![("total", "sum"), ("avg", "mean")]),
            ("units", vec![("n", "count")]),
        ])
        .unwrap();

        assert_eq!(spec.len(), 3);
        assert_eq!(spec.get("amount", "avg").map(|e| e.op), Some(AggregateOp::Mean));

        let err = AggregationSpec::from_mapping(vec![("amount", vec![("x", "bogus")])]).unwrap_err();
        assert_eq!(err, StatsError::UnknownAggregation("bogus".to_string()));
    }

    #[test]
    fn test_aggregate_per_group() {
        let frame = sales();
        let grouped = frame.group_by(&["region"]).unwrap();
        let spec = AggregationSpec::new()
            .with("amount", "total", AggregateOp::Sum)
            .and_then(|s| s.with("amount", "avg", AggregateOp::Mean))
            .and_then(|s| s.with("amount", "n", AggregateOp::Count))
            .and_then(|s| s.with("units", "max", AggregateOp::Max))
            .and_then(|s| s.with("product", "distinct", AggregateOp::NUnique))
            .unwrap();

        let result = aggregate(&grouped, &spec).unwrap();
        let eu = [Value::from("EU")];
        let us = [Value::from("US")];

        assert_eq!(result.num_groups(), 2);
        assert_eq!(result.key_columns, vec!["region".to_string()]);
        assert_eq!(result.value(&eu, "amount", "total"), Some(&Value::Float(80.0)));
        assert_eq!(result.value(&eu, "amount", "avg"), Some(&Value::Float(40.0)));
        assert_eq!(result.value(&eu, "amount", "n"), Some(&Value::Int(2)));
        assert_eq!(result.value(&us, "units", "max"), Some(&Value::Int(3)));
        assert_eq!(result.value(&eu, "product", "distinct"), Some(&Value::Int(2)));

        let order: Vec<&str> = result.columns.iter().map(|c| c.metric.as_str()).collect();
        assert_eq!(order, vec!["total", "avg", "n", "max", "distinct"]);
    }

    #[test]
    fn test_single_group_sum_round_trip() {
        let frame = Frame::new()
            .with_column("g", vec!["only"; 4])
            .and_then(|f| f.with_column("col", vec![1.5, 2.5, 3.0, 4.0]))
            .unwrap();
        let grouped = frame.group_by(&["g"]).unwrap();
        let spec = AggregationSpec::from_mapping(vec![("col", vec![("total", "sum")])]).unwrap();

        let result = aggregate(&grouped, &spec).unwrap();
        assert_eq!(result.get("col", "total").unwrap().values, vec![Value::Float(11.0)]);
    }

    #[test]
    fn test_integer_reductions_stay_exact() {
        let frame = Frame::new()
            .with_column("g", vec!["only"; 2])
            .and_then(|f| f.with_column("n", vec![9_007_199_254_740_993_i64, 0]))
            .unwrap();
        let grouped = frame.group_by(&["g"]).unwrap();
        let spec = AggregationSpec::from_mapping(vec![(
            "n",
            vec![("total", "sum"), ("low", "min"), ("high", "max"), ("avg", "mean")],
        )])
        .unwrap();

        let result = aggregate(&grouped, &spec).unwrap();
        let only = [Value::from("only")];
        assert_eq!(
            result.value(&only, "n", "total"),
            Some(&Value::Int(9_007_199_254_740_993))
        );
        assert_eq!(result.value(&only, "n", "low"), Some(&Value::Int(0)));
        assert_eq!(
            result.value(&only, "n", "high"),
            Some(&Value::Int(9_007_199_254_740_993))
        );
        assert!(matches!(result.value(&only, "n", "avg"), Some(Value::Float(_))));
    }

    #[test]
    fn test_integer_sum_overflow_falls_back_to_float() {
        let column = DataColumn::Int64(vec![i64::MAX, i64::MAX]);
        assert_eq!(
            AggregateOp::Sum.apply(&column, &[0, 1]),
            Value::Float(2.0 * i64::MAX as f64)
        );
        assert_eq!(AggregateOp::Sum.apply(&column, &[]), Value::Int(0));
        assert_eq!(AggregateOp::Min.apply(&column, &[]), Value::Null);
    }

    #[test]
    fn test_accepts() {
        assert!(AggregateOp::Sum.accepts(ColumnType::Int64));
        assert!(AggregateOp::Sum.accepts(ColumnType::Bool));
        assert!(!AggregateOp::Sum.accepts(ColumnType::String));
        assert!(AggregateOp::NUnique.accepts(ColumnType::String));
    }

    #[test]
    fn test_first_last_on_strings() {
        let frame = sales();
        let grouped = frame.group_by(&["region"]).unwrap();
        let spec = AggregationSpec::new()
            .with("product", "first", AggregateOp::First)
            .and_then(|s| s.with("product", "last", AggregateOp::Last))
            .unwrap();

        let result = aggregate(&grouped, &spec).unwrap();
        let eu = [Value::from("EU")];
        assert_eq!(result.value(&eu, "product", "first"), Some(&Value::from("b")));
        assert_eq!(result.value(&eu, "product", "last"), Some(&Value::from("b")));
    }

    #[test]
    fn test_aggregate_errors() {
        let frame = sales();
        let grouped = frame.group_by(&["region"]).unwrap();

        let missing = AggregationSpec::new()
            .with("amount", "total", AggregateOp::Sum)
            .and_then(|s| s.with("nope", "total", AggregateOp::Sum))
            .unwrap();
        assert_eq!(
            aggregate(&grouped, &missing).unwrap_err(),
            StatsError::ColumnNotFound("nope".to_string())
        );

        let strings = AggregationSpec::new()
            .with("product", "total", AggregateOp::Sum)
            .unwrap();
        assert!(matches!(
            aggregate(&grouped, &strings),
            Err(StatsError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_group_values() {
        let column = DataColumn::Float64(vec![f64::NAN]);
        assert_eq!(AggregateOp::Sum.apply(&column, &[0]), Value::Float(0.0));
        assert_eq!(AggregateOp::Mean.apply(&column, &[0]), Value::Null);
        assert_eq!(AggregateOp::Count.apply(&column, &[0]), Value::Int(0));
        assert_eq!(AggregateOp::First.apply(&column, &[0]), Value::Null);
    }

    #[test]
    fn test_booleans_count_as_numbers() {
        let column = DataColumn::Bool(vec![true, false, true]);
        assert_eq!(AggregateOp::Sum.apply(&column, &[0, 1, 2]), Value::Float(2.0));
    }
}
