//! CSV and JSON export of computed results
//!
//! Exports carry full-precision values; display rounding is a table concern.

use imsight_frame::Value;
use imsight_stats::{AggregatedFrame, BinSummary};
use serde::Serialize;

use crate::error::RenderResult;

/// Flat CSV record for one summary row
#[derive(Serialize)]
struct SummaryRecord<'a> {
    interval: &'a str,
    lower: f64,
    upper: f64,
    rate: Option<f64>,
    positives: usize,
    count: usize,
}

impl<'a> From<&'a BinSummary> for SummaryRecord<'a> {
    fn from(row: &'a BinSummary) -> Self {
        Self {
            interval: &row.label,
            lower: row.interval.lower,
            upper: row.interval.upper,
            rate: row.rate,
            positives: row.positives,
            count: row.count,
        }
    }
}

/// Export summary rows as CSV with a header line
///
/// An undefined rate is written as an empty field.
pub fn summary_to_csv(rows: &[BinSummary]) -> RenderResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(["interval", "lower", "upper", "rate", "positives", "count"])?;
    }
    for row in rows {
        writer.serialize(SummaryRecord::from(row))?;
    }
    finish(writer)
}

/// Export summary rows as a JSON array
pub fn summary_to_json(rows: &[BinSummary]) -> RenderResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Export an aggregation result as CSV
///
/// Result columns are headed `column:metric`; missing values are empty.
pub fn aggregate_to_csv(result: &AggregatedFrame) -> RenderResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = result.key_columns.clone();
    header.extend(
        result
            .columns
            .iter()
            .map(|c| format!("{}:{}", c.column, c.metric)),
    );
    writer.write_record(&header)?;

    for (row, key) in result.keys.iter().enumerate() {
        let mut record: Vec<String> = key.iter().map(Value::to_string).collect();
        for column in &result.columns {
            record.push(column.values.get(row).map(Value::to_string).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> RenderResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsight_frame::Frame;
    use imsight_stats::{aggregate, summarize, AggregateOp, AggregationSpec};

    fn ten_rows() -> Frame {
        Frame::new()
            .with_column("x", (1..=10).map(|v| v as f64).collect::<Vec<_>>())
            .and_then(|f| f.with_column("flag", (1..=10).map(|v| v > 5).collect::<Vec<_>>()))
            .unwrap()
    }

    #[test]
    fn test_summary_csv() {
        let rows = summarize(&ten_rows(), "x", "flag", 2).unwrap();
        let text = summary_to_csv(&rows).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "interval,lower,upper,rate,positives,count");
        assert_eq!(lines[1], "\"[1.00, 5.50)\",1.0,5.5,0.0,0,5");
        assert_eq!(lines[2], "\"[5.50, 10.00]\",5.5,10.0,1.0,5,5");
    }

    #[test]
    fn test_empty_summary_csv_has_header() {
        let text = summary_to_csv(&[]).unwrap();
        assert_eq!(text.trim_end(), "interval,lower,upper,rate,positives,count");
    }

    #[test]
    fn test_summary_json() {
        let rows = summarize(&ten_rows(), "x", "flag", 2).unwrap();
        let json = summary_to_json(&rows).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["label"], "[5.50, 10.00]");
        assert_eq!(parsed[1]["positives"], 5);
    }

    #[test]
    fn test_aggregate_csv() {
        let frame = Frame::new()
            .with_column("region", vec!["EU", "US", "EU"])
            .and_then(|f| f.with_column("amount", vec![10.0, 20.0, 5.0]))
            .unwrap();
        let grouped = frame.group_by(&["region"]).unwrap();
        let spec = AggregationSpec::new()
            .with("amount", "total", AggregateOp::Sum)
            .and_then(|s| s.with("amount", "rows", AggregateOp::Count))
            .unwrap();
        let result = aggregate(&grouped, &spec).unwrap();

        let text = aggregate_to_csv(&result).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["region,amount:total,amount:rows", "EU,15,2", "US,20,1"]);
    }
}
