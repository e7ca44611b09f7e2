//! Plain-text tables rendered with comfy-table
//!
//! Formatting never changes the computed values; it only decides how many
//! decimals are shown.

use comfy_table::presets::NOTHING;
use comfy_table::{CellAlignment, Table};
use imsight_frame::Value;
use imsight_stats::{AggregatedFrame, BinSummary};

use crate::axis::format_percent;
use crate::config::PresentationConfig;

/// Borderless table, with every column after the first `left` right-aligned
fn new_table(header: Vec<String>, columns: usize, left: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING).set_header(header);
    for i in left..columns {
        if let Some(column) = table.column_mut(i) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// Table text with trailing padding and blank separator lines removed
fn finish(table: &Table) -> String {
    let mut out = String::new();
    for line in table.to_string().lines() {
        let line = line.trim_end();
        if !line.is_empty() {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Format summary rows as a table: interval, flag rate, positives, count
///
/// One line per row, in the order given.
pub fn format_summary_table(rows: &[BinSummary], config: &PresentationConfig) -> String {
    let header = ["interval", "% flag", "n1", "n"].map(String::from).to_vec();
    let mut table = new_table(header, 4, 1);

    for row in rows {
        table.add_row(vec![
            row.label.clone(),
            row.rate
                .map(|r| format_percent(r, config.rate_decimals))
                .unwrap_or_else(|| "NaN".to_string()),
            row.positives.to_string(),
            row.count.to_string(),
        ]);
    }

    finish(&table)
}

/// Format an aggregation result as a table
///
/// The two header lines hold the source column and the metric name of every
/// result column; floats are shown with `config.float_decimals` decimals.
pub fn format_aggregate_table(result: &AggregatedFrame, config: &PresentationConfig) -> String {
    let keys = result.key_columns.len();

    // Key columns get an empty second header line
    let mut header: Vec<String> = result.key_columns.iter().map(|k| format!("{k}\n")).collect();
    header.extend(
        result
            .columns
            .iter()
            .map(|c| format!("{}\n{}", c.column, c.metric)),
    );
    let mut table = new_table(header, keys + result.columns.len(), keys);

    for (row, key) in result.keys.iter().enumerate() {
        let mut line: Vec<String> = key.iter().map(|v| v.to_string()).collect();
        for column in &result.columns {
            let value = column.values.get(row).unwrap_or(&Value::Null);
            line.push(format_value(value, config.float_decimals));
        }
        table.add_row(line);
    }

    finish(&table)
}

/// Display a cell value with a fixed number of decimals for floats
pub fn format_value(value: &Value, float_decimals: usize) -> String {
    match value {
        Value::Null => "NaN".to_string(),
        Value::Float(x) => format!("{:.prec$}", x, prec = float_decimals),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsight_frame::Frame;
    use imsight_stats::{aggregate, summarize, AggregateOp, AggregationSpec};

    #[test]
    fn test_summary_table_layout() {
        let frame = Frame::new()
            .with_column("x", (1..=10).map(|v| v as f64).collect::<Vec<_>>())
            .and_then(|f| f.with_column("flag", (1..=10).map(|v| v > 5).collect::<Vec<_>>()))
            .unwrap();
        let rows = summarize(&frame, "x", "flag", 2).unwrap();

        let text = format_summary_table(&rows, &PresentationConfig::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("interval"));
        assert!(lines[1].trim_start().starts_with("[1.00, 5.50)"));
        let first: Vec<&str> = lines[1].split_whitespace().collect();
        assert_eq!(&first[2..], &["0.00%", "0", "5"]);
        let second: Vec<&str> = lines[2].split_whitespace().collect();
        assert_eq!(&second[2..], &["100.00%", "5", "5"]);
    }

    #[test]
    fn test_aggregate_table_zero_decimals() {
        let frame = Frame::new()
            .with_column("region", vec!["EU", "US", "EU"])
            .and_then(|f| f.with_column("amount", vec![10.4, 20.0, 5.3]))
            .unwrap();
        let grouped = frame.group_by(&["region"]).unwrap();
        let spec = AggregationSpec::new()
            .with("amount", "total", AggregateOp::Sum)
            .unwrap();
        let result = aggregate(&grouped, &spec).unwrap();

        let text = format_aggregate_table(&result, &PresentationConfig::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), vec!["region", "amount"]);
        assert_eq!(lines[1].trim(), "total");
        assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), vec!["EU", "16"]);
        assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(), vec!["US", "20"]);

        // The computed value itself is untouched
        assert_eq!(result.columns[0].values[0], Value::Float(10.4 + 5.3));
    }

    #[test]
    fn test_missing_rate_shows_nan() {
        let frame = Frame::new()
            .with_column("x", vec![0.5, 1.5])
            .and_then(|f| f.with_column("flag", vec![f64::NAN, 1.0]))
            .unwrap();
        let rows = summarize(&frame, "x", "flag", vec![0.0, 1.0, 2.0]).unwrap();

        let text = format_summary_table(&rows, &PresentationConfig::default());
        let last: Vec<&str> = text.lines().last().unwrap().split_whitespace().collect();
        assert_eq!(&last[2..], &["NaN", "0", "0"]);
        assert!(text.lines().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn test_empty_summary_has_header_only() {
        let text = format_summary_table(&[], &PresentationConfig::default());
        assert_eq!(text.lines().count(), 1);
        assert_eq!(
            text.split_whitespace().collect::<Vec<_>>(),
            vec!["interval", "%", "flag", "n1", "n"]
        );
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&Value::Float(2.5), 1), "2.5");
        assert_eq!(format_value(&Value::Int(3), 0), "3");
        assert_eq!(format_value(&Value::Null, 0), "NaN");
        assert_eq!(format_value(&Value::from("a"), 0), "a");
    }
}
