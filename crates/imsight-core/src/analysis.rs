//! Univariate flag-rate analysis
//!
//! [`UnivariateAnalysis`] bins a feature, computes the flag rate per interval
//! and hands the rows to the table and chart renderers. Each stage can also be
//! called on its own; computing never triggers rendering.

use std::io::Write;

use imsight_frame::Frame;
use imsight_render::{
    format_summary_table, render_chart, summary_to_csv, summary_to_json, Chart,
    PresentationConfig,
};
use imsight_stats::{BinSpec, BinSummary, RateSummarizer, SummaryOrder, DEFAULT_PRECISION};

use crate::error::ImsightResult;

/// Options for analysing one feature against one binary flag
#[derive(Clone, Debug, PartialEq)]
pub struct UnivariateAnalysis {
    /// Feature column to bin
    pub feature: String,

    /// Binary outcome column
    pub flag: String,

    /// Number of equal-width bins or explicit edges
    pub bins: BinSpec,

    /// Decimals in interval labels
    pub precision: usize,

    /// Whether `run_to` prints the table
    pub detail: bool,

    /// Row order of the result
    pub order: SummaryOrder,

    /// Table and chart settings
    pub presentation: PresentationConfig,
}

impl UnivariateAnalysis {
    /// Create an analysis with default precision, detail on and rate ordering
    pub fn new(
        feature: impl Into<String>,
        flag: impl Into<String>,
        bins: impl Into<BinSpec>,
    ) -> Self {
        Self {
            feature: feature.into(),
            flag: flag.into(),
            bins: bins.into(),
            precision: DEFAULT_PRECISION,
            detail: true,
            order: SummaryOrder::default(),
            presentation: PresentationConfig::default(),
        }
    }

    /// Set the number of decimals in interval labels
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set whether the table is built and printed
    pub fn with_detail(mut self, detail: bool) -> Self {
        self.detail = detail;
        self
    }

    /// Set the row order
    pub fn with_order(mut self, order: SummaryOrder) -> Self {
        self.order = order;
        self
    }

    /// Set table and chart settings
    pub fn with_presentation(mut self, presentation: PresentationConfig) -> Self {
        self.presentation = presentation;
        self
    }

    /// Chart title: the configured title, else the feature name
    pub fn title(&self) -> &str {
        self.presentation.title.as_deref().unwrap_or(&self.feature)
    }

    fn summarizer(&self) -> RateSummarizer {
        RateSummarizer::new(self.bins.clone())
            .with_precision(self.precision)
            .with_order(self.order)
    }

    /// Compute the summary rows without rendering anything
    pub fn summarize(&self, frame: &Frame) -> ImsightResult<Vec<BinSummary>> {
        Ok(self.summarizer().summarize(frame, &self.feature, &self.flag)?)
    }

    /// Render rows as a text table
    pub fn format_table(&self, rows: &[BinSummary]) -> String {
        format_summary_table(rows, &self.presentation)
    }

    /// Render rows as a dual-axis chart
    pub fn render_chart(&self, rows: &[BinSummary]) -> ImsightResult<Chart> {
        Ok(render_chart(rows, self.title(), &self.presentation)?)
    }

    /// Compute the rows, then build the table (when `detail` is set) and the chart
    pub fn run(&self, frame: &Frame) -> ImsightResult<AnalysisReport> {
        let rows = self.summarize(frame)?;

        if rows.is_empty() {
            tracing::warn!(
                feature = %self.feature,
                "no row fell into any interval"
            );
        }

        let table = self.detail.then(|| self.format_table(&rows));
        let chart = self.render_chart(&rows)?;

        tracing::info!(
            feature = %self.feature,
            flag = %self.flag,
            bins = rows.len(),
            "univariate analysis complete"
        );

        Ok(AnalysisReport {
            feature: self.feature.clone(),
            rows,
            table,
            chart,
        })
    }

    /// Like [`run`](Self::run), also writing the table to `out` when `detail` is set
    pub fn run_to<W: Write>(&self, frame: &Frame, out: &mut W) -> ImsightResult<AnalysisReport> {
        let report = self.run(frame)?;
        if let Some(table) = &report.table {
            out.write_all(table.as_bytes())?;
            out.flush()?;
        }
        Ok(report)
    }
}

/// Output of a univariate analysis
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisReport {
    /// Analysed feature
    pub feature: String,

    /// Summary rows in result order
    pub rows: Vec<BinSummary>,

    /// Text table, present when detail was requested
    pub table: Option<String>,

    /// Dual-axis chart
    pub chart: Chart,
}

impl AnalysisReport {
    /// Whether no interval received a row
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as CSV
    pub fn to_csv(&self) -> ImsightResult<String> {
        Ok(summary_to_csv(&self.rows)?)
    }

    /// Rows as a JSON array
    pub fn to_json(&self) -> ImsightResult<String> {
        Ok(summary_to_json(&self.rows)?)
    }
}

/// Run an analysis with default options
pub fn univariate_analysis(
    frame: &Frame,
    feature: &str,
    flag: &str,
    bins: impl Into<BinSpec>,
) -> ImsightResult<AnalysisReport> {
    UnivariateAnalysis::new(feature, flag, bins).run(frame)
}
