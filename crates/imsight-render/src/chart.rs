//! Dual-axis flag-rate chart
//!
//! One categorical x position per summary row. The left axis carries the flag
//! rate as a connected point plot, each point annotated with its percentage;
//! the right axis carries the row count as translucent bars annotated with the
//! count. Output is a standalone SVG document.

use std::path::Path;

use imsight_stats::BinSummary;

use crate::axis::{
    calculate_ticks, format_percent, group_thousands, AxisConfig, AxisPosition,
};
use crate::config::PresentationConfig;
use crate::error::{RenderError, RenderResult};

/// Margin around the plot area (left, bottom, right, top)
const MARGIN: [f32; 4] = [80.0, 70.0, 80.0, 60.0];

/// Fraction of a slot taken by a bar
const BAR_WIDTH: f32 = 0.8;

/// A rendered chart
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    /// SVG document
    pub svg: String,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl Chart {
    /// Write the SVG document to a file
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.svg).map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Saved chart to {:?}", path);
        Ok(())
    }
}

/// Plot area in pixels
#[derive(Clone, Copy, Debug)]
struct PlotArea {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl PlotArea {
    fn new(width: u32, height: u32) -> Self {
        Self {
            x: MARGIN[0],
            y: MARGIN[3],
            width: (width as f32 - MARGIN[0] - MARGIN[2]).max(1.0),
            height: (height as f32 - MARGIN[1] - MARGIN[3]).max(1.0),
        }
    }

    fn bottom(&self) -> f32 {
        self.y + self.height
    }

    fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Pixel row of a normalized value (0 at the bottom, 1 at the top)
    fn y_of(&self, normalized: f64) -> f32 {
        self.bottom() - normalized as f32 * self.height
    }

    /// Pixel column of the center of slot `i` out of `n`
    fn x_of(&self, i: usize, n: usize) -> f32 {
        self.x + (i as f32 + 0.5) * self.slot(n)
    }

    fn slot(&self, n: usize) -> f32 {
        self.width / n.max(1) as f32
    }
}

/// Render summary rows as a dual-axis SVG chart
///
/// Rows are drawn in the order given. Rows with an undefined rate get a bar
/// but no point and no percentage annotation.
pub fn render_chart(
    rows: &[BinSummary],
    title: &str,
    config: &PresentationConfig,
) -> RenderResult<Chart> {
    config.validate()?;

    let area = PlotArea::new(config.width, config.height);
    let n = rows.len();
    let font = config.font_size;

    let max_rate = rows
        .iter()
        .filter_map(|r| r.rate)
        .fold(0.0_f64, f64::max);
    let max_count = rows.iter().map(|r| r.count).max().unwrap_or(0);

    let rate_axis = AxisConfig::from_zero(AxisPosition::Left, max_rate)
        .with_label("% flag")
        .with_format("%");
    let count_axis =
        AxisConfig::from_zero(AxisPosition::Right, max_count as f64).with_label("# obs");

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = config.width,
        h = config.height
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));
    svg.push('\n');

    // Title
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="{}" text-anchor="middle">{}</text>"#,
        area.x + area.width / 2.0,
        area.y / 2.0,
        font + 4,
        escape_xml(title)
    ));
    svg.push('\n');

    // Axis 2: count bars, drawn first so the rate line stays on top
    let bar_width = area.slot(n) * BAR_WIDTH;
    for (i, row) in rows.iter().enumerate() {
        let cx = area.x_of(i, n);
        let top = area.y_of(count_axis.normalize(row.count as f64));
        svg.push_str(&format!(
            r#"<rect class="bar" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="{}"/>"#,
            cx - bar_width / 2.0,
            top,
            bar_width,
            area.bottom() - top,
            config.bar_color,
            config.bar_opacity
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text class="count-label" x="{:.1}" y="{:.1}" font-size="{}" fill="{}" fill-opacity="0.5" text-anchor="middle">{}</text>"#,
            cx,
            top - 4.0,
            font,
            config.bar_color,
            group_thousands(row.count)
        ));
        svg.push('\n');
    }

    // Axis 1: connected rate points
    let points: Vec<(f32, f32, f64)> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            row.rate
                .map(|rate| (area.x_of(i, n), area.y_of(rate_axis.normalize(rate)), rate))
        })
        .collect();

    if points.len() > 1 {
        let path: Vec<String> = points
            .iter()
            .map(|(x, y, _)| format!("{:.1},{:.1}", x, y))
            .collect();
        svg.push_str(&format!(
            r#"<polyline class="rate-line" points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            path.join(" "),
            config.line_color
        ));
        svg.push('\n');
    }

    for (x, y, rate) in &points {
        svg.push_str(&format!(
            r#"<circle class="rate-point" cx="{:.1}" cy="{:.1}" r="{}" fill="{}"/>"#,
            x, y, config.marker_radius, config.line_color
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text class="rate-label" x="{:.1}" y="{:.1}" font-size="{}">{}</text>"#,
            x + config.marker_radius,
            y - config.marker_radius - 4.0,
            font,
            format_percent(*rate, config.rate_decimals)
        ));
        svg.push('\n');
    }

    // Frame and value axes
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
        area.x, area.y, area.width, area.height
    ));
    svg.push('\n');
    push_value_axis(&mut svg, &area, &rate_axis, "black", font);
    push_value_axis(&mut svg, &area, &count_axis, &config.bar_color, font);

    // Shared categorical x axis
    for (i, row) in rows.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text class="x-tick" x="{:.1}" y="{:.1}" font-size="{}" text-anchor="middle">{}</text>"#,
            area.x_of(i, n),
            area.bottom() + font as f32 + 6.0,
            font,
            escape_xml(&row.label)
        ));
        svg.push('\n');
    }
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="{}" text-anchor="middle">bins</text>"#,
        area.x + area.width / 2.0,
        area.bottom() + 2.0 * font as f32 + 20.0,
        font
    ));
    svg.push('\n');
    svg.push_str("</svg>\n");

    tracing::debug!(
        bins = n,
        width = config.width,
        height = config.height,
        "rendered flag-rate chart"
    );

    Ok(Chart {
        svg,
        width: config.width,
        height: config.height,
    })
}

fn push_value_axis(svg: &mut String, area: &PlotArea, axis: &AxisConfig, color: &str, font: u32) {
    let (x, dir, anchor) = match axis.position {
        AxisPosition::Right => (area.right(), 1.0, "start"),
        AxisPosition::Left => (area.x, -1.0, "end"),
    };

    for tick in calculate_ticks(axis) {
        let y = area.y_of(tick.normalized);
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}"/>"#,
            x,
            y,
            x + dir * axis.tick_length,
            y,
            color
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{}" fill="{}" text-anchor="{}">{}</text>"#,
            x + dir * (axis.tick_length + 3.0),
            y + font as f32 / 3.0,
            font,
            color,
            anchor,
            tick.label
        ));
        svg.push('\n');
    }

    if let Some(label) = &axis.label {
        let lx = x + dir * (MARGIN[0] - 15.0);
        let ly = area.y + area.height / 2.0;
        svg.push_str(&format!(
            r#"<text x="{lx:.1}" y="{ly:.1}" font-size="{}" fill="{}" text-anchor="middle" transform="rotate(-90 {lx:.1} {ly:.1})">{}</text>"#,
            font,
            color,
            escape_xml(label),
        ));
        svg.push('\n');
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
