//! Value axes for the dual-axis chart
//!
//! Provides tick mark calculation and label formatting for the rate axis
//! (left) and the count axis (right).

use serde::{Deserialize, Serialize};

/// Side of the plot a value axis is drawn on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPosition {
    /// Flag rate
    Left,
    /// Observation count
    Right,
}

/// Configuration for a value axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Axis position
    pub position: AxisPosition,

    /// Data range
    pub min: f64,
    pub max: f64,

    /// Label for the axis
    pub label: Option<String>,

    /// Number format: ".Nf" for fixed decimals, "%" for percentages
    pub format: Option<String>,

    /// Tick mark length in pixels
    pub tick_length: f32,
}

impl AxisConfig {
    /// Create a new axis configuration
    pub fn new(position: AxisPosition, min: f64, max: f64) -> Self {
        Self {
            position,
            min,
            max,
            label: None,
            format: None,
            tick_length: 5.0,
        }
    }

    /// Axis from zero up to a rounded value above `data_max`
    ///
    /// Leaves headroom for point and bar annotations.
    pub fn from_zero(position: AxisPosition, data_max: f64) -> Self {
        let top = if data_max.is_finite() && data_max > 0.0 {
            nice_ceil(data_max * 1.15)
        } else {
            1.0
        };
        Self::new(position, 0.0, top)
    }

    /// Set the axis label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set number format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Map a data value to 0.0 (min) .. 1.0 (max)
    pub fn normalize(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::new(AxisPosition::Left, 0.0, 1.0)
    }
}

/// A tick mark on an axis
#[derive(Clone, Debug, PartialEq)]
pub struct TickMark {
    /// Position in data coordinates
    pub value: f64,

    /// Position in normalized coordinates (0.0 to 1.0)
    pub normalized: f64,

    /// Label text
    pub label: String,
}

/// Calculate major tick marks for a linear axis
pub fn calculate_ticks(config: &AxisConfig) -> Vec<TickMark> {
    let range = config.max - config.min;
    if !(range > 0.0) {
        return vec![];
    }

    let step = nice_step(range / 5.0);
    let start = (config.min / step).ceil() * step;

    let mut ticks = Vec::new();
    let mut i = 0;
    loop {
        let value = start + step * i as f64;
        if value > config.max + step * 0.001 {
            break;
        }
        let normalized = config.normalize(value);
        ticks.push(TickMark {
            value,
            normalized: normalized.clamp(0.0, 1.0),
            label: format_number(value, config.format.as_deref()),
        });
        i += 1;
    }

    ticks
}

/// Round a rough step to 1, 2 or 5 times a power of ten
fn nice_step(rough_step: f64) -> f64 {
    let magnitude = 10.0_f64.powf(rough_step.abs().log10().floor());
    let residual = rough_step / magnitude;

    if residual <= 1.5 {
        magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    }
}

/// Smallest multiple of a nice step that is >= value
fn nice_ceil(value: f64) -> f64 {
    let step = nice_step(value / 5.0);
    (value / step).ceil() * step
}

/// Format a number for display
pub fn format_number(value: f64, format: Option<&str>) -> String {
    match format {
        Some("%") => format!("{:.0}%", value * 100.0),
        Some(fmt) if fmt.contains('.') => {
            let precision: usize = fmt
                .chars()
                .skip_while(|c| *c != '.')
                .skip(1)
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
                .parse()
                .unwrap_or(2);
            format!("{:.prec$}", value, prec = precision)
        }
        _ => {
            // Auto format
            if value == 0.0 {
                "0".to_string()
            } else if value.abs() >= 1e6 || value.abs() < 0.01 {
                format!("{:.2e}", value)
            } else if value.fract().abs() < 1e-10 {
                format!("{:.0}", value)
            } else {
                format!("{:.2}", value)
            }
        }
    }
}

/// Format an integer with thousands separators, e.g. `12,345`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a rate in [0, 1] as a percentage, e.g. `12.50%`
pub fn format_percent(rate: f64, decimals: usize) -> String {
    format!("{:.prec$}%", rate * 100.0, prec = decimals)
}
