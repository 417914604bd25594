//! Chart Dispatch
//! Resolves a declarative `ChartDescriptor` into a `ChartPlan`: the concrete
//! chart type with its series, values and colors already decided.
//! Descriptors that cannot be drawn resolve to `None` and are skipped.

use super::descriptor::{ChartDescriptor, ChartKind, Row, SeriesSpec};
use egui::Color32;
use serde_json::Value;

/// Shared series palette, cycled by series index (bar/line) or row index (pie).
pub const PALETTE: [Color32; 9] = [
    Color32::from_rgb(0x88, 0x84, 0xd8), // Lavender
    Color32::from_rgb(0x82, 0xca, 0x9d), // Green
    Color32::from_rgb(0xff, 0xc6, 0x58), // Yellow
    Color32::from_rgb(0xff, 0x73, 0x00), // Orange
    Color32::from_rgb(0xff, 0x00, 0x00), // Red
    Color32::from_rgb(0x00, 0x88, 0xfe), // Blue
    Color32::from_rgb(0x00, 0xc4, 0x9f), // Teal
    Color32::from_rgb(0xff, 0xbb, 0x28), // Amber
    Color32::from_rgb(0xff, 0x80, 0x42), // Coral
];

const DEFAULT_PIE_VALUE_KEY: &str = "value";
const DEFAULT_PIE_LABEL_KEY: &str = "name";

pub fn palette_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// One drawable series of a bar or line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub key: String,
    pub name: String,
    pub color: Color32,
    /// One value per data row; `None` where the row lacks a numeric value.
    pub values: Vec<Option<f64>>,
}

/// Bar and line charts share the same category-axis layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianPlan {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Category label per data row.
    pub categories: Vec<String>,
    pub series: Vec<PlotSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiePlan {
    pub title: String,
    pub value_key: String,
    pub label_key: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlan {
    pub title: String,
    pub name: String,
    pub x_key: String,
    pub y_key: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// A descriptor resolved to one concrete renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPlan {
    Bar(CartesianPlan),
    Line(CartesianPlan),
    Pie(PiePlan),
    Scatter(ScatterPlan),
}

impl ChartPlan {
    pub fn title(&self) -> &str {
        match self {
            ChartPlan::Bar(plan) | ChartPlan::Line(plan) => &plan.title,
            ChartPlan::Pie(plan) => &plan.title,
            ChartPlan::Scatter(plan) => &plan.title,
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartPlan::Bar(_) => ChartKind::Bar,
            ChartPlan::Line(_) => ChartKind::Line,
            ChartPlan::Pie(_) => ChartKind::Pie,
            ChartPlan::Scatter(_) => ChartKind::Scatter,
        }
    }
}

/// Resolve a descriptor. Missing config/data or an unknown type yields `None`.
pub fn dispatch(descriptor: &ChartDescriptor) -> Option<ChartPlan> {
    let config = descriptor.chart_config.as_ref()?;
    let rows = descriptor.data.as_ref()?;
    let series = config.series();
    let x_axis = config.x_axis.as_ref();
    let x_label = x_axis.and_then(|axis| axis.label.clone());
    let y_label = config.y_axis.as_ref().and_then(|axis| axis.label.clone());
    let title = |fallback: &str| {
        config
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };

    match config.kind {
        ChartKind::Bar | ChartKind::Line => {
            let is_bar = config.kind == ChartKind::Bar;
            let categories = rows
                .iter()
                .enumerate()
                .map(|(i, row)| match x_axis {
                    Some(axis) => cell_label(row, &axis.data_key),
                    None => i.to_string(),
                })
                .collect();
            let series = series
                .iter()
                .enumerate()
                .map(|(i, spec)| PlotSeries {
                    key: spec.data_key.clone(),
                    name: spec.display_name().to_string(),
                    color: series_color(spec, i, is_bar),
                    values: rows.iter().map(|row| cell_number(row, &spec.data_key)).collect(),
                })
                .collect();

            let plan = CartesianPlan {
                title: title(if is_bar { "Bar Chart" } else { "Line Chart" }),
                x_label,
                y_label,
                categories,
                series,
            };
            Some(if is_bar {
                ChartPlan::Bar(plan)
            } else {
                ChartPlan::Line(plan)
            })
        }
        ChartKind::Pie => {
            let value_key = series
                .first()
                .map(|s| s.data_key.clone())
                .unwrap_or_else(|| DEFAULT_PIE_VALUE_KEY.to_string());
            let label_key = x_axis
                .map(|axis| axis.data_key.clone())
                .unwrap_or_else(|| DEFAULT_PIE_LABEL_KEY.to_string());
            let slices = rows
                .iter()
                .enumerate()
                .map(|(i, row)| PieSlice {
                    label: cell_label(row, &label_key),
                    value: cell_number(row, &value_key).unwrap_or(0.0),
                    color: palette_color(i),
                })
                .collect();

            Some(ChartPlan::Pie(PiePlan {
                title: title("Pie Chart"),
                value_key,
                label_key,
                slices,
            }))
        }
        ChartKind::Scatter => {
            // Only the first series is plotted.
            let first = series.first()?;
            let x_key = x_axis?.data_key.clone();
            let points = rows
                .iter()
                .filter_map(|row| {
                    Some([cell_number(row, &x_key)?, cell_number(row, &first.data_key)?])
                })
                .collect();

            Some(ChartPlan::Scatter(ScatterPlan {
                title: title("Scatter Chart"),
                name: first.display_name().to_string(),
                x_key,
                y_key: first.data_key.clone(),
                x_label,
                y_label,
                color: first
                    .stroke
                    .as_deref()
                    .and_then(parse_hex_color)
                    .unwrap_or(PALETTE[0]),
                points,
            }))
        }
        ChartKind::Unknown => None,
    }
}

/// Resolve every descriptor, silently dropping the ones that cannot be drawn.
pub fn dispatch_all(descriptors: &[ChartDescriptor]) -> Vec<ChartPlan> {
    descriptors.iter().filter_map(dispatch).collect()
}

/// Bars prefer `fill` then `stroke`; lines only look at `stroke`.
fn series_color(spec: &SeriesSpec, index: usize, is_bar: bool) -> Color32 {
    let explicit = if is_bar {
        spec.fill.as_deref().or(spec.stroke.as_deref())
    } else {
        spec.stroke.as_deref()
    };
    explicit
        .and_then(parse_hex_color)
        .unwrap_or_else(|| palette_color(index))
}

/// Parse `#rgb` or `#rrggbb`.
pub fn parse_hex_color(text: &str) -> Option<Color32> {
    let hex = text.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |s: &str| channel(s).map(|v| v * 17);
            Some(Color32::from_rgb(
                expand(&hex[0..1])?,
                expand(&hex[1..2])?,
                expand(&hex[2..3])?,
            ))
        }
        _ => None,
    }
}

fn cell_number(row: &Row, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn cell_label(row: &Row, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
