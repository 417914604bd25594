//! Charts module - Chart descriptors, dispatch and rendering

mod descriptor;
mod dispatch;
mod plotter;
mod renderer;

pub use descriptor::{ChartConfig, ChartDescriptor, ChartKind, Row, SeriesSpec};
pub use dispatch::{dispatch, dispatch_all, CartesianPlan, ChartPlan, PiePlan, ScatterPlan};
pub use plotter::ChartPlotter;
pub use renderer::{StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
