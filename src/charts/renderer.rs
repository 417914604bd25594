//! Static Chart Renderer
//! Writes a resolved chart plan to a PNG file with plotters.
//!
//! Layout mirrors the interactive view: caption on top, legend in the
//! upper right for bar/line charts, slice labels around pies.

use crate::charts::{CartesianPlan, ChartPlan, ChartPlotter, PiePlan, ScatterPlan};
use anyhow::Result;
use egui::Color32;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

pub const EXPORT_WIDTH: u32 = 1200;
pub const EXPORT_HEIGHT: u32 = 800;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart plan to `path` as PNG.
    pub fn render_png(plan: &ChartPlan, path: &Path, width: u32, height: u32) -> Result<()> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        match plan {
            ChartPlan::Bar(cartesian) => Self::render_cartesian(&root, cartesian, true)?,
            ChartPlan::Line(cartesian) => Self::render_cartesian(&root, cartesian, false)?,
            ChartPlan::Pie(pie) => Self::render_pie(&root, pie)?,
            ChartPlan::Scatter(scatter) => Self::render_scatter(&root, scatter)?,
        }

        root.present()?;
        Ok(())
    }

    /// File name for an exported chart, derived from its title.
    pub fn export_path(dir: &Path, title: &str, index: usize) -> PathBuf {
        let slug: String = title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let slug = slug.trim_matches('_');
        let slug = if slug.is_empty() { "chart" } else { slug };
        dir.join(format!("{:02}_{}.png", index + 1, slug))
    }

    fn render_cartesian(
        root: &DrawingArea<BitMapBackend, Shift>,
        plan: &CartesianPlan,
        bars: bool,
    ) -> Result<()> {
        let n = plan.categories.len().max(1);
        let values = || plan.series.iter().flat_map(|s| s.values.iter().flatten().copied());
        let y_max = values().fold(0.0_f64, f64::max);
        let y_min = values().fold(0.0_f64, f64::min);
        let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

        let mut chart = ChartBuilder::on(root)
            .caption(&plan.title, ("sans-serif", 32).into_font())
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min * 1.1..y_top)?;

        let x_format = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() < 1e-6 && idx >= 0.0 {
                plan.categories.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        };
        chart
            .configure_mesh()
            .x_labels(n)
            .x_label_formatter(&x_format)
            .x_desc(plan.x_label.clone().unwrap_or_default())
            .y_desc(plan.y_label.clone().unwrap_or_default())
            .draw()?;

        let series_count = plan.series.len().max(1) as f64;
        let bar_width = 0.8 / series_count;

        for (s_idx, series) in plan.series.iter().enumerate() {
            let color = to_rgb(series.color);
            if bars {
                let offset = -0.4 + bar_width * s_idx as f64;
                chart
                    .draw_series(series.values.iter().enumerate().filter_map(|(i, v)| {
                        let x0 = i as f64 + offset;
                        v.map(|value| {
                            Rectangle::new([(x0, 0.0), (x0 + bar_width * 0.95, value)], color.filled())
                        })
                    }))?
                    .label(series.name.clone())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
            } else {
                for (run_idx, run) in ChartPlotter::contiguous_runs(&series.values)
                    .into_iter()
                    .enumerate()
                {
                    let drawn = chart.draw_series(LineSeries::new(
                        run.into_iter().map(|p| (p[0], p[1])),
                        color.stroke_width(2),
                    ))?;
                    if run_idx == 0 {
                        drawn.label(series.name.clone()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                    }
                }
            }
        }

        if !plan.series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
        Ok(())
    }

    fn render_scatter(root: &DrawingArea<BitMapBackend, Shift>, plan: &ScatterPlan) -> Result<()> {
        let (x_min, x_max) = bounds(plan.points.iter().map(|p| p[0]));
        let (y_min, y_max) = bounds(plan.points.iter().map(|p| p[1]));
        let color = to_rgb(plan.color);

        let mut chart = ChartBuilder::on(root)
            .caption(&plan.title, ("sans-serif", 32).into_font())
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc(plan.x_label.clone().unwrap_or_default())
            .y_desc(plan.y_label.clone().unwrap_or_default())
            .draw()?;

        chart
            .draw_series(
                plan.points
                    .iter()
                    .map(|p| Circle::new((p[0], p[1]), 4, color.filled())),
            )?
            .label(plan.name.clone())
            .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        Ok(())
    }

    fn render_pie(root: &DrawingArea<BitMapBackend, Shift>, plan: &PiePlan) -> Result<()> {
        let area = root.titled(&plan.title, ("sans-serif", 32).into_font())?;

        let sizes: Vec<f64> = plan.slices.iter().map(|s| s.value.max(0.0)).collect();
        if sizes.iter().sum::<f64>() <= 0.0 {
            return Ok(());
        }
        let colors: Vec<RGBColor> = plan.slices.iter().map(|s| to_rgb(s.color)).collect();
        let labels: Vec<String> = plan.slices.iter().map(|s| s.label.clone()).collect();

        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = (w.min(h) as f64) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 14).into_font().color(&WHITE));
        area.draw(&pie)?;
        Ok(())
    }
}

fn to_rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

/// Padded min/max of a set of coordinates, never an empty range.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad, max + pad)
}
