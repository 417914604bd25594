//! Chart Plotter Module
//! Draws resolved chart plans interactively using egui_plot.

use crate::charts::{CartesianPlan, ChartPlan, PiePlan, ScatterPlan};
use egui::{Color32, Pos2, RichText, Shape, Stroke};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use std::f32::consts::TAU;

/// Total width shared by the bars of one category.
const BAR_GROUP_WIDTH: f64 = 0.8;
const PIE_RADIUS: f32 = 100.0;
const PIE_STEPS_PER_TURN: f32 = 96.0;

/// Draws interactive charts from `ChartPlan`s.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw any plan. `id_salt` must be unique among charts on screen.
    pub fn draw(ui: &mut egui::Ui, plan: &ChartPlan, id_salt: &str, height: f32) {
        match plan {
            ChartPlan::Bar(cartesian) => Self::draw_cartesian(ui, cartesian, id_salt, height, true),
            ChartPlan::Line(cartesian) => {
                Self::draw_cartesian(ui, cartesian, id_salt, height, false)
            }
            ChartPlan::Pie(pie) => Self::draw_pie(ui, pie, height),
            ChartPlan::Scatter(scatter) => Self::draw_scatter(ui, scatter, id_salt, height),
        }
    }

    /// Bar or line chart over a category x-axis.
    fn draw_cartesian(
        ui: &mut egui::Ui,
        plan: &CartesianPlan,
        id_salt: &str,
        height: f32,
        bars: bool,
    ) {
        let x_labels = plan.categories.clone();
        let mut plot = Plot::new(format!("cartesian_{}", id_salt))
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                    x_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            });
        if let Some(label) = &plan.x_label {
            plot = plot.x_axis_label(label.clone());
        }
        if let Some(label) = &plan.y_label {
            plot = plot.y_axis_label(label.clone());
        }

        let series_count = plan.series.len().max(1) as f64;
        let bar_width = BAR_GROUP_WIDTH / series_count;

        plot.show(ui, |plot_ui| {
            for (s_idx, series) in plan.series.iter().enumerate() {
                if bars {
                    let offset = -BAR_GROUP_WIDTH / 2.0 + bar_width * (s_idx as f64 + 0.5);
                    let elems: Vec<Bar> = series
                        .values
                        .iter()
                        .enumerate()
                        .filter_map(|(i, v)| {
                            v.map(|value| {
                                Bar::new(i as f64 + offset, value)
                                    .width(bar_width * 0.95)
                                    .fill(series.color)
                            })
                        })
                        .collect();
                    plot_ui.bar_chart(
                        BarChart::new(elems)
                            .color(series.color)
                            .name(&series.name),
                    );
                } else {
                    // Missing values break the line into separate runs.
                    for run in Self::contiguous_runs(&series.values) {
                        plot_ui.line(
                            Line::new(PlotPoints::new(run))
                                .color(series.color)
                                .width(2.0)
                                .name(&series.name),
                        );
                    }
                }
            }
        });
    }

    fn draw_scatter(ui: &mut egui::Ui, plan: &ScatterPlan, id_salt: &str, height: f32) {
        let mut plot = Plot::new(format!("scatter_{}", id_salt))
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false);
        if let Some(label) = &plan.x_label {
            plot = plot.x_axis_label(label.clone());
        }
        if let Some(label) = &plan.y_label {
            plot = plot.y_axis_label(label.clone());
        }

        plot.show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::new(plan.points.clone()))
                    .radius(4.0)
                    .color(plan.color)
                    .name(&plan.name),
            );
        });
    }

    /// Pie chart painted directly, with a legend of label, value and share.
    fn draw_pie(ui: &mut egui::Ui, plan: &PiePlan, height: f32) {
        let total: f64 = plan.slices.iter().map(|s| s.value.max(0.0)).sum();

        ui.horizontal(|ui| {
            let size = egui::vec2((PIE_RADIUS * 2.0 + 20.0).min(height), height);
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            let radius = PIE_RADIUS.min(rect.width() / 2.0 - 10.0).min(rect.height() / 2.0 - 10.0);
            let center = rect.center();
            let painter = ui.painter_at(rect);

            if total <= 0.0 {
                painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::GRAY));
            } else {
                let mut start = -TAU / 4.0;
                for slice in &plan.slices {
                    let sweep = (slice.value.max(0.0) / total) as f32 * TAU;
                    for shape in Self::wedge_shapes(center, radius, start, sweep, slice.color) {
                        painter.add(shape);
                    }
                    start += sweep;
                }
            }

            ui.vertical(|ui| {
                for slice in &plan.slices {
                    ui.horizontal(|ui| {
                        let (swatch, _) =
                            ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                        ui.painter().rect_filled(swatch, 2.0, slice.color);
                        let share = if total > 0.0 {
                            slice.value.max(0.0) / total * 100.0
                        } else {
                            0.0
                        };
                        ui.label(
                            RichText::new(format!("{}: {} ({:.1}%)", slice.label, slice.value, share))
                                .size(12.0),
                        );
                    });
                }
            });
        });
    }

    /// Split a wedge into convex pieces of at most a quarter turn.
    fn wedge_shapes(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Vec<Shape> {
        if sweep <= 0.0 {
            return Vec::new();
        }

        let pieces = (sweep / (TAU / 4.0)).ceil().max(1.0) as usize;
        let piece_sweep = sweep / pieces as f32;
        (0..pieces)
            .map(|p| {
                let from = start + piece_sweep * p as f32;
                let steps = ((piece_sweep / TAU) * PIE_STEPS_PER_TURN).ceil().max(1.0) as usize;
                let mut points = vec![center];
                for s in 0..=steps {
                    let angle = from + piece_sweep * s as f32 / steps as f32;
                    points.push(center + radius * egui::vec2(angle.cos(), angle.sin()));
                }
                Shape::convex_polygon(points, color, Stroke::new(1.0, Color32::WHITE))
            })
            .collect()
    }

    /// Group consecutive present values into `[x, y]` runs.
    pub(crate) fn contiguous_runs(values: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (i, value) in values.iter().enumerate() {
            match value {
                Some(v) => current.push([i as f64, *v]),
                None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_split_line_runs() {
        let runs = ChartPlotter::contiguous_runs(&[Some(1.0), Some(2.0), None, Some(4.0), None]);
        assert_eq!(runs, vec![vec![[0.0, 1.0], [1.0, 2.0]], vec![[3.0, 4.0]]]);
    }

    #[test]
    fn large_wedges_are_split_into_convex_pieces() {
        let shapes =
            ChartPlotter::wedge_shapes(Pos2::ZERO, 50.0, 0.0, TAU * 0.8, Color32::RED);
        assert_eq!(shapes.len(), 4);
        assert!(ChartPlotter::wedge_shapes(Pos2::ZERO, 50.0, 0.0, 0.0, Color32::RED).is_empty());
    }
}
