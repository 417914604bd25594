//! Cost analysis scatter/bubble chart over risk factor and complexity.

use crate::cost::format_currency;
use egui::{Color32, RichText};
use egui_plot::{Legend, Plot, PlotPoints, Points};
use std::f64::consts::PI;

/// Marker area range in square pixels; bubble cost maps linearly onto it.
const BUBBLE_AREA_MIN: f64 = 50.0;
const BUBBLE_AREA_MAX: f64 = 1000.0;
const SCATTER_RADIUS: f32 = 5.0;

pub struct CostPoint {
    pub risk: f64,
    pub complexity: f64,
    pub cost: f64,
    pub category: &'static str,
    pub name: &'static str,
}

pub const COST_POINTS: [CostPoint; 8] = [
    CostPoint { risk: 100.0, complexity: 200.0, cost: 50_000.0, category: "Pre-Drilling", name: "Land Acquisition" },
    CostPoint { risk: 120.0, complexity: 300.0, cost: 75_000.0, category: "Pre-Drilling", name: "Geological Survey" },
    CostPoint { risk: 200.0, complexity: 400.0, cost: 25_000.0, category: "Drilling", name: "Rig Rental" },
    CostPoint { risk: 180.0, complexity: 350.0, cost: 30_000.0, category: "Drilling", name: "Drilling Mud" },
    CostPoint { risk: 300.0, complexity: 250.0, cost: 80_000.0, category: "Completion", name: "Casing" },
    CostPoint { risk: 250.0, complexity: 280.0, cost: 45_000.0, category: "Completion", name: "Production Tubing" },
    CostPoint { risk: 400.0, complexity: 500.0, cost: 120_000.0, category: "Facilities", name: "Processing Equipment" },
    CostPoint { risk: 350.0, complexity: 450.0, cost: 80_000.0, category: "Facilities", name: "Storage Tanks" },
];

pub const POINT_CATEGORIES: [(&str, Color32); 4] = [
    ("Pre-Drilling", Color32::from_rgb(0x88, 0x84, 0xd8)),
    ("Drilling", Color32::from_rgb(0x82, 0xca, 0x9d)),
    ("Completion", Color32::from_rgb(0xff, 0xc6, 0x58)),
    ("Facilities", Color32::from_rgb(0xff, 0x73, 0x00)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointStyle {
    #[default]
    Scatter,
    Bubble,
}

/// Marker radius for a cost within `[min, max]`, treating the area range as pixels².
pub fn bubble_radius(cost: f64, min: f64, max: f64) -> f32 {
    let t = if max > min {
        ((cost - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let area = BUBBLE_AREA_MIN + t * (BUBBLE_AREA_MAX - BUBBLE_AREA_MIN);
    (area / PI).sqrt() as f32
}

#[derive(Default)]
pub struct BubblePanel {
    pub style: PointStyle,
}

impl BubblePanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn radius(&self, point: &CostPoint, min: f64, max: f64) -> f32 {
        match self.style {
            PointStyle::Scatter => SCATTER_RADIUS,
            PointStyle::Bubble => bubble_radius(point.cost, min, max),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("3D Cost Analysis").size(16.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.selectable_value(&mut self.style, PointStyle::Bubble, "Bubble Chart");
                ui.selectable_value(&mut self.style, PointStyle::Scatter, "Scatter Plot");
            });
        });
        ui.add_space(8.0);

        let (min, max) = COST_POINTS
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.cost), hi.max(p.cost))
            });

        Plot::new("cost_bubbles")
            .height(380.0)
            .legend(Legend::default())
            .x_axis_label("Risk Factor")
            .y_axis_label("Complexity")
            .include_x(0.0)
            .include_y(0.0)
            .label_formatter(|_name, value| {
                COST_POINTS
                    .iter()
                    .find(|p| (p.risk - value.x).abs() < 5.0 && (p.complexity - value.y).abs() < 5.0)
                    .map(|p| {
                        format!(
                            "{}\nCategory: {}\nCost: {}\nRisk Factor: {}\nComplexity: {}",
                            p.name,
                            p.category,
                            format_currency(p.cost),
                            p.risk,
                            p.complexity
                        )
                    })
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                // One marker per point so each can carry its own radius;
                // shared names merge them into one legend entry per category.
                for (category, color) in POINT_CATEGORIES {
                    for point in COST_POINTS.iter().filter(|p| p.category == category) {
                        plot_ui.points(
                            Points::new(PlotPoints::new(vec![[point.risk, point.complexity]]))
                                .name(category)
                                .color(color)
                                .filled(true)
                                .radius(self.radius(point, min, max)),
                        );
                    }
                }
            });

        ui.add_space(8.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Chart Controls & Information").strong());
                ui.label("X-Axis: Risk Factor (0-500)");
                ui.label("Y-Axis: Complexity Score (0-600)");
                ui.label("Bubble Size: Cost Amount");
                ui.label("Hover for details; click legend entries to toggle categories.");
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bubble_radius_spans_area_range() {
        let small = bubble_radius(25_000.0, 25_000.0, 120_000.0);
        let large = bubble_radius(120_000.0, 25_000.0, 120_000.0);
        assert!((small as f64 - (50.0 / PI).sqrt()).abs() < 1e-4);
        assert!((large as f64 - (1000.0 / PI).sqrt()).abs() < 1e-3);
        assert!(bubble_radius(80_000.0, 25_000.0, 120_000.0) > small);
    }

    #[test]
    fn degenerate_range_uses_smallest_marker() {
        assert_eq!(bubble_radius(5.0, 5.0, 5.0), bubble_radius(0.0, 0.0, 1.0));
    }

    #[test]
    fn every_point_has_a_category_color() {
        for point in &COST_POINTS {
            assert!(POINT_CATEGORIES.iter().any(|(name, _)| *name == point.category));
        }
    }

    #[test]
    fn scatter_style_ignores_cost() {
        let panel = BubblePanel::new();
        let radii: Vec<f32> = COST_POINTS
            .iter()
            .map(|p| panel.radius(p, 25_000.0, 120_000.0))
            .collect();
        assert!(radii.iter().all(|r| *r == SCATTER_RADIUS));
    }
}
