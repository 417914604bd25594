//! Chart Viewer Widget
//! Cards of interactive charts laid out in as many columns as fit.

use crate::charts::{ChartKind, ChartPlan, ChartPlotter};
use egui::{Color32, RichText};

const CHART_SPACING: f32 = 15.0;
const CARD_WIDTH: f32 = 560.0;
const PLOT_HEIGHT: f32 = 300.0;

/// Grid of chart cards. Each card offers a PNG export.
pub struct ChartViewer {
    id: &'static str,
    plans: Vec<ChartPlan>,
}

impl ChartViewer {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            plans: Vec::new(),
        }
    }

    pub fn set_plans(&mut self, plans: Vec<ChartPlan>) {
        self.plans = plans;
    }

    pub fn plans(&self) -> &[ChartPlan] {
        &self.plans
    }

    /// Draw all cards. Returns the index of a chart whose export was requested.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<usize> {
        let mut export = None;
        let avail_width = ui.available_width();
        let num_columns = ((avail_width / (CARD_WIDTH + CHART_SPACING)).floor() as usize).max(1);

        for (row, chunk) in self.plans.chunks(num_columns).enumerate() {
            ui.horizontal(|ui| {
                for (col, plan) in chunk.iter().enumerate() {
                    let idx = row * num_columns + col;
                    if Self::draw_card(ui, plan, &format!("{}_{}", self.id, idx)) {
                        export = Some(idx);
                    }
                    ui.add_space(CHART_SPACING);
                }
            });
            ui.add_space(CHART_SPACING);
        }
        export
    }

    fn draw_card(ui: &mut egui::Ui, plan: &ChartPlan, id_salt: &str) -> bool {
        let mut export = false;
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH - 24.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(plan.title()).size(16.0).strong());
                    ui.label(
                        RichText::new(kind_label(plan.kind()))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("💾 Export PNG").clicked() {
                            export = true;
                        }
                    });
                });
                ui.add_space(6.0);
                ChartPlotter::draw(ui, plan, id_salt, PLOT_HEIGHT);
            });
        export
    }
}

fn kind_label(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Bar => "bar",
        ChartKind::Line => "line",
        ChartKind::Pie => "pie",
        ChartKind::Scatter => "scatter",
        ChartKind::Unknown => "",
    }
}
