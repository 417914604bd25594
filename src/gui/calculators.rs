//! NPT and contingency calculator tabs.

use crate::cost::calculators::{
    contingency_cost, npt_cost, total_with_contingency, CONTINGENCY_MAX_PCT, CONTINGENCY_MIN_PCT,
    DEFAULT_BASE_COST, DEFAULT_CONTINGENCY_PCT,
};
use crate::cost::{format_currency, parse_cost};
use egui::{Color32, RichText};

fn result_row(ui: &mut egui::Ui, label: &str, value: f64, color: Color32) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).size(14.0));
        ui.label(RichText::new(format_currency(value)).size(18.0).strong().color(color));
    });
}

/// Non-productive time cost: downtime hours times the rig hourly rate.
#[derive(Debug, Default)]
pub struct NptPanel {
    pub hours: String,
    pub hourly_rate: String,
}

impl NptPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cost(&self) -> f64 {
        npt_cost(parse_cost(&self.hours), parse_cost(&self.hourly_rate))
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("⏱ NPT Cost Calculator").size(16.0).strong());
        ui.label(
            RichText::new("Estimate the cost of non-productive rig time.")
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(10.0);

        egui::Grid::new("npt_inputs")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("NPT Hours:");
                ui.text_edit_singleline(&mut self.hours);
                ui.end_row();

                ui.label("Rig Hourly Rate ($):");
                ui.text_edit_singleline(&mut self.hourly_rate);
                ui.end_row();
            });

        ui.add_space(10.0);
        result_row(ui, "NPT Cost:", self.cost(), Color32::from_rgb(220, 53, 69));
    }
}

/// Contingency reserve on top of a base cost.
#[derive(Debug)]
pub struct ContingencyPanel {
    pub base_cost: String,
    pub percentage: f64,
}

impl Default for ContingencyPanel {
    fn default() -> Self {
        Self {
            base_cost: DEFAULT_BASE_COST.to_string(),
            percentage: DEFAULT_CONTINGENCY_PCT,
        }
    }
}

impl ContingencyPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_base_cost(&mut self, base_cost: f64) {
        self.base_cost = base_cost.to_string();
    }

    pub fn reserve(&self) -> f64 {
        contingency_cost(parse_cost(&self.base_cost), self.percentage)
    }

    pub fn total(&self) -> f64 {
        total_with_contingency(parse_cost(&self.base_cost), self.percentage)
    }

    /// `rig_total` backs the "use rig total" shortcut.
    pub fn show(&mut self, ui: &mut egui::Ui, rig_total: f64) {
        ui.label(RichText::new("🛡 Contingency Planning").size(16.0).strong());
        ui.add_space(10.0);

        egui::Grid::new("contingency_inputs")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Base Cost ($):");
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.base_cost);
                    if ui.button("Use rig total").clicked() {
                        self.use_base_cost(rig_total);
                    }
                });
                ui.end_row();

                ui.label("Contingency (%):");
                ui.add(
                    egui::Slider::new(
                        &mut self.percentage,
                        CONTINGENCY_MIN_PCT..=CONTINGENCY_MAX_PCT,
                    )
                    .step_by(1.0)
                    .suffix("%"),
                );
                ui.end_row();
            });

        ui.add_space(10.0);
        result_row(
            ui,
            "Contingency Amount:",
            self.reserve(),
            Color32::from_rgb(255, 193, 7),
        );
        result_row(
            ui,
            "Total with Contingency:",
            self.total(),
            Color32::from_rgb(40, 167, 69),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npt_uses_parsed_inputs() {
        let panel = NptPanel {
            hours: "12".to_string(),
            hourly_rate: "1500".to_string(),
        };
        assert_eq!(panel.cost(), 18000.0);

        let blank = NptPanel::new();
        assert_eq!(blank.cost(), 0.0);
    }

    #[test]
    fn contingency_defaults() {
        let panel = ContingencyPanel::new();
        assert_eq!(panel.reserve(), 100_000.0);
        assert_eq!(panel.total(), 1_100_000.0);
    }

    #[test]
    fn rig_total_becomes_base() {
        let mut panel = ContingencyPanel::new();
        panel.use_base_cost(250_000.0);
        panel.percentage = 20.0;
        assert_eq!(panel.reserve(), 50_000.0);
        assert_eq!(panel.total(), 300_000.0);
    }
}
