//! Well identification header.

use crate::cost::format_currency;
use egui::{Color32, ComboBox, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WellType {
    #[default]
    Production,
    Exploration,
    Injection,
}

impl WellType {
    pub const ALL: [WellType; 3] = [
        WellType::Production,
        WellType::Exploration,
        WellType::Injection,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WellType::Production => "Production",
            WellType::Exploration => "Exploration",
            WellType::Injection => "Injection",
        }
    }
}

/// Descriptive fields of the well being estimated.
#[derive(Debug, Clone, Default)]
pub struct WellPanel {
    pub well_name: String,
    pub well_type: WellType,
    pub location: String,
    pub depth_ft: String,
    pub operator: String,
}

impl WellPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the form. `total_cost` is the selected rig's total.
    pub fn show(&mut self, ui: &mut egui::Ui, total_cost: f64) {
        ui.label(RichText::new("🛢 Well Identification").size(14.0).strong());
        ui.add_space(5.0);

        egui::Grid::new("well_identification")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Well Name:");
                ui.text_edit_singleline(&mut self.well_name);
                ui.end_row();

                ui.label("Well Type:");
                ComboBox::from_id_salt("well_type")
                    .selected_text(self.well_type.label())
                    .show_ui(ui, |ui| {
                        for kind in WellType::ALL {
                            ui.selectable_value(&mut self.well_type, kind, kind.label());
                        }
                    });
                ui.end_row();

                ui.label("Location:");
                ui.text_edit_singleline(&mut self.location);
                ui.end_row();

                ui.label("Depth (ft):");
                ui.text_edit_singleline(&mut self.depth_ft);
                ui.end_row();

                ui.label("Operator:");
                ui.text_edit_singleline(&mut self.operator);
                ui.end_row();
            });

        ui.add_space(10.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Total Estimated Cost").size(12.0).color(Color32::GRAY));
                ui.label(
                    RichText::new(format_currency(total_cost))
                        .size(20.0)
                        .strong()
                        .color(Color32::from_rgb(100, 149, 237)),
                );
            });
    }
}
