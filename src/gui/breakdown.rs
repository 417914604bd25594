//! Cost breakdown: rig selection, per-item cost editors and rig comparison.

use crate::cost::{format_currency, Category, RigBook};
use egui::{Color32, ComboBox, RichText};
use std::collections::HashMap;

type EditKey = (String, String, String);

/// Editor state for the cost breakdown tab.
///
/// The text typed into each item editor is kept here so that partial input
/// such as `"12."` survives between frames; the rig book only ever holds
/// the parsed number.
#[derive(Default)]
pub struct BreakdownPanel {
    edits: HashMap<EditKey, String>,
}

impl BreakdownPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget typed text, e.g. after costs changed underneath the editors.
    pub fn reset_edits(&mut self) {
        self.edits.clear();
    }

    /// Record typed text for an item and push the parsed value into the book.
    pub fn edit_item(
        &mut self,
        rigs: &mut RigBook,
        category_id: &str,
        item_id: &str,
        text: String,
    ) -> bool {
        let rig_id = rigs.selected_id().to_string();
        let updated = rigs.set_item_cost(&rig_id, category_id, item_id, &text);
        if updated {
            self.edits
                .insert((rig_id, category_id.to_string(), item_id.to_string()), text);
        }
        updated
    }

    pub fn remove_selected_rig(&mut self, rigs: &mut RigBook) -> bool {
        let rig_id = rigs.selected_id().to_string();
        let removed = rigs.remove_rig(&rig_id);
        if removed {
            self.edits.retain(|(rig, _, _), _| *rig != rig_id);
        }
        removed
    }

    fn edit_text(&self, rig_id: &str, category_id: &str, item_id: &str, cost: f64) -> String {
        self.edits
            .get(&(rig_id.to_string(), category_id.to_string(), item_id.to_string()))
            .cloned()
            .unwrap_or_else(|| cost.to_string())
    }

    pub fn show(&mut self, ui: &mut egui::Ui, rigs: &mut RigBook) {
        self.show_rig_controls(ui, rigs);
        ui.add_space(10.0);

        let rig_id = rigs.selected_id().to_string();
        let categories: Vec<_> = rigs.selected_rig_costs().to_vec();
        for category in &categories {
            self.show_category(ui, rigs, &rig_id, category);
        }

        ui.add_space(10.0);
        ui.separator();
        ui.horizontal(|ui| {
            ui.label(RichText::new("Grand Total").size(16.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format_currency(rigs.grand_total()))
                        .size(18.0)
                        .strong()
                        .color(Color32::from_rgb(100, 149, 237)),
                );
            });
        });

        if rigs.len() > 1 {
            ui.add_space(15.0);
            Self::show_comparison(ui, rigs);
        }
    }

    fn show_rig_controls(&mut self, ui: &mut egui::Ui, rigs: &mut RigBook) {
        ui.horizontal(|ui| {
            ui.label("Rig:");
            let selected_name = rigs
                .selected_rig()
                .map(|rig| rig.name.clone())
                .unwrap_or_default();
            let mut choice = rigs.selected_id().to_string();
            ComboBox::from_id_salt("rig_selector")
                .selected_text(selected_name)
                .show_ui(ui, |ui| {
                    for rig in rigs.rigs() {
                        ui.selectable_value(&mut choice, rig.id.clone(), &rig.name);
                    }
                });
            if choice != rigs.selected_id() {
                rigs.select_rig(&choice);
            }

            if ui.button("➕ Add New Rig").clicked() {
                rigs.create_rig();
            }
            if rigs.len() > 1 && ui.button("🗑 Remove Current Rig").clicked() {
                self.remove_selected_rig(rigs);
            }
        });
    }

    fn show_category(
        &mut self,
        ui: &mut egui::Ui,
        rigs: &mut RigBook,
        rig_id: &str,
        category: &Category,
    ) {
        let header = format!("{}    {}", category.name, format_currency(category.total()));
        egui::CollapsingHeader::new(RichText::new(header).strong())
            .id_salt(format!("{}_{}", rig_id, category.id))
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new(format!("items_{}_{}", rig_id, category.id))
                    .num_columns(2)
                    .striped(true)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Item").strong());
                        ui.label(RichText::new("Cost ($)").strong());
                        ui.end_row();

                        for item in &category.items {
                            ui.label(&item.name);
                            let mut text = self.edit_text(rig_id, &category.id, &item.id, item.cost);
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut text).desired_width(140.0),
                            );
                            if response.changed() {
                                self.edit_item(rigs, &category.id, &item.id, text);
                            }
                            ui.end_row();
                        }

                        ui.label(RichText::new("Category Total").strong());
                        ui.label(RichText::new(format_currency(category.total())).strong());
                        ui.end_row();
                    });
            });
    }

    fn show_comparison(ui: &mut egui::Ui, rigs: &mut RigBook) {
        ui.label(RichText::new("Rig Comparison").size(14.0).strong());
        ui.add_space(5.0);

        let mut clicked = None;
        egui::Grid::new("rig_comparison")
            .num_columns(2)
            .striped(true)
            .spacing([40.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Rig").strong());
                ui.label(RichText::new("Total Cost").strong());
                ui.end_row();

                for summary in rigs.comparison() {
                    if ui.selectable_label(summary.selected, &summary.name).clicked() {
                        clicked = Some(summary.id.clone());
                    }
                    ui.label(format_currency(summary.total));
                    ui.end_row();
                }
            });

        if let Some(rig_id) = clicked {
            rigs.select_rig(&rig_id);
        }
    }
}
