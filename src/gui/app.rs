//! Drilling Cost Dashboard Main Application
//! Well identification and data import on the left, dashboard tabs in the center.

use crate::api::CostApi;
use crate::charts::{ChartPlan, StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
use crate::config::AppConfig;
use crate::cost::{CostEntry, RigBook};
use crate::gui::breakdown::BreakdownPanel;
use crate::gui::bubble::BubblePanel;
use crate::gui::calculators::{ContingencyPanel, NptPanel};
use crate::gui::categories::{CategoriesAction, CategoriesPanel};
use crate::gui::import::ImportPanel;
use crate::gui::predictions::{PredictionsAction, PredictionsPanel};
use crate::gui::toast::Toasts;
use crate::gui::well_panel::WellPanel;
use egui::{Color32, RichText, SidePanel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    CostBreakdown,
    CostCategories,
    Charts3d,
    Npt,
    Contingency,
    AiPredictions,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::CostBreakdown,
        Tab::CostCategories,
        Tab::Charts3d,
        Tab::Npt,
        Tab::Contingency,
        Tab::AiPredictions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::CostBreakdown => "Cost Breakdown",
            Tab::CostCategories => "Cost Categories",
            Tab::Charts3d => "3D Charts",
            Tab::Npt => "NPT Calculator",
            Tab::Contingency => "Contingency",
            Tab::AiPredictions => "AI Predictions",
        }
    }
}

/// Main application window. Owns all dashboard state.
pub struct DrillCostApp {
    config: AppConfig,
    api: Arc<dyn CostApi>,
    rigs: RigBook,
    active_tab: Tab,

    well: WellPanel,
    breakdown: BreakdownPanel,
    categories: CategoriesPanel,
    bubble: BubblePanel,
    npt: NptPanel,
    contingency: ContingencyPanel,
    predictions: PredictionsPanel,
    import: ImportPanel,
    toasts: Toasts,
    /// Exports so far; numbers the PNG file names.
    exports: usize,
}

impl DrillCostApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        api: Arc<dyn CostApi>,
    ) -> Self {
        Self::with_api(config, api)
    }

    fn with_api(config: AppConfig, api: Arc<dyn CostApi>) -> Self {
        Self {
            config,
            api,
            rigs: RigBook::new(),
            active_tab: Tab::CostBreakdown,
            well: WellPanel::new(),
            breakdown: BreakdownPanel::new(),
            categories: CategoriesPanel::new(),
            bubble: BubblePanel::new(),
            npt: NptPanel::new(),
            contingency: ContingencyPanel::new(),
            predictions: PredictionsPanel::new(),
            import: ImportPanel::new(),
            toasts: Toasts::new(),
            exports: 0,
        }
    }

    /// Collect background results. Returns true while anything is pending.
    fn poll_background(&mut self) -> bool {
        let categories_busy = self.categories.poll();
        let predictions_busy = self.predictions.poll(&mut self.toasts);
        if let Some(entries) = self.import.poll(&mut self.toasts) {
            self.apply_imported_costs(&entries);
        }
        categories_busy || predictions_busy || self.import.is_busy()
    }

    /// Write imported sheet rows into the selected rig.
    fn apply_imported_costs(&mut self, entries: &[CostEntry]) {
        let rig_id = self.rigs.selected_id().to_string();
        let applied = self.rigs.apply_entries(&rig_id, entries);
        self.breakdown.reset_edits();
        info!(rig_id = %rig_id, rows = entries.len(), applied, "imported cost sheet");

        let rig_name = self
            .rigs
            .selected_rig()
            .map(|rig| rig.name.clone())
            .unwrap_or(rig_id);
        self.toasts.info(
            "Cost sheet imported",
            format!(
                "Updated {} of {} item(s) in {}.",
                applied,
                entries.len(),
                rig_name
            ),
        );
    }

    /// Render a chart to PNG in the export directory and open it.
    fn export_chart(&mut self, plan: &ChartPlan) -> Option<PathBuf> {
        let path =
            StaticChartRenderer::export_path(&self.config.export_dir, plan.title(), self.exports);
        self.exports += 1;
        match StaticChartRenderer::render_png(plan, &path, EXPORT_WIDTH, EXPORT_HEIGHT) {
            Ok(()) => {
                info!(path = %path.display(), "exported chart");
                self.toasts
                    .info("Chart exported", format!("Saved {}", path.display()));
                Some(path)
            }
            Err(e) => {
                warn!(error = %e, "chart export failed");
                self.toasts.error("Export failed", e.to_string());
                None
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let paths: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !paths.is_empty() {
            self.import.select_files(&paths);
        }
    }

    fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        if tab == Tab::CostCategories {
            self.categories.ensure_fetched(&self.api);
        }
    }

    fn show_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                let selected = self.active_tab == tab;
                if ui
                    .selectable_label(selected, RichText::new(tab.label()).size(14.0))
                    .clicked()
                    && !selected
                {
                    self.set_tab(tab);
                }
            }
        });
    }

    fn show_active_tab(&mut self, ui: &mut egui::Ui) {
        let mut export = None;
        match self.active_tab {
            Tab::CostBreakdown => self.breakdown.show(ui, &mut self.rigs),
            Tab::CostCategories => {
                if let CategoriesAction::Export(plan) = self.categories.show(ui, &self.api) {
                    export = Some(plan);
                }
            }
            Tab::Charts3d => self.bubble.show(ui),
            Tab::Npt => self.npt.show(ui),
            Tab::Contingency => self.contingency.show(ui, self.rigs.grand_total()),
            Tab::AiPredictions => {
                if let PredictionsAction::Export(plan) =
                    self.predictions.show(ui, &self.api, &mut self.toasts)
                {
                    export = Some(plan);
                }
            }
        }

        if let Some(plan) = export {
            if let Some(path) = self.export_chart(&plan) {
                if let Err(e) = open::that(&path) {
                    warn!(error = %e, "could not open exported chart");
                }
            }
        }
    }
}

impl eframe::App for DrillCostApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // Keep polling while requests are in flight.
        if self.poll_background() {
            ctx.request_repaint();
        }

        SidePanel::left("well_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("🛢 Oil Well Cost Estimation")
                                .size(20.0)
                                .color(Color32::from_rgb(100, 149, 237)),
                        );
                    });
                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(5.0);

                    self.well.show(ui, self.rigs.grand_total());

                    ui.add_space(15.0);
                    ui.separator();
                    ui.add_space(10.0);

                    self.import.show(ui, &self.api);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_tab_bar(ui);
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.show_active_tab(ui));
        });

        self.toasts.show(ctx);
    }
}
