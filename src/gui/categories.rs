//! Cost categories from the service, plus charts built from an uploaded sheet.

use crate::api::{ApiError, CostApi, CostCategory};
use crate::charts::{dispatch_all, ChartDescriptor, ChartPlan};
use crate::data::CHART_SOURCE_EXTENSIONS;
use crate::gui::chart_viewer::ChartViewer;
use crate::gui::task::{take_finished, Pending};
use egui::{Color32, RichText};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

pub const FETCH_FAILED: &str = "Failed to load cost categories";
pub const UPLOAD_FAILED: &str = "Failed to load charts from file";

pub enum CategoriesAction {
    None,
    Export(ChartPlan),
}

pub struct CategoriesPanel {
    categories: Vec<CostCategory>,
    viewer: ChartViewer,
    error: Option<&'static str>,
    fetched: bool,
    fetch: Option<Pending<Result<Vec<CostCategory>, ApiError>>>,
    upload: Option<Pending<Result<Vec<ChartDescriptor>, ApiError>>>,
}

impl Default for CategoriesPanel {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            viewer: ChartViewer::new("cost_charts"),
            error: None,
            fetched: false,
            fetch: None,
            upload: None,
        }
    }
}

impl CategoriesPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_some() || self.upload.is_some()
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    #[cfg(test)]
    pub fn categories(&self) -> &[CostCategory] {
        &self.categories
    }

    #[cfg(test)]
    pub fn charts(&self) -> &[ChartPlan] {
        self.viewer.plans()
    }

    /// Fetch once, the first time the tab is shown.
    pub fn ensure_fetched(&mut self, api: &Arc<dyn CostApi>) {
        if !self.fetched {
            self.fetched = true;
            self.fetch_categories(api);
        }
    }

    pub fn fetch_categories(&mut self, api: &Arc<dyn CostApi>) {
        if self.fetch.is_some() {
            return;
        }
        self.error = None;
        let api = Arc::clone(api);
        self.fetch = Some(Pending::spawn(move || api.fetch_cost_categories()));
    }

    pub fn upload_sheet(&mut self, api: &Arc<dyn CostApi>, path: PathBuf) {
        if self.upload.is_some() {
            return;
        }
        self.error = None;
        let api = Arc::clone(api);
        self.upload = Some(Pending::spawn(move || api.upload_cost_sheet(&path)));
    }

    /// Collect finished requests. Returns true while work is still pending.
    pub fn poll(&mut self) -> bool {
        if let Some(result) = take_finished(&mut self.fetch) {
            match result {
                Some(Ok(categories)) => self.categories = categories,
                Some(Err(e)) => {
                    warn!(error = %e, "cost category fetch failed");
                    self.error = Some(FETCH_FAILED);
                }
                None => self.error = Some(FETCH_FAILED),
            }
        }

        if let Some(result) = take_finished(&mut self.upload) {
            match result {
                Some(Ok(descriptors)) => self.viewer.set_plans(dispatch_all(&descriptors)),
                Some(Err(e)) => {
                    warn!(error = %e, "cost sheet upload failed");
                    self.error = Some(UPLOAD_FAILED);
                }
                None => self.error = Some(UPLOAD_FAILED),
            }
        }

        self.is_loading()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, api: &Arc<dyn CostApi>) -> CategoriesAction {
        let mut action = CategoriesAction::None;

        ui.horizontal(|ui| {
            ui.label(RichText::new("Cost Categories").size(16.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let idle = !self.is_loading();
                if ui.add_enabled(idle, egui::Button::new("🔄 Reload")).clicked() {
                    self.fetch_categories(api);
                }
                if ui
                    .add_enabled(idle, egui::Button::new("📂 Upload cost sheet"))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Cost sheets", &CHART_SOURCE_EXTENSIONS)
                        .pick_file()
                    {
                        self.upload_sheet(api, path);
                    }
                }
            });
        });
        ui.add_space(8.0);

        if self.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading...");
            });
        }
        if let Some(message) = self.error {
            ui.label(RichText::new(message).color(Color32::from_rgb(220, 53, 69)));
        }

        if !self.categories.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for category in &self.categories {
                    if let Some(name) = &category.name {
                        egui::Frame::none()
                            .fill(ui.visuals().widgets.noninteractive.bg_fill)
                            .rounding(12.0)
                            .inner_margin(egui::Margin::symmetric(10.0, 4.0))
                            .show(ui, |ui| {
                                ui.label(name);
                            });
                    }
                }
            });
            ui.add_space(10.0);
        }

        if !self.is_loading() && self.error.is_none() {
            if let Some(idx) = self.viewer.show(ui) {
                if let Some(plan) = self.viewer.plans().get(idx) {
                    action = CategoriesAction::Export(plan.clone());
                }
            }
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::{wait_until_idle, MockApi};

    #[test]
    fn first_show_fetches_once() {
        let mock = MockApi::new();
        let api: Arc<dyn CostApi> = mock.clone();
        let mut panel = CategoriesPanel::new();

        panel.ensure_fetched(&api);
        wait_until_idle(|| panel.poll());
        panel.ensure_fetched(&api);
        wait_until_idle(|| panel.poll());

        assert_eq!(mock.category_fetches(), 1);
        assert_eq!(panel.categories().len(), 2);
        assert_eq!(panel.error(), None);
    }

    #[test]
    fn fetch_failure_sets_static_message() {
        let mock = MockApi::failing();
        let api: Arc<dyn CostApi> = mock;
        let mut panel = CategoriesPanel::new();

        panel.fetch_categories(&api);
        wait_until_idle(|| panel.poll());

        assert_eq!(panel.error(), Some(FETCH_FAILED));
        assert!(panel.categories().is_empty());
    }

    #[test]
    fn uploaded_sheet_becomes_charts() {
        let mock = MockApi::new();
        let api: Arc<dyn CostApi> = mock;
        let mut panel = CategoriesPanel::new();

        panel.upload_sheet(&api, PathBuf::from("costs.csv"));
        wait_until_idle(|| panel.poll());

        // The mock returns one bar chart and one unknown chart type.
        assert_eq!(panel.charts().len(), 1);
        assert_eq!(panel.charts()[0].title(), "Cost by Phase");
    }

    #[test]
    fn upload_failure_sets_static_message() {
        let mock = MockApi::failing();
        let api: Arc<dyn CostApi> = mock;
        let mut panel = CategoriesPanel::new();

        panel.upload_sheet(&api, PathBuf::from("costs.csv"));
        wait_until_idle(|| panel.poll());

        assert_eq!(panel.error(), Some(UPLOAD_FAILED));
    }
}
