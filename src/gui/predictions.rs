//! AI cost optimization assistant, automated predictions and cost forecast.

use crate::api::{ApiError, CostApi, QueryRequest, ServiceResponse, UNPARSEABLE_ANSWER};
use crate::charts::{dispatch, ChartConfig, ChartDescriptor, ChartKind, ChartPlan, Row, SeriesSpec};
use crate::gui::chart_viewer::ChartViewer;
use crate::gui::task::{take_finished, Pending};
use crate::gui::toast::Toasts;
use egui::{Color32, RichText};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

const QUERY_HINT: &str = "How can I reduce drilling costs for this well type in this region?";

pub struct Prediction {
    pub kind: &'static str,
    pub confidence: u8,
    pub recommendation: &'static str,
    pub impact: &'static str,
}

pub const PREDICTIONS: [Prediction; 4] = [
    Prediction {
        kind: "Cost Optimization",
        confidence: 87,
        recommendation: "Bulk purchasing of drilling mud could reduce costs by 12% ($18,000 savings)",
        impact: "High",
    },
    Prediction {
        kind: "Schedule Optimization",
        confidence: 92,
        recommendation: "Adjusting rig schedule to avoid peak season could save 8 days and $200,000",
        impact: "High",
    },
    Prediction {
        kind: "Risk Mitigation",
        confidence: 78,
        recommendation: "Weather patterns suggest 15% chance of delays in March - consider schedule buffer",
        impact: "Medium",
    },
    Prediction {
        kind: "Equipment Efficiency",
        confidence: 84,
        recommendation: "Rig X model shows 23% better performance for similar geology - consider upgrade",
        impact: "High",
    },
];

const FORECAST: [(&str, f64, Option<f64>); 6] = [
    ("Jan", 50_000.0, Some(48_000.0)),
    ("Feb", 120_000.0, Some(125_000.0)),
    ("Mar", 200_000.0, Some(195_000.0)),
    ("Apr", 280_000.0, None),
    ("May", 320_000.0, None),
    ("Jun", 350_000.0, None),
];

/// Badge color for a confidence percentage.
pub fn confidence_color(confidence: u8) -> Color32 {
    if confidence >= 85 {
        Color32::from_rgb(22, 163, 74)
    } else if confidence >= 70 {
        Color32::from_rgb(202, 138, 4)
    } else {
        Color32::from_rgb(220, 38, 38)
    }
}

/// The cost projection as a chart descriptor; months without actuals stay null.
pub fn forecast_descriptor() -> ChartDescriptor {
    let config = ChartConfig::new(ChartKind::Line, "Cost Projection Forecast")
        .with_x_axis("month", None)
        .with_series(SeriesSpec::new("predicted", "AI Predicted Costs").with_stroke("#8884d8"))
        .with_series(SeriesSpec::new("actual", "Actual Costs").with_stroke("#82ca9d"));

    let rows = FORECAST
        .iter()
        .map(|(month, predicted, actual)| {
            let mut row = Row::new();
            row.insert("month".to_string(), Value::from(*month));
            row.insert("predicted".to_string(), Value::from(*predicted));
            row.insert("actual".to_string(), actual.map(Value::from).unwrap_or(Value::Null));
            row
        })
        .collect();

    ChartDescriptor::new(config, rows)
}

pub enum PredictionsAction {
    None,
    Export(ChartPlan),
}

pub struct PredictionsPanel {
    pub input: String,
    answer: String,
    query: Option<Pending<Result<ServiceResponse, ApiError>>>,
    forecast: ChartViewer,
}

impl Default for PredictionsPanel {
    fn default() -> Self {
        let mut forecast = ChartViewer::new("forecast");
        forecast.set_plans(dispatch(&forecast_descriptor()).into_iter().collect());
        Self {
            input: String::new(),
            answer: String::new(),
            query: None,
            forecast,
        }
    }
}

impl PredictionsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn is_loading(&self) -> bool {
        self.query.is_some()
    }

    /// Send the current question. Blank input is rejected with a toast.
    pub fn submit(&mut self, api: &Arc<dyn CostApi>, toasts: &mut Toasts) {
        if self.query.is_some() {
            return;
        }
        if self.input.trim().is_empty() {
            toasts.info(
                "Input required",
                "Please enter a question about cost optimization",
            );
            return;
        }

        let api = Arc::clone(api);
        let request = QueryRequest::cost_question(&self.input);
        self.query = Some(Pending::spawn(move || api.query(&request)));
    }

    pub fn poll(&mut self, toasts: &mut Toasts) -> bool {
        let Some(result) = take_finished(&mut self.query) else {
            return self.is_loading();
        };

        match result {
            Some(Ok(response)) => self.answer = response.answer_text(),
            Some(Err(e)) if e.is_decode() => {
                warn!(error = %e, "undecodable prediction response");
                self.answer = UNPARSEABLE_ANSWER.to_string();
            }
            other => {
                if let Some(Err(e)) = other {
                    warn!(error = %e, "prediction request failed");
                }
                toasts.error(
                    "Prediction failed",
                    "Could not get AI prediction. Please try again.",
                );
                self.answer.clear();
            }
        }
        false
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        api: &Arc<dyn CostApi>,
        toasts: &mut Toasts,
    ) -> PredictionsAction {
        ui.label(RichText::new("AI Cost Optimization Assistant").size(16.0).strong());
        ui.add_space(5.0);
        ui.label("Ask for cost optimization insights:");
        ui.add(
            egui::TextEdit::singleline(&mut self.input)
                .hint_text(QUERY_HINT)
                .desired_width(f32::INFINITY),
        );

        let label = if self.is_loading() {
            "Analyzing..."
        } else {
            "Get AI Recommendations"
        };
        if ui
            .add_enabled(!self.is_loading(), egui::Button::new(label))
            .clicked()
        {
            self.submit(api, toasts);
        }

        if !self.answer.is_empty() {
            ui.add_space(8.0);
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .stroke(egui::Stroke::new(1.0, Color32::from_rgb(100, 149, 237)))
                .rounding(5.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new("AI Analysis & Recommendations:")
                            .strong()
                            .color(Color32::from_rgb(100, 149, 237)),
                    );
                    ui.label(&self.answer);
                });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.label(RichText::new("Automated Predictions").size(16.0).strong());
        ui.add_space(5.0);
        egui::Grid::new("automated_predictions")
            .num_columns(2)
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                for (idx, prediction) in PREDICTIONS.iter().enumerate() {
                    Self::prediction_card(ui, prediction);
                    if idx % 2 == 1 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        let mut action = PredictionsAction::None;
        if let Some(idx) = self.forecast.show(ui) {
            if let Some(plan) = self.forecast.plans().get(idx) {
                action = PredictionsAction::Export(plan.clone());
            }
        }
        ui.label(
            RichText::new("Predictions based on regional data, market trends, and historical performance")
                .size(11.0)
                .color(Color32::GRAY),
        );
        action
    }

    fn prediction_card(ui: &mut egui::Ui, prediction: &Prediction) {
        egui::Frame::none()
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(340.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(prediction.kind).strong());
                    ui.label(
                        RichText::new(format!("{}% confidence", prediction.confidence))
                            .size(11.0)
                            .color(confidence_color(prediction.confidence)),
                    );
                });
                ui.label(RichText::new(prediction.recommendation).size(12.0));
                ui.label(
                    RichText::new(format!("Impact: {}", prediction.impact))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::{wait_until_idle, MockApi};
    use crate::gui::toast::ToastKind;

    fn run_query(api: Arc<dyn CostApi>, input: &str) -> (PredictionsPanel, Toasts) {
        let mut panel = PredictionsPanel::new();
        let mut toasts = Toasts::new();
        panel.input = input.to_string();
        panel.submit(&api, &mut toasts);
        wait_until_idle(|| panel.poll(&mut toasts));
        (panel, toasts)
    }

    #[test]
    fn blank_input_is_rejected_locally() {
        let mock = MockApi::new();
        let (panel, toasts) = run_query(mock.clone(), "   ");

        assert_eq!(mock.queries(), 0);
        assert_eq!(toasts.items()[0].title, "Input required");
        assert!(panel.answer().is_empty());
    }

    #[test]
    fn answer_is_shown() {
        let (panel, toasts) = run_query(MockApi::new(), "cut mud costs?");
        assert_eq!(panel.answer(), "Answer to cut mud costs?");
        assert!(toasts.items().is_empty());
    }

    #[test]
    fn undecodable_answer_uses_fallback_text() {
        let (panel, toasts) = run_query(MockApi::new(), "garbled");
        assert_eq!(panel.answer(), UNPARSEABLE_ANSWER);
        assert!(toasts.items().is_empty());
    }

    #[test]
    fn request_failure_toasts_and_clears_answer() {
        let mut panel = PredictionsPanel::new();
        let mut toasts = Toasts::new();
        panel.answer = "stale".to_string();
        panel.input = "why?".to_string();

        let api: Arc<dyn CostApi> = MockApi::failing();
        panel.submit(&api, &mut toasts);
        wait_until_idle(|| panel.poll(&mut toasts));

        assert!(panel.answer().is_empty());
        assert_eq!(toasts.items()[0].title, "Prediction failed");
        assert_eq!(toasts.items()[0].kind, ToastKind::Destructive);
    }

    #[test]
    fn confidence_tiers() {
        assert_eq!(confidence_color(92), confidence_color(85));
        assert_eq!(confidence_color(78), confidence_color(70));
        assert_ne!(confidence_color(84), confidence_color(87));
        assert_ne!(confidence_color(69), confidence_color(70));
    }

    #[test]
    fn forecast_dispatches_to_line_with_gaps() {
        let Some(ChartPlan::Line(plan)) = dispatch(&forecast_descriptor()) else {
            panic!("forecast should be a line chart");
        };
        assert_eq!(plan.categories, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        assert_eq!(plan.series.len(), 2);
        assert_eq!(plan.series[1].name, "Actual Costs");
        assert_eq!(plan.series[1].values[2], Some(195_000.0));
        assert_eq!(plan.series[1].values[3], None);
    }
}
