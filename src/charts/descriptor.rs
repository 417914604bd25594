//! Chart Descriptor
//! Declarative chart payload as delivered by the cost service:
//! `{ chartConfig: { type, title, xAxis, yAxis, series }, data: [...] }`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One data row, keyed by field name.
pub type Row = Map<String, Value>;

/// Chart type. Anything the dashboard does not know deserializes to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxisSpec {
    #[serde(default)]
    pub data_key: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct YAxisSpec {
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    /// Rows without this key plot as gaps.
    #[serde(default)]
    pub data_key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default)]
    pub fill: Option<String>,
}

impl SeriesSpec {
    pub fn new(data_key: &str, name: &str) -> Self {
        Self {
            data_key: data_key.to_string(),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_stroke(mut self, color: &str) -> Self {
        self.stroke = Some(color.to_string());
        self
    }

    /// Legend name, falling back to the data key.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.data_key)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub x_axis: Option<XAxisSpec>,
    #[serde(default)]
    pub y_axis: Option<YAxisSpec>,
    #[serde(default)]
    pub series: Option<Vec<SeriesSpec>>,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, title: &str) -> Self {
        Self {
            kind,
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn with_x_axis(mut self, data_key: &str, label: Option<&str>) -> Self {
        self.x_axis = Some(XAxisSpec {
            data_key: data_key.to_string(),
            label: label.map(str::to_string),
        });
        self
    }

    pub fn with_series(mut self, series: SeriesSpec) -> Self {
        self.series.get_or_insert_with(Vec::new).push(series);
        self
    }

    pub fn series(&self) -> &[SeriesSpec] {
        self.series.as_deref().unwrap_or(&[])
    }
}

/// A chart request: configuration plus rows to plot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescriptor {
    #[serde(default)]
    pub chart_config: Option<ChartConfig>,
    #[serde(default)]
    pub data: Option<Vec<Row>>,
}

impl ChartDescriptor {
    pub fn new(chart_config: ChartConfig, data: Vec<Row>) -> Self {
        Self {
            chart_config: Some(chart_config),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_service_payload() {
        let descriptor: ChartDescriptor = serde_json::from_value(json!({
            "chartConfig": {
                "type": "bar",
                "title": "Cost by Phase",
                "xAxis": { "dataKey": "phase", "label": "Phase" },
                "yAxis": { "label": "USD" },
                "series": [
                    { "dataKey": "planned", "name": "Planned", "fill": "#8884d8" },
                    { "dataKey": "actual", "name": "Actual" }
                ]
            },
            "data": [ { "phase": "Drilling", "planned": 10, "actual": 12 } ]
        }))
        .unwrap();

        let config = descriptor.chart_config.unwrap();
        assert_eq!(config.kind, ChartKind::Bar);
        assert_eq!(config.x_axis.as_ref().unwrap().data_key, "phase");
        assert_eq!(config.series().len(), 2);
        assert_eq!(config.series()[0].fill.as_deref(), Some("#8884d8"));
        assert_eq!(descriptor.data.unwrap().len(), 1);
    }

    #[test]
    fn unrecognized_type_is_unknown() {
        let config: ChartConfig =
            serde_json::from_value(json!({ "type": "radar", "title": "x" })).unwrap();
        assert_eq!(config.kind, ChartKind::Unknown);
        assert!(config.series().is_empty());
    }

    #[test]
    fn missing_data_keys_default_to_empty() {
        let config: ChartConfig = serde_json::from_value(json!({
            "type": "bar",
            "xAxis": { "label": "Phase" },
            "series": [ { "name": "no key" } ]
        }))
        .unwrap();
        assert_eq!(config.x_axis.as_ref().unwrap().data_key, "");
        assert_eq!(config.series()[0].data_key, "");
        assert_eq!(config.series()[0].display_name(), "no key");
    }

    #[test]
    fn missing_parts_stay_empty() {
        let descriptor: ChartDescriptor = serde_json::from_value(json!({})).unwrap();
        assert!(descriptor.chart_config.is_none());
        assert!(descriptor.data.is_none());
    }
}
