//! Request and response payloads of the cost service.
//!
//! Every endpoint answers with some subset of one JSON object, so a single
//! `ServiceResponse` schema covers them all. Bodies that arrive as a JSON
//! string wrapping the real object are unwrapped once.

use super::ApiError;
use crate::charts::ChartDescriptor;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const NO_ANSWER: &str = "No answer available.";
pub const UNPARSEABLE_ANSWER: &str = "Sorry, could not parse a valid answer from the backend.";

/// Retrieval depth used for cost optimization questions.
pub const DEFAULT_TOP_K: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    pub query: String,
    pub top_k: u32,
    pub include_images: bool,
}

impl QueryRequest {
    pub fn cost_question(query: &str) -> Self {
        Self {
            query: query.to_string(),
            top_k: DEFAULT_TOP_K,
            include_images: false,
        }
    }
}

/// A cost category as listed by the service. Only `name` is displayed.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CostCategory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ServiceResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<CostCategory>,
    #[serde(default, deserialize_with = "drawable_charts")]
    pub charts: Vec<ChartDescriptor>,
    /// Identifier assigned to an uploaded document.
    #[serde(default)]
    pub id: Option<Value>,
}

impl ServiceResponse {
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        let value = match value {
            Value::String(inner) => serde_json::from_str(&inner)?,
            other => other,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// The answer text, or the fixed fallback when there is none.
    pub fn answer_text(&self) -> String {
        self.answer
            .as_deref()
            .map(str::trim)
            .filter(|answer| !answer.is_empty())
            .unwrap_or(NO_ANSWER)
            .to_string()
    }

    pub fn id_label(&self) -> String {
        match &self.id {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => "N/A".to_string(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode chart descriptors one by one; a malformed entry is skipped.
fn drawable_charts<'de, D>(deserializer: D) -> Result<Vec<ChartDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Value> = null_as_default(deserializer)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed chart descriptor");
                None
            }
        })
        .collect())
}
