//! Blocking HTTP client for the cost service.

use super::{ApiError, CostCategory, QueryRequest, ServiceResponse};
use crate::charts::ChartDescriptor;
use crate::config::AppConfig;
use reqwest::blocking::{multipart, Client, Response};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Operations the dashboard needs from the cost service.
pub trait CostApi: Send + Sync {
    /// Free-text cost optimization question.
    fn query(&self, request: &QueryRequest) -> Result<ServiceResponse, ApiError>;

    fn fetch_cost_categories(&self) -> Result<Vec<CostCategory>, ApiError>;

    /// Upload a cost sheet and receive charts generated from it.
    fn upload_cost_sheet(&self, path: &Path) -> Result<Vec<ChartDescriptor>, ApiError>;

    /// Store a document with the service. Returns the response carrying its id.
    fn upload_document(&self, path: &Path) -> Result<ServiceResponse, ApiError>;
}

/// `CostApi` over HTTP. Cookies are kept and sent with every request.
#[derive(Debug, Clone)]
pub struct HttpCostApi {
    base_url: String,
    client: Client,
}

impl HttpCostApi {
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout_ms.map(Duration::from_millis))
            .build()
            .map_err(ApiError::BuildClient)?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn file_form(path: &Path) -> Result<multipart::Form, ApiError> {
        multipart::Form::new()
            .file("file", path)
            .map_err(|source| ApiError::ReadFile {
                path: path.display().to_string(),
                source,
            })
    }

    fn decode(endpoint: &str, response: Response) -> Result<ServiceResponse, ApiError> {
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "cost service returned an error");
            return Err(ApiError::Status {
                code: status.as_u16(),
                body,
            });
        }
        debug!(endpoint, bytes = body.len(), "cost service response");
        ServiceResponse::from_body(&body)
    }
}

impl CostApi for HttpCostApi {
    fn query(&self, request: &QueryRequest) -> Result<ServiceResponse, ApiError> {
        info!(top_k = request.top_k, "sending cost query");
        let response = self.client.post(self.url("query")).json(request).send()?;
        Self::decode("query", response)
    }

    fn fetch_cost_categories(&self) -> Result<Vec<CostCategory>, ApiError> {
        info!("fetching cost categories");
        let response = self.client.get(self.url("cost-categories")).send()?;
        Ok(Self::decode("cost-categories", response)?.categories)
    }

    fn upload_cost_sheet(&self, path: &Path) -> Result<Vec<ChartDescriptor>, ApiError> {
        info!(file = %path.display(), "uploading cost sheet");
        let form = Self::file_form(path)?;
        let response = self
            .client
            .post(self.url("cost-categories"))
            .multipart(form)
            .send()?;
        Ok(Self::decode("cost-categories", response)?.charts)
    }

    fn upload_document(&self, path: &Path) -> Result<ServiceResponse, ApiError> {
        info!(file = %path.display(), "uploading document");
        let form = Self::file_form(path)?;
        let response = self.client.post(self.url("documents")).multipart(form).send()?;
        Self::decode("documents", response)
    }
}
