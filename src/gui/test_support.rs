//! Shared helpers for UI state tests.

use crate::api::{ApiError, CostApi, CostCategory, QueryRequest, ServiceResponse};
use crate::charts::{ChartConfig, ChartDescriptor, ChartKind, Row, SeriesSpec};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// In-memory `CostApi`. A failing mock answers every call with HTTP 500.
#[derive(Default)]
pub struct MockApi {
    failing: bool,
    queries: AtomicUsize,
    category_fetches: AtomicUsize,
    documents: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            failing: true,
            ..Self::default()
        })
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn category_fetches(&self) -> usize {
        self.category_fetches.load(Ordering::SeqCst)
    }

    pub fn documents(&self) -> usize {
        self.documents.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.failing {
            Err(ApiError::Status {
                code: 500,
                body: "mock failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl CostApi for MockApi {
    fn query(&self, request: &QueryRequest) -> Result<ServiceResponse, ApiError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if request.query == "garbled" {
            return ServiceResponse::from_body("<html>");
        }
        Ok(ServiceResponse {
            answer: Some(format!("Answer to {}", request.query)),
            ..ServiceResponse::default()
        })
    }

    fn fetch_cost_categories(&self) -> Result<Vec<CostCategory>, ApiError> {
        self.category_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(["Drilling", "Completion"]
            .into_iter()
            .map(|name| CostCategory {
                name: Some(name.to_string()),
                ..CostCategory::default()
            })
            .collect())
    }

    fn upload_cost_sheet(&self, _path: &Path) -> Result<Vec<ChartDescriptor>, ApiError> {
        self.check()?;
        let mut row = Row::new();
        row.insert("phase".to_string(), Value::from("Drilling"));
        row.insert("cost".to_string(), Value::from(1200));

        let bar = ChartDescriptor::new(
            ChartConfig::new(ChartKind::Bar, "Cost by Phase")
                .with_x_axis("phase", Some("Phase"))
                .with_series(SeriesSpec::new("cost", "Cost")),
            vec![row],
        );
        let unknown = ChartDescriptor::new(ChartConfig::new(ChartKind::Unknown, "Radar"), vec![]);
        Ok(vec![bar, unknown])
    }

    fn upload_document(&self, _path: &Path) -> Result<ServiceResponse, ApiError> {
        self.check()?;
        let id = self.documents.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ServiceResponse {
            id: Some(Value::from(id)),
            ..ServiceResponse::default()
        })
    }
}

/// Call `poll` until it reports no pending work.
pub fn wait_until_idle(mut poll: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while poll() {
        assert!(Instant::now() < deadline, "background work did not finish");
        thread::sleep(Duration::from_millis(2));
    }
}

/// A fresh, empty directory under the system temp dir.
pub fn temp_dir() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "drillcost-ui-{}-{}",
        unique,
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write `content` to a fresh file named `name` in its own temp directory.
pub fn temp_file(name: &str, content: &[u8]) -> PathBuf {
    let path = temp_dir().join(name);
    std::fs::write(&path, content).unwrap();
    path
}
