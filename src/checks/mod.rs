// src/checks/mod.rs
mod api_info;
mod generate;
mod health;
mod search;
mod stats;
mod upload;

pub use api_info::ApiInfoCheck;
pub use generate::{GenerationRequest, ProjectGenerationCheck, REQUIRED_PROJECT_FIELDS};
pub use health::HealthCheck;
pub use search::{SearchCheck, SearchQuery};
pub use stats::SystemStatsCheck;
pub use upload::{FileUploadCheck, ScratchDocument, TEST_DOCUMENT, UPLOAD_FILENAME};

use crate::config::SmokeConfig;
use crate::probe::{ApiClient, FailureReason};
use async_trait::async_trait;
use serde::Serialize;

/// Everything a check may use: the bound client and the run configuration.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    pub client: ApiClient,
    pub config: SmokeConfig,
}

impl ProbeContext {
    pub fn new(config: SmokeConfig) -> anyhow::Result<Self> {
        let client = ApiClient::new(config.base_url.clone())?;
        Ok(Self { client, config })
    }
}

/// What a passing check saw. Notes are informational and never change the
/// outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Evidence {
    pub headline: String,
    pub notes: Vec<String>,
}

impl Evidence {
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            notes: Vec::new(),
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}

/// One named probe of a single endpoint.
///
/// Implementations report every expected problem through the returned
/// [`FailureReason`]; the runner additionally contains panics.
#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &str;

    async fn probe(&self, ctx: &ProbeContext) -> Result<Evidence, FailureReason>;
}

/// The suite, in run order.
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(HealthCheck),
        Box::new(ApiInfoCheck),
        Box::new(ProjectGenerationCheck),
        Box::new(FileUploadCheck),
        Box::new(SystemStatsCheck),
        Box::new(SearchCheck),
    ]
}
