// src/checks/search.rs
use super::{Check, Evidence, ProbeContext};
use crate::probe::{fields, FailureReason};
use async_trait::async_trait;
use serde::Serialize;

pub const PATH: &str = "/search";

/// Query string sent to `/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub q: String,
    pub sector: String,
    pub region: String,
    pub priority: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            q: "housing reconstruction".into(),
            sector: "infrastructure".into(),
            region: "vanuatu".into(),
            priority: "high".into(),
        }
    }
}

pub struct SearchCheck;

#[async_trait]
impl Check for SearchCheck {
    fn name(&self) -> &str {
        "Search Functionality"
    }

    async fn probe(&self, ctx: &ProbeContext) -> Result<Evidence, FailureReason> {
        let request = ctx.client.get(PATH)?.query(&SearchQuery::default());
        let body = ctx
            .client
            .exchange(request, ctx.config.default_timeout())
            .await?
            .ok_json()?;

        fields::require_success(&body)?;
        fields::require_object(&body, "data")?;

        Ok(Evidence::new("Search functionality passed")
            .note(format!(
                "🔍 Query: {}",
                fields::display(fields::lookup(&body, "data.query"), "N/A")
            ))
            .note(format!(
                "📊 Total matches: {}",
                fields::display(fields::lookup(&body, "data.total_matches"), "0")
            )))
    }
}
