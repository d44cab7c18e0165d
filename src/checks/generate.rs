// src/checks/generate.rs
use super::{Check, Evidence, ProbeContext};
use crate::probe::{fields, FailureReason};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub const PATH: &str = "/generate";

/// Fields every generated project is expected to carry.
pub const REQUIRED_PROJECT_FIELDS: [&str; 4] = ["title", "description", "sector", "budget"];

/// Body sent to `/generate`: a cyclone-recovery scenario for Vanuatu.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub query: String,
    pub disaster_type: String,
    pub region: String,
    pub max_projects: u32,
    pub sectors: Vec<String>,
    pub priority: String,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            query: "Generate disaster recovery projects for cyclone-affected communities in Pacific islands".into(),
            disaster_type: "cyclone".into(),
            region: "vanuatu".into(),
            max_projects: 3,
            sectors: vec!["housing".into(), "infrastructure".into()],
            priority: "high".into(),
        }
    }
}

pub struct ProjectGenerationCheck;

#[async_trait]
impl Check for ProjectGenerationCheck {
    fn name(&self) -> &str {
        "Project Generation"
    }

    async fn probe(&self, ctx: &ProbeContext) -> Result<Evidence, FailureReason> {
        let request = ctx.client.post(PATH)?.json(&GenerationRequest::default());
        let body = ctx
            .client
            .exchange(request, ctx.config.generation_timeout())
            .await?
            .ok_json()?;

        fields::require_success(&body)?;

        let projects = fields::require_array(&body, "data.projects")?;
        let first = projects.first().ok_or_else(|| {
            FailureReason::unexpected_value("data.projects", "expected at least one project")
        })?;

        let mut evidence = Evidence::new(format!(
            "Project generation passed: Generated {} projects",
            projects.len()
        ));

        for field in REQUIRED_PROJECT_FIELDS {
            if first.get(field).map_or(true, Value::is_null) {
                if ctx.config.strict_fields {
                    return Err(FailureReason::MissingField(format!(
                        "data.projects[0].{}",
                        field
                    )));
                }
                warn!(field, "Generated project is missing a field");
                evidence.push_note(format!("⚠️  Missing field in project: {}", field));
            }
        }

        Ok(evidence
            .note(format!(
                "📋 Sample project: {}",
                fields::display(first.get("title"), "No title")
            ))
            .note(format!(
                "💰 Budget: {}",
                fields::display(first.get("budget"), "Not specified")
            ))
            .note(format!(
                "🏢 Sector: {}",
                fields::display(first.get("sector"), "Not specified")
            )))
    }
}
