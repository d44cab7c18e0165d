// src/checks/stats.rs
use super::{Check, Evidence, ProbeContext};
use crate::probe::{fields, FailureReason};
use async_trait::async_trait;

pub const PATH: &str = "/stats";

pub struct SystemStatsCheck;

#[async_trait]
impl Check for SystemStatsCheck {
    fn name(&self) -> &str {
        "System Statistics"
    }

    async fn probe(&self, ctx: &ProbeContext) -> Result<Evidence, FailureReason> {
        let request = ctx.client.get(PATH)?;
        let body = ctx
            .client
            .exchange(request, ctx.config.default_timeout())
            .await?
            .ok_json()?;

        fields::require_success(&body)?;
        let total_documents = fields::require_u64(&body, "data.total_documents")?;

        Ok(Evidence::new("System stats passed")
            .note(format!("📄 Total documents: {}", total_documents))
            .note(format!(
                "🚀 Projects generated: {}",
                fields::display(fields::lookup(&body, "data.total_projects_generated"), "0")
            ))
            .note(format!(
                "🏢 Available sectors: {}",
                fields::count(&body, "data.available_sectors")
            ))
            .note(format!(
                "🌍 Supported regions: {}",
                fields::count(&body, "data.supported_regions")
            )))
    }
}
