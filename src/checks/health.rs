// src/checks/health.rs
use super::{Check, Evidence, ProbeContext};
use crate::probe::{fields, FailureReason};
use async_trait::async_trait;

pub const PATH: &str = "/health";

pub struct HealthCheck;

#[async_trait]
impl Check for HealthCheck {
    fn name(&self) -> &str {
        "Health Check"
    }

    async fn probe(&self, ctx: &ProbeContext) -> Result<Evidence, FailureReason> {
        let request = ctx.client.get(PATH)?;
        let body = ctx
            .client
            .exchange(request, ctx.config.default_timeout())
            .await?
            .ok_json()?;

        let status = fields::require_str(&body, "status")?;
        Ok(Evidence::new(format!("Health check passed: {}", status)))
    }
}
