// src/checks/api_info.rs
use super::{Check, Evidence, ProbeContext};
use crate::probe::{fields, FailureReason};
use async_trait::async_trait;

pub const PATH: &str = "/api";

pub struct ApiInfoCheck;

#[async_trait]
impl Check for ApiInfoCheck {
    fn name(&self) -> &str {
        "API Info"
    }

    async fn probe(&self, ctx: &ProbeContext) -> Result<Evidence, FailureReason> {
        let request = ctx.client.get(PATH)?;
        let body = ctx
            .client
            .exchange(request, ctx.config.default_timeout())
            .await?
            .ok_json()?;

        fields::require_success(&body)?;

        let message = fields::require_str(&body, "message")?;
        if !message.contains(ctx.config.service_name.as_str()) {
            return Err(FailureReason::unexpected_value(
                "message",
                format!("expected it to mention `{}`", ctx.config.service_name),
            ));
        }

        let name = fields::require_str(&body, "data.name")?;
        Ok(Evidence::new(format!("API info passed: {}", name)))
    }
}
