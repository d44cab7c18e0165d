// src/runner/runner.rs
use super::result::{CheckOutcome, CheckRecord, RunResult};
use crate::checks::{default_checks, Check, ProbeContext};
use crate::config::SmokeConfig;
use crate::probe::FailureReason;
use crate::report::Progress;
use anyhow::{ensure, Result};
use chrono::Utc;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Runs a fixed, ordered list of checks once each, one after another.
pub struct TestRunner {
    ctx: ProbeContext,
    checks: Vec<Box<dyn Check>>,
}

impl TestRunner {
    pub fn new(config: SmokeConfig, checks: Vec<Box<dyn Check>>) -> Result<Self> {
        ensure!(!checks.is_empty(), "a smoke run needs at least one check");
        let ctx = ProbeContext::new(config)?;
        Ok(Self { ctx, checks })
    }

    pub fn with_default_checks(config: SmokeConfig) -> Result<Self> {
        Self::new(config, default_checks())
    }

    /// Execute every check and aggregate the outcomes. Never fails: a check
    /// that errors or panics is recorded as a failure and the run moves on.
    pub async fn run(&self, progress: &mut dyn Progress) -> RunResult {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let base_url = self.ctx.client.base_url().clone();
        let span = info_span!("smoke_run", %run_id, base_url = %base_url);

        async {
            progress.run_started(&self.ctx.config.service_name, &base_url);

            let mut records = Vec::with_capacity(self.checks.len());
            for check in &self.checks {
                let name = check.name().to_string();
                progress.check_started(&name);

                let start = Instant::now();
                let outcome = run_isolated(check.as_ref(), &self.ctx).await;
                let elapsed = start.elapsed();

                match &outcome {
                    CheckOutcome::Success(_) => {
                        info!(check = %name, elapsed_ms = elapsed.as_millis() as u64, "Check passed")
                    }
                    CheckOutcome::Failure(reason) => warn!(
                        check = %name,
                        category = %reason.category(),
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Check failed: {}",
                        reason
                    ),
                }

                let record = CheckRecord {
                    name,
                    outcome,
                    elapsed,
                };
                progress.check_finished(&record);
                records.push(record);
            }

            let result = RunResult::new(run_id, base_url.clone(), started_at, records);
            info!(
                passed = result.passed(),
                total = result.total(),
                "Smoke run complete"
            );
            progress.run_finished(&result);
            result
        }
        .instrument(span)
        .await
    }
}

/// Run one check, turning a panic inside it into a recorded failure.
async fn run_isolated(check: &dyn Check, ctx: &ProbeContext) -> CheckOutcome {
    match AssertUnwindSafe(check.probe(ctx)).catch_unwind().await {
        Ok(result) => result.into(),
        Err(payload) => CheckOutcome::Failure(FailureReason::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
