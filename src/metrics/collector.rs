// src/metrics/collector.rs
use crate::runner::RunResult;
use anyhow::{Context, Result};
use prometheus::{Encoder, GaugeVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub struct MetricsRegistry {
    registry: Registry,
    collector: MetricsCollector,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = MetricsCollector::new(&registry)?;

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> &MetricsCollector {
        &self.collector
    }

    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

pub struct MetricsCollector {
    pub checks_total: IntGauge,
    pub checks_passed: IntGauge,
    pub check_success: IntGaugeVec,
    pub check_duration_seconds: GaugeVec,
    pub last_run_timestamp_seconds: IntGauge,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let checks_total =
            IntGauge::new("relief_smoke_checks_total", "Checks executed in the last run")?;
        registry.register(Box::new(checks_total.clone()))?;

        let checks_passed =
            IntGauge::new("relief_smoke_checks_passed", "Checks that passed in the last run")?;
        registry.register(Box::new(checks_passed.clone()))?;

        let check_success = IntGaugeVec::new(
            Opts::new(
                "relief_smoke_check_success",
                "Check outcome in the last run (1=passed, 0=failed)",
            ),
            &["check"],
        )?;
        registry.register(Box::new(check_success.clone()))?;

        let check_duration_seconds = GaugeVec::new(
            Opts::new(
                "relief_smoke_check_duration_seconds",
                "Wall time of each check in the last run",
            ),
            &["check"],
        )?;
        registry.register(Box::new(check_duration_seconds.clone()))?;

        let last_run_timestamp_seconds = IntGauge::new(
            "relief_smoke_last_run_timestamp_seconds",
            "Unix time the last run finished",
        )?;
        registry.register(Box::new(last_run_timestamp_seconds.clone()))?;

        Ok(Self {
            checks_total,
            checks_passed,
            check_success,
            check_duration_seconds,
            last_run_timestamp_seconds,
        })
    }

    pub fn record_run(&self, result: &RunResult) {
        self.checks_total.set(result.total() as i64);
        self.checks_passed.set(result.passed() as i64);

        for record in result.records() {
            let value = if record.passed() { 1 } else { 0 };
            self.check_success
                .with_label_values(&[record.name.as_str()])
                .set(value);
            self.check_duration_seconds
                .with_label_values(&[record.name.as_str()])
                .set(record.elapsed.as_secs_f64());
        }

        self.last_run_timestamp_seconds
            .set(result.finished_at.timestamp());
    }
}

/// Write `result` in Prometheus text format for a node-exporter textfile
/// collector. The file is replaced atomically so a scrape never sees half of it.
pub async fn write_textfile(path: &Path, result: &RunResult) -> Result<()> {
    let metrics = MetricsRegistry::new()?;
    metrics.collector().record_run(result);
    let contents = metrics.gather()?;

    let staging = staging_path(path);
    tokio::fs::write(&staging, &contents)
        .await
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    tokio::fs::rename(&staging, path)
        .await
        .with_context(|| format!("Failed to move metrics into {}", path.display()))?;

    tracing::debug!(path = %path.display(), "Metrics written");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Evidence;
    use crate::probe::FailureReason;
    use crate::runner::{CheckOutcome, CheckRecord};
    use chrono::Utc;
    use std::time::Duration;
    use url::Url;
    use uuid::Uuid;

    fn sample_run() -> RunResult {
        RunResult::new(
            Uuid::new_v4(),
            Url::parse("http://localhost:8000").unwrap(),
            Utc::now(),
            vec![
                CheckRecord {
                    name: "Health Check".into(),
                    outcome: CheckOutcome::Success(Evidence::new("ok")),
                    elapsed: Duration::from_millis(250),
                },
                CheckRecord {
                    name: "Search Functionality".into(),
                    outcome: CheckOutcome::Failure(FailureReason::Timeout(Duration::from_secs(5))),
                    elapsed: Duration::from_secs(5),
                },
            ],
        )
    }

    #[test]
    fn encodes_one_sample_per_check() {
        let metrics = MetricsRegistry::new().unwrap();
        metrics.collector().record_run(&sample_run());
        let text = String::from_utf8(metrics.gather().unwrap()).unwrap();

        assert!(text.contains("relief_smoke_checks_total 2"));
        assert!(text.contains("relief_smoke_checks_passed 1"));
        assert!(text.contains(r#"relief_smoke_check_success{check="Health Check"} 1"#));
        assert!(text.contains(r#"relief_smoke_check_success{check="Search Functionality"} 0"#));
        assert!(text.contains(r#"relief_smoke_check_duration_seconds{check="Health Check"} 0.25"#));
    }

    #[tokio::test]
    async fn textfile_replaces_target_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relief_smoke.prom");
        std::fs::write(&path, "stale").unwrap();

        write_textfile(&path, &sample_run()).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("relief_smoke_checks_total 2"));
        assert!(!staging_path(&path).exists());
    }
}
