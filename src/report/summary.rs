// src/report/summary.rs
use crate::probe::FailureCategory;
use crate::runner::{CheckOutcome, RunResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use uuid::Uuid;

pub const RULE: &str = "============================================================";

/// Final block printed after the last check.
pub fn render_summary(result: &RunResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "🎯 Test Results: {}/{} tests passed ({:.1}%)",
        result.passed(),
        result.total(),
        result.pass_rate()
    );

    if result.all_passed() {
        let _ = writeln!(out, "🎉 All tests passed! API is fully functional.");
        return out;
    }

    let _ = writeln!(
        out,
        "⚠️  {} test(s) failed. Review errors above.",
        result.failed()
    );
    for (name, reason) in result.failures() {
        let _ = writeln!(out, "   • {} [{}]: {}", name, reason.category(), reason);
    }
    out
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub run_id: Uuid,
    pub base_url: &'a str,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
    pub checks: Vec<JsonCheck<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonCheck<'a> {
    pub name: &'a str,
    pub passed: bool,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<&'a str>,
    #[serde(skip_serializing_if = "no_notes")]
    pub notes: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FailureCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn no_notes(notes: &&[String]) -> bool {
    notes.is_empty()
}

impl<'a> From<&'a RunResult> for JsonReport<'a> {
    fn from(result: &'a RunResult) -> Self {
        let checks = result
            .records()
            .iter()
            .map(|record| {
                let elapsed_ms = record.elapsed.as_millis() as u64;
                match &record.outcome {
                    CheckOutcome::Success(evidence) => JsonCheck {
                        name: &record.name,
                        passed: true,
                        elapsed_ms,
                        headline: Some(evidence.headline.as_str()),
                        notes: &evidence.notes,
                        category: None,
                        reason: None,
                    },
                    CheckOutcome::Failure(reason) => JsonCheck {
                        name: &record.name,
                        passed: false,
                        elapsed_ms,
                        headline: None,
                        notes: &[],
                        category: Some(reason.category()),
                        reason: Some(reason.to_string()),
                    },
                }
            })
            .collect();

        Self {
            run_id: result.run_id,
            base_url: result.base_url.as_str(),
            started_at: result.started_at,
            finished_at: result.finished_at,
            total: result.total(),
            passed: result.passed(),
            failed: result.failed(),
            pass_rate: result.pass_rate(),
            checks,
        }
    }
}

pub fn render_json(result: &RunResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::from(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Evidence;
    use crate::probe::FailureReason;
    use crate::runner::CheckRecord;
    use std::time::Duration;
    use url::Url;

    fn run_with(outcomes: Vec<(&str, CheckOutcome)>) -> RunResult {
        let records = outcomes
            .into_iter()
            .map(|(name, outcome)| CheckRecord {
                name: name.to_string(),
                outcome,
                elapsed: Duration::from_millis(12),
            })
            .collect();
        RunResult::new(
            Uuid::new_v4(),
            Url::parse("http://localhost:8000").unwrap(),
            Utc::now(),
            records,
        )
    }

    #[test]
    fn all_passing_summary() {
        let names = [
            "Health Check",
            "API Info",
            "Project Generation",
            "File Upload",
            "System Statistics",
            "Search Functionality",
        ];
        let result = run_with(
            names
                .iter()
                .map(|n| (*n, CheckOutcome::Success(Evidence::new("ok"))))
                .collect(),
        );

        let text = render_summary(&result);
        assert!(text.contains("6/6 tests passed (100.0%)"));
        assert!(text.contains("All tests passed!"));
    }

    #[test]
    fn failing_summary_names_reason_and_category() {
        let result = run_with(vec![
            ("Health Check", CheckOutcome::Success(Evidence::new("ok"))),
            (
                "Project Generation",
                CheckOutcome::Failure(FailureReason::unexpected_value(
                    "data.projects",
                    "expected at least one project",
                )),
            ),
            (
                "Search Functionality",
                CheckOutcome::Failure(FailureReason::Transport("connection refused".into())),
            ),
        ]);

        let text = render_summary(&result);
        assert!(text.contains("1/3 tests passed (33.3%)"));
        assert!(text.contains("2 test(s) failed"));
        assert!(text.contains("Project Generation [bad response]"));
        assert!(text.contains("Search Functionality [unreachable]: transport error: connection refused"));
    }

    #[test]
    fn json_report_fields() {
        let result = run_with(vec![
            (
                "Health Check",
                CheckOutcome::Success(Evidence::new("Health check passed: ok").note("extra")),
            ),
            (
                "File Upload",
                CheckOutcome::Failure(FailureReason::UnexpectedStatus {
                    status: 413,
                    body: "too large".into(),
                }),
            ),
        ]);

        let value: serde_json::Value =
            serde_json::from_str(&render_json(&result).unwrap()).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["passed"], 1);
        assert_eq!(value["pass_rate"], 50.0);
        assert_eq!(value["base_url"], "http://localhost:8000/");
        assert_eq!(value["checks"][0]["notes"][0], "extra");
        assert!(value["checks"][0].get("reason").is_none());
        assert_eq!(value["checks"][1]["category"], "status");
        assert_eq!(value["checks"][1]["elapsed_ms"], 12);
        assert!(value["checks"][1].get("notes").is_none());
    }
}
