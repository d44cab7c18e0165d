// src/runner/result.rs
use crate::checks::Evidence;
use crate::probe::FailureReason;
use chrono::{DateTime, Utc};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// Outcome of a single check, as a value rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Success(Evidence),
    Failure(FailureReason),
}

impl CheckOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckOutcome::Success(_))
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            CheckOutcome::Failure(reason) => Some(reason),
            CheckOutcome::Success(_) => None,
        }
    }
}

impl From<Result<Evidence, FailureReason>> for CheckOutcome {
    fn from(result: Result<Evidence, FailureReason>) -> Self {
        match result {
            Ok(evidence) => CheckOutcome::Success(evidence),
            Err(reason) => CheckOutcome::Failure(reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckRecord {
    pub name: String,
    pub outcome: CheckOutcome,
    pub elapsed: Duration,
}

impl CheckRecord {
    pub fn passed(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Aggregate of one run. Built once all checks have finished and not
/// modified afterwards.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub run_id: Uuid,
    pub base_url: Url,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    records: Vec<CheckRecord>,
}

impl RunResult {
    pub fn new(
        run_id: Uuid,
        base_url: Url,
        started_at: DateTime<Utc>,
        records: Vec<CheckRecord>,
    ) -> Self {
        Self {
            run_id,
            base_url,
            started_at,
            finished_at: Utc::now(),
            records,
        }
    }

    pub fn records(&self) -> &[CheckRecord] {
        &self.records
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn passed(&self) -> usize {
        self.records.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Percentage of passing checks; `0.0` for an empty run.
    pub fn pass_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.passed() as f64 / self.total() as f64 * 100.0
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Process exit status: 0 only when every check passed.
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &FailureReason)> {
        self.records
            .iter()
            .filter_map(|r| r.outcome.failure().map(|reason| (r.name.as_str(), reason)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(name: &str, passed: bool) -> CheckRecord {
        let outcome = if passed {
            CheckOutcome::Success(Evidence::new("ok"))
        } else {
            CheckOutcome::Failure(FailureReason::Transport("connection refused".into()))
        };
        CheckRecord {
            name: name.to_string(),
            outcome,
            elapsed: Duration::from_millis(3),
        }
    }

    fn result_of(outcomes: &[bool]) -> RunResult {
        let records = outcomes
            .iter()
            .enumerate()
            .map(|(i, passed)| record(&format!("check-{}", i), *passed))
            .collect();
        RunResult::new(
            Uuid::new_v4(),
            Url::parse("http://localhost:8000").unwrap(),
            Utc::now(),
            records,
        )
    }

    #[test]
    fn mixed_run_counts() {
        let result = result_of(&[true, false, true, true]);
        assert_eq!(result.total(), 4);
        assert_eq!(result.passed(), 3);
        assert_eq!(result.failed(), 1);
        assert_eq!(result.pass_rate(), 75.0);
        assert_eq!(result.exit_code(), 1);

        let failures: Vec<&str> = result.failures().map(|(name, _)| name).collect();
        assert_eq!(failures, ["check-1"]);
    }

    #[test]
    fn empty_run_has_zero_rate() {
        let result = result_of(&[]);
        assert_eq!(result.pass_rate(), 0.0);
        assert!(result.finished_at >= result.started_at);
    }

    proptest! {
        #[test]
        fn passed_never_exceeds_total(outcomes in proptest::collection::vec(any::<bool>(), 0..32)) {
            let result = result_of(&outcomes);
            prop_assert_eq!(result.total(), outcomes.len());
            prop_assert!(result.passed() <= result.total());
            prop_assert_eq!(result.passed() + result.failed(), result.total());
        }

        #[test]
        fn exit_code_zero_iff_all_passed(outcomes in proptest::collection::vec(any::<bool>(), 1..32)) {
            let result = result_of(&outcomes);
            let all = outcomes.iter().all(|p| *p);
            prop_assert_eq!(result.exit_code() == 0, all);
            prop_assert_eq!(result.exit_code() == 0, result.passed() == result.total());
        }
    }
}
