// src/report/progress.rs
use super::summary::{render_summary, RULE};
use crate::runner::{CheckOutcome, CheckRecord, RunResult};
use std::io::{self, Write};
use url::Url;

/// Receives run events as they happen.
pub trait Progress: Send {
    fn run_started(&mut self, suite: &str, base_url: &Url);
    fn check_started(&mut self, name: &str);
    fn check_finished(&mut self, record: &CheckRecord);
    fn run_finished(&mut self, result: &RunResult);
}

/// Human-readable progress lines on any writer, stdout by default.
pub struct ConsoleProgress<W: Write + Send> {
    out: W,
}

impl ConsoleProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Progress output is best effort; a closed stdout must not fail the run.
impl<W: Write + Send> Progress for ConsoleProgress<W> {
    fn run_started(&mut self, suite: &str, base_url: &Url) {
        let _ = writeln!(self.out, "🧪 {} - API Test Suite", suite);
        let _ = writeln!(self.out, "🌐 Target: {}", base_url);
        let _ = writeln!(self.out, "{}", RULE);
    }

    fn check_started(&mut self, name: &str) {
        let _ = writeln!(self.out, "\n🔬 Running {} Test...", name);
    }

    fn check_finished(&mut self, record: &CheckRecord) {
        match &record.outcome {
            CheckOutcome::Success(evidence) => {
                let _ = writeln!(self.out, "  ✅ {}", evidence.headline);
                for note in &evidence.notes {
                    let _ = writeln!(self.out, "  {}", note);
                }
                let _ = writeln!(self.out, "   ✅ {}: PASSED", record.name);
            }
            CheckOutcome::Failure(reason) => {
                let _ = writeln!(self.out, "  ❌ {} failed: {}", record.name, reason);
                let _ = writeln!(self.out, "   ❌ {}: FAILED", record.name);
            }
        }
        let _ = self.out.flush();
    }

    fn run_finished(&mut self, result: &RunResult) {
        let _ = write!(self.out, "\n{}", render_summary(result));
        let _ = self.out.flush();
    }
}

/// Discards all events; used for JSON output and in tests.
#[derive(Debug, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn run_started(&mut self, _suite: &str, _base_url: &Url) {}
    fn check_started(&mut self, _name: &str) {}
    fn check_finished(&mut self, _record: &CheckRecord) {}
    fn run_finished(&mut self, _result: &RunResult) {}
}
