// src/runner/mod.rs
mod result;
mod runner;

pub use result::{CheckOutcome, CheckRecord, RunResult};
pub use runner::TestRunner;
