// src/report/mod.rs
mod progress;
mod summary;

pub use progress::{ConsoleProgress, Progress, SilentProgress};
pub use summary::{render_json, render_summary, JsonCheck, JsonReport, RULE};
