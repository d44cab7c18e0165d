// src/metrics/mod.rs
mod collector;

pub use collector::{write_textfile, MetricsCollector, MetricsRegistry};
