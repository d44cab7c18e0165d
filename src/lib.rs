// src/lib.rs
pub mod checks;
pub mod config;
pub mod metrics;
pub mod probe;
pub mod report;
pub mod runner;
