// src/probe/mod.rs
mod client;
mod failure;
pub mod fields;

pub use client::{ApiClient, ApiResponse};
pub use failure::{snippet, FailureCategory, FailureReason, BODY_SNIPPET_LEN};
