// src/probe/failure.rs
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Longest slice of a response body kept in diagnostics.
pub const BODY_SNIPPET_LEN: usize = 200;

/// Why a single check failed. These are values, not errors: a check returns
/// one and the runner records it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    MalformedBody(String),

    #[error("response is missing field `{0}`")]
    MissingField(String),

    #[error("unexpected value for `{field}`: {detail}")]
    UnexpectedValue { field: String, detail: String },

    #[error("server reported failure: {0}")]
    Rejected(String),

    #[error("could not prepare request: {0}")]
    Setup(String),

    #[error("check panicked: {0}")]
    Panicked(String),
}

/// Coarse grouping so a summary can tell "server down" apart from
/// "server up but answering wrong".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    Unreachable,
    Status,
    Shape,
    Internal,
}

impl FailureReason {
    pub fn category(&self) -> FailureCategory {
        match self {
            FailureReason::Transport(_) | FailureReason::Timeout(_) => FailureCategory::Unreachable,
            FailureReason::UnexpectedStatus { .. } => FailureCategory::Status,
            FailureReason::MalformedBody(_)
            | FailureReason::MissingField(_)
            | FailureReason::UnexpectedValue { .. }
            | FailureReason::Rejected(_) => FailureCategory::Shape,
            FailureReason::Setup(_) | FailureReason::Panicked(_) => FailureCategory::Internal,
        }
    }

    pub fn unexpected_value(field: impl Into<String>, detail: impl Into<String>) -> Self {
        FailureReason::UnexpectedValue {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for FailureReason {
    fn from(err: reqwest::Error) -> Self {
        FailureReason::Transport(err.to_string())
    }
}

impl From<std::io::Error> for FailureReason {
    fn from(err: std::io::Error) -> Self {
        FailureReason::Setup(err.to_string())
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureCategory::Unreachable => "unreachable",
            FailureCategory::Status => "bad status",
            FailureCategory::Shape => "bad response",
            FailureCategory::Internal => "internal",
        };
        f.write_str(label)
    }
}

/// First [`BODY_SNIPPET_LEN`] characters of `body`, with an ellipsis when cut.
pub fn snippet(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_SNIPPET_LEN).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
