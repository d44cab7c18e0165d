// tests/common/mod.rs
#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use relief_smoke::checks::{Check, ProbeContext};
use relief_smoke::config::SmokeConfig;
use relief_smoke::report::SilentProgress;
use relief_smoke::runner::{CheckOutcome, RunResult, TestRunner};
use serde_json::{json, Value};
use url::Url;

pub fn config_for(base_url: &str) -> SmokeConfig {
    let mut config = SmokeConfig::for_base_url(Url::parse(base_url).unwrap());
    config.default_timeout_secs = 2;
    config.upload_timeout_secs = 2;
    config.generation_timeout_secs = 2;
    config
}

pub async fn run_quiet(config: SmokeConfig, checks: Vec<Box<dyn Check>>) -> RunResult {
    let runner = TestRunner::new(config, checks).unwrap();
    runner.run(&mut SilentProgress).await
}

pub async fn probe_once(
    check: &dyn Check,
    config: SmokeConfig,
) -> CheckOutcome {
    let ctx = ProbeContext::new(config).unwrap();
    check.probe(&ctx).await.into()
}

pub fn outcome_of<'a>(result: &'a RunResult, name: &str) -> &'a CheckOutcome {
    &result
        .records()
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no record for {}", name))
        .outcome
}

pub fn search_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("q".into(), "housing reconstruction".into()),
        Matcher::UrlEncoded("sector".into(), "infrastructure".into()),
        Matcher::UrlEncoded("region".into(), "vanuatu".into()),
        Matcher::UrlEncoded("priority".into(), "high".into()),
    ])
}

pub fn sample_project() -> Value {
    json!({
        "title": "Cyclone-resilient housing for Efate",
        "description": "Rebuild 400 homes to category 5 wind standards",
        "sector": "housing",
        "budget": 2500000
    })
}

pub async fn json_mock(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: usize,
    body: Value,
) -> Mock {
    server
        .mock(method, path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Mocks for all six endpoints answering the way a healthy service does.
pub async fn healthy_api(server: &mut ServerGuard) -> Vec<Mock> {
    let mut mocks = vec![
        json_mock(server, "GET", "/health", 200, json!({"status": "healthy"})).await,
        json_mock(
            server,
            "GET",
            "/api",
            200,
            json!({
                "success": true,
                "message": "Welcome to the Resilience2Relief AI API",
                "data": {"name": "Resilience2Relief AI", "version": "1.0.0"}
            }),
        )
        .await,
        json_mock(
            server,
            "GET",
            "/stats",
            200,
            json!({
                "success": true,
                "data": {
                    "total_documents": 12,
                    "total_projects_generated": 40,
                    "available_sectors": ["housing", "infrastructure", "health"],
                    "supported_regions": ["vanuatu", "fiji"]
                }
            }),
        )
        .await,
    ];

    mocks.push(
        server
            .mock("POST", "/generate")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "disaster_type": "cyclone",
                "region": "vanuatu",
                "max_projects": 3,
                "sectors": ["housing", "infrastructure"],
                "priority": "high"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"success": true, "data": {"projects": [sample_project()]}}).to_string())
            .create_async()
            .await,
    );

    mocks.push(
        server
            .mock("POST", "/upload")
            .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
            .match_body(Matcher::Regex(r#"filename="test_document.txt""#.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"success": true, "data": {"filename": "test_document.txt", "file_size": 331}})
                    .to_string(),
            )
            .create_async()
            .await,
    );

    mocks.push(
        server
            .mock("GET", "/search")
            .match_query(search_query())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": true,
                    "data": {"query": "housing reconstruction", "total_matches": 4, "results": []}
                })
                .to_string(),
            )
            .create_async()
            .await,
    );

    mocks
}
