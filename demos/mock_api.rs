//! demos/mock_api.rs
//! Stand-in for the Resilience2Relief AI service, for running the smoke
//! suite locally.
//! Run: cargo run --example mock_api -- [port]
//! Then: cargo run -- --base-url http://127.0.0.1:8000 --no-wait

use hyper::{
    body::to_bytes,
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, Server, StatusCode,
};
use rand::Rng;
use serde_json::{json, Value};
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::sleep;

#[derive(Clone)]
struct MockState {
    documents: Arc<AtomicU64>,
    generated: Arc<AtomicU64>,
    base_delay: u64,
    fail_pct: f64,
}

fn json_response(status: StatusCode, body: Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ——————————————————————————————————————————
// Request handler
async fn handle(req: Request<Body>, state: MockState) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let query = req.uri().query().unwrap_or_default().to_owned();

    // /health is always fast and never fails
    if method == Method::GET && path == "/health" {
        return Ok(json_response(StatusCode::OK, json!({"status": "healthy"})));
    }

    if state.base_delay > 0 {
        sleep(Duration::from_millis(state.base_delay)).await;
    }

    if state.fail_pct > 0.0 && rand::thread_rng().gen_bool(state.fail_pct / 100.0) {
        return Ok(json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"success": false, "message": "Injected failure"}),
        ));
    }

    let response = match (method, path.as_str()) {
        (Method::GET, "/api") => json_response(
            StatusCode::OK,
            json!({
                "success": true,
                "message": "Welcome to the Resilience2Relief AI API",
                "data": {"name": "Resilience2Relief AI", "version": "0.1.0-mock"}
            }),
        ),
        (Method::POST, "/generate") => {
            let body = to_bytes(req.into_body()).await.unwrap_or_default();
            let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            let count = request["max_projects"].as_u64().unwrap_or(1).clamp(1, 10);
            let region = request["region"].as_str().unwrap_or("pacific").to_owned();
            state.generated.fetch_add(count, Ordering::SeqCst);

            let projects: Vec<Value> = (1..=count)
                .map(|n| {
                    json!({
                        "title": format!("Recovery project {} for {}", n, region),
                        "description": "Mock project generated for smoke testing",
                        "sector": "housing",
                        "budget": 1_000_000 * n,
                    })
                })
                .collect();
            json_response(
                StatusCode::OK,
                json!({"success": true, "data": {"projects": projects}}),
            )
        }
        (Method::POST, "/upload") => {
            let body = to_bytes(req.into_body()).await.unwrap_or_default();
            let text = String::from_utf8_lossy(&body);
            let filename = text
                .split("filename=\"")
                .nth(1)
                .and_then(|rest| rest.split('"').next())
                .unwrap_or("upload.bin")
                .to_owned();
            state.documents.fetch_add(1, Ordering::SeqCst);
            json_response(
                StatusCode::OK,
                json!({"success": true, "data": {"filename": filename, "file_size": body.len()}}),
            )
        }
        (Method::GET, "/stats") => json_response(
            StatusCode::OK,
            json!({
                "success": true,
                "data": {
                    "total_documents": state.documents.load(Ordering::SeqCst),
                    "total_projects_generated": state.generated.load(Ordering::SeqCst),
                    "available_sectors": ["housing", "infrastructure", "health", "education"],
                    "supported_regions": ["vanuatu", "fiji", "tonga", "samoa"]
                }
            }),
        ),
        (Method::GET, "/search") => {
            let q = query
                .split('&')
                .find_map(|pair| pair.strip_prefix("q="))
                .unwrap_or_default()
                .replace('+', " ");
            json_response(
                StatusCode::OK,
                json!({"success": true, "data": {"query": q, "total_matches": 0, "results": []}}),
            )
        }
        _ => json_response(
            StatusCode::NOT_FOUND,
            json!({"success": false, "message": format!("No route for {}", path)}),
        ),
    };

    Ok(response)
}

// ——————————————————————————————————————————
// Main
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port: u16 = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "8000".into())
        .parse()?;

    let base_delay =
        std::env::var("BASE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(0);
    let fail_pct =
        std::env::var("FAIL_PCT").ok().and_then(|v| v.parse().ok()).unwrap_or(0.0);

    let state = MockState {
        documents: Arc::new(AtomicU64::new(0)),
        generated: Arc::new(AtomicU64::new(0)),
        base_delay,
        fail_pct,
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let make_svc = make_service_fn(move |_conn| {
        let st = state.clone();
        async move { Ok::<_, Infallible>(service_fn(move |req| handle(req, st.clone()))) }
    });

    println!(
        "Mock Resilience2Relief AI on http://{}  [delay={}ms fail={} %]",
        addr, base_delay, fail_pct
    );

    Server::bind(&addr).serve(make_svc).await?;
    Ok(())
}
