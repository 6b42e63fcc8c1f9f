use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{ConnectInfo, Request, State},
    http::{header, request::Parts},
    routing::any,
};
use serde::Serialize;
use tracing::info;

use crate::{
    AppState,
    system::{self, SystemInfo},
};

const SERVICE_NAME: &str = "devops-info-service";
const SERVICE_DESCRIPTION: &str = "DevOps course info service";
const FRAMEWORK: &str = "axum";

/// Service identity, fixed at compile time.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub framework: &'static str,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            description: SERVICE_DESCRIPTION,
            framework: FRAMEWORK,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RuntimeInfo {
    pub uptime_seconds: u64,
    pub uptime_human: String,
    pub current_time: String,
    pub timezone: &'static str,
}

impl RuntimeInfo {
    fn capture(started_at: Instant) -> Self {
        let seconds = system::uptime_seconds(started_at, Instant::now());
        Self {
            uptime_seconds: seconds,
            uptime_human: system::format_uptime(seconds),
            current_time: system::now_rfc3339(),
            timezone: "UTC",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestInfo {
    pub client_ip: String,
    pub user_agent: String,
    pub method: String,
    pub path: String,
}

impl RequestInfo {
    /// Peer address comes from the `ConnectInfo` extension; without one the
    /// field degrades to an empty string.
    fn from_parts(parts: &Parts) -> Self {
        let client_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.to_string())
            .unwrap_or_default();
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Self {
            client_ip,
            user_agent,
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

fn endpoint_catalog() -> Vec<Endpoint> {
    vec![
        Endpoint {
            path: "/",
            method: "GET",
            description: "Service information",
        },
        Endpoint {
            path: "/health",
            method: "GET",
            description: "Health check",
        },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct MainResponse {
    pub service: ServiceInfo,
    pub system: SystemInfo,
    pub runtime: RuntimeInfo,
    pub request: RequestInfo,
    pub endpoints: Vec<Endpoint>,
}

impl MainResponse {
    pub fn build(request: RequestInfo, started_at: Instant) -> Self {
        Self {
            service: ServiceInfo::default(),
            system: SystemInfo::collect(),
            runtime: RuntimeInfo::capture(started_at),
            request,
            endpoints: endpoint_catalog(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", any(service_info))
}

/// Main route, served for any HTTP method.
async fn service_info(State(state): State<AppState>, req: Request) -> Json<MainResponse> {
    info!("Request received: {} {}", req.method(), req.uri().path());
    let (parts, _) = req.into_parts();
    Json(MainResponse::build(
        RequestInfo::from_parts(&parts),
        state.started_at,
    ))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn app(started_at: Instant) -> Router {
        router().with_state(AppState { started_at })
    }

    fn get_root() -> Request<Body> {
        Request::builder().uri("/").body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_returns_service_identity_and_catalog() {
        let response = app(Instant::now()).oneshot(get_root()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body = body_json(response).await;
        assert_eq!(body["service"]["name"], "devops-info-service");
        assert_eq!(body["service"]["version"], "1.0.0");
        assert_eq!(body["service"]["framework"], "axum");

        let endpoints = body["endpoints"].as_array().unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0]["path"], "/");
        assert_eq!(endpoints[1]["path"], "/health");
    }

    #[tokio::test]
    async fn root_reports_host_and_runtime_facts() {
        let response = app(Instant::now()).oneshot(get_root()).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body["system"]["platform"], std::env::consts::OS);
        assert_eq!(body["system"]["architecture"], std::env::consts::ARCH);
        assert!(body["system"]["cpu_count"].as_u64().unwrap() >= 1);
        assert!(body["system"]["runtime_version"].as_str().is_some());

        assert_eq!(body["runtime"]["timezone"], "UTC");
        assert!(
            chrono::DateTime::parse_from_rfc3339(body["runtime"]["current_time"].as_str().unwrap())
                .is_ok()
        );
    }

    #[tokio::test]
    async fn root_echoes_request_metadata() {
        let started_at = Instant::now() - Duration::from_secs(65);
        let mut request = Request::builder()
            .uri("/")
            .header(header::USER_AGENT, "test-agent")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([203, 0, 113, 5], 54321))));

        let response = app(started_at).oneshot(request).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body["request"]["client_ip"], "203.0.113.5:54321");
        assert_eq!(body["request"]["user_agent"], "test-agent");
        assert_eq!(body["request"]["method"], "GET");
        assert_eq!(body["request"]["path"], "/");
        assert_eq!(body["runtime"]["uptime_seconds"], 65);
        assert_eq!(body["runtime"]["uptime_human"], "0 hours, 1 minutes");
    }

    #[tokio::test]
    async fn missing_peer_metadata_degrades_to_empty_strings() {
        let response = app(Instant::now()).oneshot(get_root()).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body["request"]["client_ip"], "");
        assert_eq!(body["request"]["user_agent"], "");
    }

    #[tokio::test]
    async fn root_accepts_any_method() {
        for method in ["GET", "POST", "PUT", "DELETE"] {
            let request = Request::builder()
                .method(method)
                .uri("/")
                .body(Body::empty())
                .unwrap();
            let response = app(Instant::now()).oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "method {method}");

            let body = body_json(response).await;
            assert_eq!(body["request"]["method"], method);
        }
    }

    #[tokio::test]
    async fn repeated_requests_are_stable() {
        let app = app(Instant::now());

        let first = body_json(app.clone().oneshot(get_root()).await.unwrap()).await;
        let second = body_json(app.oneshot(get_root()).await.unwrap()).await;

        assert_eq!(first["service"], second["service"]);
        assert_eq!(first["system"], second["system"]);
        assert_eq!(first["endpoints"], second["endpoints"]);
        assert_eq!(first["request"], second["request"]);

        let a = first["runtime"]["uptime_seconds"].as_u64().unwrap();
        let b = second["runtime"]["uptime_seconds"].as_u64().unwrap();
        assert!(b >= a);
    }
}
