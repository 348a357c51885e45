//! HTTP surface: dashboard pages, provider API, health and Prometheus metrics

use crate::sessions::SessionStore;
use crate::view;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use dashboard_lib::{
    health::{ComponentStatus, HealthRegistry},
    ApiResponse, DashboardMetrics, DashboardSession, DataProvider, FetchTicket, ProviderError,
    ResourceMetrics, SelectionError,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub health_registry: HealthRegistry,
    pub metrics: DashboardMetrics,
    pub provider: Arc<dyn DataProvider>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(
        health_registry: HealthRegistry,
        metrics: DashboardMetrics,
        provider: Arc<dyn DataProvider>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            health_registry,
            metrics,
            provider,
            sessions,
        }
    }
}

/// Run a fetch in the background so the page can render its busy state
fn dispatch(session: DashboardSession, ticket: FetchTicket) {
    tokio::spawn(async move {
        session.fulfil(ticket).await;
    });
}

fn view_location(id: &str) -> String {
    format!("/view/{id}")
}

/// Start a new page view
async fn index(State(state): State<Arc<AppState>>) -> Redirect {
    let session = state.sessions.create();
    let ticket = session.begin_clusters().await;
    let location = view_location(session.label());
    dispatch(session, ticket);
    Redirect::to(&location)
}

async fn show_view(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.sessions.get(&id) {
        Some(session) => {
            let snapshot = session.snapshot().await;
            Html(view::render_page(&id, &snapshot)).into_response()
        }
        None => Redirect::to("/").into_response(),
    }
}

async fn view_state(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.sessions.get(&id) {
        Some(session) => Json(session.snapshot().await).into_response(),
        None => (StatusCode::NOT_FOUND, "unknown view").into_response(),
    }
}

/// One selection change; an empty value clears the level
#[derive(Debug, Default, Deserialize)]
pub struct SelectParams {
    pub cluster: Option<String>,
    pub namespace: Option<String>,
    pub workload: Option<String>,
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

async fn select(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<SelectParams>,
) -> Response {
    let Some(session) = state.sessions.get(&id) else {
        return Redirect::to("/").into_response();
    };

    let outcome: Result<Option<FetchTicket>, SelectionError> =
        match (&params.cluster, &params.namespace, &params.workload) {
            (Some(cluster), None, None) => session.begin_cluster(non_empty(cluster)).await,
            (None, Some(namespace), None) => session.begin_namespace(non_empty(namespace)).await,
            (None, None, Some(workload)) => session.begin_workload(non_empty(workload)).await,
            _ => {
                return (
                    StatusCode::BAD_REQUEST,
                    "expected exactly one of cluster, namespace or workload",
                )
                    .into_response()
            }
        };

    match outcome {
        Ok(Some(ticket)) => {
            dispatch(session, ticket);
            Redirect::to(&view_location(&id)).into_response()
        }
        Ok(None) => Redirect::to(&view_location(&id)).into_response(),
        Err(e) => {
            warn!(view = %id, error = %e, "Rejected selection");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Envelope for a provider call; transport failures become a failed envelope
fn envelope<T: Serialize>(
    result: Result<ApiResponse<T>, ProviderError>,
    placeholder: impl FnOnce() -> T,
) -> Response {
    match result {
        Ok(response) => Json(response).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::failure(placeholder(), e.to_string())),
        )
            .into_response(),
    }
}

async fn list_clusters(State(state): State<Arc<AppState>>) -> Response {
    envelope(state.provider.get_clusters().await, Vec::new)
}

async fn list_namespaces(
    State(state): State<Arc<AppState>>,
    Path(cluster_id): Path<String>,
) -> Response {
    envelope(state.provider.get_namespaces(&cluster_id).await, Vec::new)
}

async fn list_workloads(
    State(state): State<Arc<AppState>>,
    Path(namespace_id): Path<String>,
) -> Response {
    envelope(state.provider.get_workloads(&namespace_id).await, Vec::new)
}

async fn workload_metrics(
    State(state): State<Arc<AppState>>,
    Path(workload_id): Path<String>,
) -> Response {
    envelope(
        state.provider.get_resource_metrics(&workload_id).await,
        ResourceMetrics::default,
    )
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!(error = %e, "Failed to encode metrics");
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/view/:id", get(show_view))
        .route("/view/:id/select", get(select))
        .route("/view/:id/state", get(view_state))
        .route("/api/v1/clusters", get(list_clusters))
        .route("/api/v1/clusters/:cluster_id/namespaces", get(list_namespaces))
        .route("/api/v1/namespaces/:namespace_id/workloads", get(list_workloads))
        .route("/api/v1/workloads/:workload_id/metrics", get(workload_metrics))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the HTTP server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting dashboard server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
