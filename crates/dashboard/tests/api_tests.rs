//! Integration tests for the dashboard HTTP endpoints

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use dashboard_lib::{
    health::{components, HealthRegistry},
    DashboardMetrics, DataProvider, InstrumentedProvider, MockProvider,
};
use resource_dashboard::{
    api::{create_router, AppState},
    sessions::SessionStore,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn setup_test_app() -> (Router, Arc<AppState>) {
    let health_registry = HealthRegistry::new();
    health_registry.register(components::PROVIDER).await;
    health_registry.register(components::SESSIONS).await;

    let metrics = DashboardMetrics::new();
    let provider: Arc<dyn DataProvider> = Arc::new(InstrumentedProvider::new(
        MockProvider::instant(),
        metrics.clone(),
        health_registry.clone(),
    ));
    let sessions = Arc::new(SessionStore::new(
        provider.clone(),
        Duration::from_secs(60),
        metrics.clone(),
    ));

    let state = Arc::new(AppState::new(health_registry, metrics, provider, sessions));
    let router = create_router(state.clone());

    (router, state)
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

/// Poll the view state until no level is busy
async fn settled_state(app: &Router, view: &str) -> serde_json::Value {
    for _ in 0..100 {
        let state = body_json(get(app, &format!("{view}/state")).await).await;
        let loading = &state["loading"];
        let busy = ["clusters", "namespaces", "workloads", "metrics"]
            .iter()
            .any(|level| loading[level] == true);
        if !busy {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("view {view} never settled");
}

/// Open a new page view and wait for the cluster list
async fn open_view(app: &Router) -> String {
    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let view = location(&response);
    assert!(view.starts_with("/view/"));
    settled_state(app, &view).await;
    view
}

async fn select(app: &Router, view: &str, query: &str) -> axum::response::Response {
    get(app, &format!("{view}/select?{query}")).await
}

fn names(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

mod provider_api {
    use super::*;

    #[tokio::test]
    async fn test_clusters_envelope() {
        let (app, _state) = setup_test_app().await;

        let response = get(&app, "/api/v1/clusters").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Clusters fetched successfully");
        assert_eq!(
            names(&json["data"]),
            vec!["Production EKS", "Staging EKS", "Development EKS"]
        );
        assert_eq!(json["data"][0]["status"], "active");
    }

    #[tokio::test]
    async fn test_namespaces_for_unknown_cluster_are_empty() {
        let (app, _state) = setup_test_app().await;

        let json = body_json(get(&app, "/api/v1/clusters/cluster-9/namespaces").await).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([]));

        let json = body_json(get(&app, "/api/v1/clusters/cluster-1/namespaces").await).await;
        assert_eq!(
            names(&json["data"]),
            vec!["default", "kube-system", "monitoring", "ingress-nginx"]
        );
        assert_eq!(json["data"][0]["clusterId"], "cluster-1");
        assert_eq!(json["data"][0]["resourceCount"], 12);
    }

    #[tokio::test]
    async fn test_workloads_envelope_uses_type_field() {
        let (app, _state) = setup_test_app().await;

        let json = body_json(get(&app, "/api/v1/namespaces/ns-1/workloads").await).await;
        assert_eq!(
            names(&json["data"]),
            vec!["web-frontend", "api-backend", "redis-cache", "log-collector"]
        );
        assert_eq!(json["data"][3]["type"], "daemonset");
        assert_eq!(json["data"][3]["namespaceId"], "ns-1");
    }

    #[tokio::test]
    async fn test_metrics_envelope_success_and_failure() {
        let (app, _state) = setup_test_app().await;

        let json = body_json(get(&app, "/api/v1/workloads/wl-1/metrics").await).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["cpu"]["current"], 2.5);
        assert_eq!(json["data"]["costPerMonth"]["recommended"], 172.8);

        let response = get(&app, "/api/v1/workloads/wl-404/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Resource metrics not found");
        assert_eq!(json["data"]["cpu"]["current"], 0.0);
    }
}

mod dashboard_flow {
    use super::*;

    #[tokio::test]
    async fn test_new_view_loads_clusters() {
        let (app, _state) = setup_test_app().await;
        let view = open_view(&app).await;

        let state = settled_state(&app, &view).await;
        assert_eq!(state["clusters"].as_array().unwrap().len(), 3);
        assert!(state["selectedCluster"].is_null());

        let page = body_text(get(&app, &view).await).await;
        assert!(page.contains("Cluster Resource Manager"));
        assert!(page.contains("Select a Workload"));
        assert!(page.contains("Production EKS (us-east-1)"));
    }

    #[tokio::test]
    async fn test_walk_to_web_frontend_comparison() {
        let (app, _state) = setup_test_app().await;
        let view = open_view(&app).await;

        let response = select(&app, &view, "cluster=cluster-1").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), view);
        let state = settled_state(&app, &view).await;
        assert_eq!(
            names(&state["namespaces"]),
            vec!["default", "kube-system", "monitoring", "ingress-nginx"]
        );

        select(&app, &view, "namespace=ns-1").await;
        let state = settled_state(&app, &view).await;
        assert_eq!(
            names(&state["workloads"]),
            vec!["web-frontend", "api-backend", "redis-cache", "log-collector"]
        );

        select(&app, &view, "workload=wl-1").await;
        let state = settled_state(&app, &view).await;
        assert_eq!(state["metrics"]["cpu"]["recommended"], 1.8);

        let page = body_text(get(&app, &view).await).await;
        assert!(page.contains("Current Resources"));
        assert!(page.contains("Recommended Resources"));
        assert!(page.contains("Potential Savings: $72.80/month (29.6%)"));
        assert!(page.contains("28.0%"));
    }

    #[tokio::test]
    async fn test_workload_without_metrics_shows_no_data() {
        let (app, _state) = setup_test_app().await;
        let view = open_view(&app).await;

        select(&app, &view, "cluster=cluster-1").await;
        settled_state(&app, &view).await;
        select(&app, &view, "namespace=ns-1").await;
        settled_state(&app, &view).await;
        select(&app, &view, "workload=wl-4").await;
        let state = settled_state(&app, &view).await;
        assert!(state["metrics"].is_null());

        let page = body_text(get(&app, &view).await).await;
        assert!(page.contains("No Data Available"));
    }

    #[tokio::test]
    async fn test_changing_cluster_resets_descendants() {
        let (app, _state) = setup_test_app().await;
        let view = open_view(&app).await;

        select(&app, &view, "cluster=cluster-1").await;
        settled_state(&app, &view).await;
        select(&app, &view, "namespace=ns-1").await;
        settled_state(&app, &view).await;

        select(&app, &view, "cluster=cluster-2").await;
        let state = settled_state(&app, &view).await;
        assert_eq!(state["selectedCluster"], "cluster-2");
        assert!(state["selectedNamespace"].is_null());
        assert_eq!(state["workloads"], serde_json::json!([]));
        assert_eq!(names(&state["namespaces"]), vec!["default", "staging"]);

        select(&app, &view, "cluster=").await;
        let state = settled_state(&app, &view).await;
        assert!(state["selectedCluster"].is_null());
        assert_eq!(state["namespaces"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_invalid_selection_is_rejected() {
        let (app, _state) = setup_test_app().await;
        let view = open_view(&app).await;

        let response = select(&app, &view, "namespace=ns-1").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = select(&app, &view, "cluster=cluster-42").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get(&app, &format!("{view}/select")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_more_than_one_level_per_request_is_rejected() {
        let (app, _state) = setup_test_app().await;
        let view = open_view(&app).await;

        let response = select(&app, &view, "cluster=cluster-1&namespace=ns-1").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            "expected exactly one of cluster, namespace or workload"
        );

        let state = settled_state(&app, &view).await;
        assert!(state["selectedCluster"].is_null());
        assert!(state["selectedNamespace"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_view_redirects_to_root() {
        let (app, _state) = setup_test_app().await;

        let response = get(&app, "/view/does-not-exist").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        let response = get(&app, "/view/does-not-exist/state").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_each_root_load_starts_fresh() {
        let (app, state) = setup_test_app().await;

        let first = open_view(&app).await;
        select(&app, &first, "cluster=cluster-1").await;
        settled_state(&app, &first).await;

        let second = open_view(&app).await;
        assert_ne!(first, second);
        let fresh = settled_state(&app, &second).await;
        assert!(fresh["selectedCluster"].is_null());
        assert_eq!(state.sessions.len(), 2);
    }
}

mod health_endpoints {
    use super::*;

    #[tokio::test]
    async fn test_healthz_reports_components() {
        let (app, _state) = setup_test_app().await;

        let response = get(&app, "/healthz").await;
        assert_eq!(response.status(), StatusCode::OK);

        let health = body_json(response).await;
        assert_eq!(health["status"], "healthy");
        assert!(health["components"]["provider"].is_object());
        assert!(health["components"]["sessions"].is_object());
    }

    #[tokio::test]
    async fn test_healthz_returns_503_when_unhealthy() {
        let (app, state) = setup_test_app().await;
        state
            .health_registry
            .set_unhealthy(components::SESSIONS, "sweeper stopped")
            .await;

        let response = get(&app, "/healthz").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["status"], "unhealthy");
    }

    #[tokio::test]
    async fn test_readyz_follows_startup() {
        let (app, state) = setup_test_app().await;

        let response = get(&app, "/readyz").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["ready"], false);

        state.health_registry.set_ready(true).await;
        let response = get(&app, "/readyz").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint_exposes_provider_latency() {
        let (app, _state) = setup_test_app().await;
        get(&app, "/api/v1/clusters").await;

        let response = get(&app, "/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("text/plain"));

        let text = body_text(response).await;
        assert!(text.contains("dashboard_provider_latency_seconds_bucket"));
        assert!(text.contains("operation=\"get_clusters\""));
    }
}
