//! HTTP-backed data provider talking to the dashboard's JSON API

use anyhow::{Context, Result};
use async_trait::async_trait;
use dashboard_lib::{
    ApiResponse, Cluster, DataProvider, Namespace, ProviderError, ResourceMetrics, Workload,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Provider backed by `/api/v1` of a running dashboard
pub struct HttpProvider {
    client: Client,
    base_url: Url,
}

impl HttpProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid API URL: {base_url} cannot be used as a base");
        }

        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding ids
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<ApiResponse<T>, ProviderError> {
        let url = self.endpoint(segments);
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DataProvider for HttpProvider {
    async fn get_clusters(&self) -> Result<ApiResponse<Vec<Cluster>>, ProviderError> {
        self.fetch(&["api", "v1", "clusters"]).await
    }

    async fn get_namespaces(
        &self,
        cluster_id: &str,
    ) -> Result<ApiResponse<Vec<Namespace>>, ProviderError> {
        self.fetch(&["api", "v1", "clusters", cluster_id, "namespaces"])
            .await
    }

    async fn get_workloads(
        &self,
        namespace_id: &str,
    ) -> Result<ApiResponse<Vec<Workload>>, ProviderError> {
        self.fetch(&["api", "v1", "namespaces", namespace_id, "workloads"])
            .await
    }

    async fn get_resource_metrics(
        &self,
        workload_id: &str,
    ) -> Result<ApiResponse<ResourceMetrics>, ProviderError> {
        self.fetch(&["api", "v1", "workloads", workload_id, "metrics"])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLUSTERS_BODY: &str = r#"{
        "data": [
            {"id": "cluster-1", "name": "Production EKS", "region": "us-east-1", "status": "active"}
        ],
        "success": true,
        "message": "Clusters fetched successfully"
    }"#;

    #[test]
    fn test_endpoint_joins_segments() {
        let provider = HttpProvider::new("http://localhost:8080").unwrap();
        assert_eq!(
            provider.endpoint(&["api", "v1", "clusters"]).as_str(),
            "http://localhost:8080/api/v1/clusters"
        );

        let provider = HttpProvider::new("http://example.com/dashboard/").unwrap();
        assert_eq!(
            provider
                .endpoint(&["api", "v1", "workloads", "wl 1", "metrics"])
                .as_str(),
            "http://example.com/dashboard/api/v1/workloads/wl%201/metrics"
        );
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(HttpProvider::new("not a url").is_err());
        assert!(HttpProvider::new("mailto:ops@example.com").is_err());
    }

    #[tokio::test]
    async fn test_get_clusters_decodes_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/clusters")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CLUSTERS_BODY)
            .create_async()
            .await;

        let provider = HttpProvider::new(&server.url()).unwrap();
        let response = provider.get_clusters().await.unwrap();

        mock.assert_async().await;
        assert!(response.success);
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].name, "Production EKS");
    }

    #[tokio::test]
    async fn test_unsuccessful_metrics_envelope_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/workloads/wl-4/metrics")
            .with_status(200)
            .with_body(
                r#"{
                    "data": {
                        "cpu": {"current": 0, "recommended": 0, "unit": "cores"},
                        "memory": {"current": 0, "recommended": 0, "unit": "GB"},
                        "replicas": {"current": 0, "recommended": 0, "unit": "pods"},
                        "costPerMonth": {"current": 0, "recommended": 0, "unit": "USD"}
                    },
                    "success": false,
                    "message": "Resource metrics not found"
                }"#,
            )
            .create_async()
            .await;

        let provider = HttpProvider::new(&server.url()).unwrap();
        let response = provider.get_resource_metrics("wl-4").await.unwrap();

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Resource metrics not found"));
        assert!(response.into_data().is_none());
    }

    #[tokio::test]
    async fn test_error_status_maps_to_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/namespaces/ns-1/workloads")
            .with_status(502)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let provider = HttpProvider::new(&server.url()).unwrap();
        let err = provider.get_workloads("ns-1").await.unwrap_err();

        match err {
            ProviderError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/clusters/cluster-1/namespaces")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let provider = HttpProvider::new(&server.url()).unwrap();
        let err = provider.get_namespaces("cluster-1").await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_maps_to_transport_error() {
        // Port 9 (discard) is not expected to serve HTTP
        let provider = HttpProvider::new("http://127.0.0.1:9").unwrap();
        let err = provider.get_clusters().await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
