use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::locations::handlers::{resolve_location, search_locations};
use crate::features::locations::services::LocationService;

/// Create routes for the locations feature
pub fn routes(service: Arc<LocationService>) -> Router {
    Router::new()
        .route("/api/locations/search", get(search_locations))
        .route("/api/locations/resolve", get(resolve_location))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::features::locations::services::{LocationResolver, PlaceCandidate};
    use crate::shared::test_helpers::{member_user, with_user};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    struct OnePlace;

    #[async_trait]
    impl LocationResolver for OnePlace {
        async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
            Ok(vec![PlaceCandidate {
                name: query.to_string(),
                address: format!("{}, Yogyakarta", query),
                latitude: -7.79,
                longitude: 110.37,
            }])
        }
    }

    fn server() -> TestServer {
        let service = Arc::new(LocationService::new(Arc::new(OnePlace), 3));
        TestServer::new(with_user(routes(service), member_user())).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_candidates() {
        let response = server()
            .get("/api/locations/search")
            .add_query_param("q", "Malioboro")
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"][0]["name"], "Malioboro");
        assert_eq!(body["data"][0]["address"], "Malioboro, Yogyakarta");
    }

    #[tokio::test]
    async fn test_short_query_returns_empty_list() {
        let body: Value = server()
            .get("/api/locations/search")
            .add_query_param("q", "Ma")
            .await
            .json();
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_resolve_shapes_location_fields() {
        let body: Value = server()
            .get("/api/locations/resolve")
            .add_query_param("q", "Kotagede")
            .await
            .json();
        assert_eq!(body["data"]["location"], "Kotagede");
        assert_eq!(body["data"]["address"], "Kotagede, Yogyakarta");
        assert_eq!(body["data"]["latitude"], -7.79);

        let empty: Value = server()
            .get("/api/locations/resolve")
            .add_query_param("q", "K")
            .await
            .json();
        assert!(empty["data"].is_null());
    }
}
