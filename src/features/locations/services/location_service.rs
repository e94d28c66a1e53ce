use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::features::submissions::models::Coordinates;

/// One place suggested for a free-text query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCandidate {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// The fields a submission takes from an accepted candidate
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    pub location: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl From<PlaceCandidate> for ResolvedLocation {
    fn from(candidate: PlaceCandidate) -> Self {
        Self {
            location: candidate.name,
            address: candidate.address,
            latitude: candidate.latitude,
            longitude: candidate.longitude,
        }
    }
}

/// Turns a free-text place query into candidates
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>>;
}

/// Nominatim API response structure
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    name: Option<String>,
}

impl NominatimPlace {
    /// Short name, falling back to the first segment of the display name
    fn into_candidate(self) -> Option<PlaceCandidate> {
        let latitude = self.lat.parse().ok()?;
        let longitude = self.lon.parse().ok()?;
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                self.display_name
                    .split(',')
                    .next()
                    .map(|s| s.trim().to_string())
            })
            .unwrap_or_default();

        Some(PlaceCandidate {
            name,
            address: self.display_name,
            latitude,
            longitude,
        })
    }
}

/// Resolver backed by a Nominatim instance
pub struct NominatimResolver {
    client: reqwest::Client,
    base_url: String,
    country_codes: Option<String>,
    limit: u8,
}

impl NominatimResolver {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country_codes: config.country_codes.clone(),
            limit: config.result_limit,
        })
    }

    fn search_url(&self, query: &str) -> String {
        let mut url = format!(
            "{}/search?q={}&format=jsonv2&limit={}",
            self.base_url,
            urlencoding::encode(query),
            self.limit
        );
        if let Some(codes) = &self.country_codes {
            url.push_str(&format!("&countrycodes={}", urlencoding::encode(codes)));
        }
        url
    }
}

#[async_trait]
impl LocationResolver for NominatimResolver {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        let url = self.search_url(query);
        tracing::debug!("Location search: {} -> {}", query, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Nominatim request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Nominatim returned {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse Nominatim response: {}", e))
        })?;

        Ok(places
            .into_iter()
            .filter_map(NominatimPlace::into_candidate)
            .collect())
    }
}

/// Location lookup used by the submission editor
pub struct LocationService {
    resolver: Arc<dyn LocationResolver>,
    min_query_length: usize,
}

impl LocationService {
    pub fn new(resolver: Arc<dyn LocationResolver>, min_query_length: usize) -> Self {
        Self {
            resolver,
            min_query_length,
        }
    }

    /// Queries shorter than the minimum return nothing without calling the resolver
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        let query = query.trim();
        if query.chars().count() < self.min_query_length {
            return Ok(Vec::new());
        }
        self.resolver.search(query).await
    }

    /// Resolve the query to its top candidate, if any
    pub async fn first_accepted(&self, query: &str) -> Result<Option<ResolvedLocation>> {
        Ok(self
            .search(query)
            .await?
            .into_iter()
            .next()
            .map(ResolvedLocation::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeResolver {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LocationResolver for FakeResolver {
        async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                PlaceCandidate {
                    name: format!("{} Square", query),
                    address: format!("{} Square, Yogyakarta, Indonesia", query),
                    latitude: -7.8,
                    longitude: 110.36,
                },
                PlaceCandidate {
                    name: format!("{} Street", query),
                    address: format!("{} Street, Jakarta, Indonesia", query),
                    latitude: -6.2,
                    longitude: 106.8,
                },
            ])
        }
    }

    #[tokio::test]
    async fn test_short_queries_skip_resolver() {
        let resolver = Arc::new(FakeResolver::default());
        let service = LocationService::new(resolver.clone(), 3);

        assert!(service.search("ab").await.unwrap().is_empty());
        assert!(service.search("  a  ").await.unwrap().is_empty());
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);

        assert_eq!(service.search("Tugu").await.unwrap().len(), 2);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_first_accepted_takes_top_candidate() {
        let service = LocationService::new(Arc::new(FakeResolver::default()), 3);

        let resolved = service.first_accepted("Tugu").await.unwrap().unwrap();
        assert_eq!(resolved.location, "Tugu Square");
        assert_eq!(resolved.address, "Tugu Square, Yogyakarta, Indonesia");
        assert_eq!(resolved.coordinates().latitude, -7.8);

        assert!(service.first_accepted("no").await.unwrap().is_none());
    }

    #[test]
    fn test_nominatim_place_conversion() {
        let place: NominatimPlace = serde_json::from_value(serde_json::json!({
            "lat": "-7.7829",
            "lon": "110.3671",
            "display_name": "Tugu Yogyakarta, Jalan Margo Utomo, Yogyakarta",
            "name": ""
        }))
        .unwrap();

        let candidate = place.into_candidate().unwrap();
        assert_eq!(candidate.name, "Tugu Yogyakarta");
        assert!((candidate.latitude + 7.7829).abs() < 1e-9);

        let broken: NominatimPlace = serde_json::from_value(serde_json::json!({
            "lat": "north",
            "lon": "110.3",
            "display_name": "Nowhere"
        }))
        .unwrap();
        assert!(broken.into_candidate().is_none());
    }

    #[test]
    fn test_search_url_encodes_query_and_countries() {
        let resolver = NominatimResolver::new(&GeocodingConfig {
            base_url: "https://nominatim.example.org/".to_string(),
            user_agent: "test".to_string(),
            country_codes: Some("id,sg".to_string()),
            result_limit: 5,
            min_query_length: 3,
        })
        .unwrap();

        assert_eq!(
            resolver.search_url("Jalan Malioboro"),
            "https://nominatim.example.org/search?q=Jalan%20Malioboro&format=jsonv2&limit=5&countrycodes=id%2Csg"
        );
    }
}
