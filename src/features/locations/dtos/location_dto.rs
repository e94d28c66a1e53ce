use serde::Deserialize;
use utoipa::IntoParams;

/// Query string for location search
#[derive(Debug, Deserialize, IntoParams)]
pub struct LocationSearchQuery {
    /// Free-text place query, at least three characters to get results
    #[serde(default)]
    pub q: String,
}
