use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Environment,
    Education,
    Health,
    CommunityDevelopment,
    ArtsCulture,
    Technology,
    Other,
}

/// Project-only fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    #[serde(default)]
    pub category: Option<ProjectCategory>,
    #[serde(default, with = "crate::shared::serde_time::date_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "crate::shared::serde_time::date_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub timeline: String,
    #[serde(default = "default_volunteers")]
    pub expected_volunteers: i32,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

fn default_volunteers() -> i32 {
    1
}

impl Default for ProjectDetails {
    fn default() -> Self {
        Self {
            category: None,
            start_date: None,
            end_date: None,
            timeline: String::new(),
            expected_volunteers: default_volunteers(),
            objectives: Vec::new(),
            budget: None,
        }
    }
}
