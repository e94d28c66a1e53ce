use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::DEFAULT_EVENT_COST;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Workshop,
    Seminar,
    Fundraiser,
    Cleanup,
    Festival,
    Sports,
    Meetup,
    Other,
}

/// Event-only fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default, with = "crate::shared::serde_time::date_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "crate::shared::serde_time::option")]
    #[schema(value_type = Option<String>, example = "18:00")]
    pub time: Option<NaiveTime>,
    #[serde(default, with = "crate::shared::serde_time::date_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub registration_deadline: Option<NaiveDate>,
    #[serde(default = "default_attendees")]
    pub expected_attendees: i32,
    #[serde(default)]
    pub agenda: Vec<String>,
    #[serde(default = "default_cost")]
    pub cost: String,
}

fn default_attendees() -> i32 {
    1
}

fn default_cost() -> String {
    DEFAULT_EVENT_COST.to_string()
}

impl Default for EventDetails {
    fn default() -> Self {
        Self {
            category: None,
            date: None,
            time: None,
            registration_deadline: None,
            expected_attendees: default_attendees(),
            agenda: Vec::new(),
            cost: default_cost(),
        }
    }
}
