//! Event ("evento") model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::require_min_len;
use crate::errors::AppError;

/// A dated event, optionally tied to a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub store_id: Option<i64>,
}

/// Request body for creating an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub event_date: NaiveDate,
    #[serde(default)]
    pub store_id: Option<i64>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_min_len("Event name", &self.name, 1)
    }
}
