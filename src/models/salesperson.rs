//! Salesperson ("vendedor") model and connectivity status.

use serde::{Deserialize, Serialize};

use super::{
    require_at_most, require_email, require_max_len, require_min_len, require_non_negative,
    MAX_BUCKET,
};
use crate::errors::AppError;

/// Bucket name used when a salesperson has no recognised status.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Platform connectivity state of a salesperson.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SalespersonStatus {
    Connected,
    Restricted,
    Blocked,
    Disconnected,
}

impl SalespersonStatus {
    pub const ALL: [SalespersonStatus; 4] = [
        SalespersonStatus::Connected,
        SalespersonStatus::Restricted,
        SalespersonStatus::Blocked,
        SalespersonStatus::Disconnected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SalespersonStatus::Connected => "Connected",
            SalespersonStatus::Restricted => "Restricted",
            SalespersonStatus::Blocked => "Blocked",
            SalespersonStatus::Disconnected => "Disconnected",
        }
    }

    /// Parse a stored or submitted status. Legacy Portuguese labels are accepted.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "Connected" | "Conectado" => Some(SalespersonStatus::Connected),
            "Restricted" | "Restrito" => Some(SalespersonStatus::Restricted),
            "Blocked" | "Bloqueado" => Some(SalespersonStatus::Blocked),
            "Disconnected" | "Desconectado" => Some(SalespersonStatus::Disconnected),
            _ => None,
        }
    }

    /// Human-readable label for printed reports.
    pub fn label(&self) -> &'static str {
        match self {
            SalespersonStatus::Connected => "Conectado",
            SalespersonStatus::Restricted => "Restrito",
            SalespersonStatus::Blocked => "Bloqueado",
            SalespersonStatus::Disconnected => "Desconectado",
        }
    }
}

/// An individual tracked for outreach activity and connectivity status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Salesperson {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Cleared (not cascaded) when the store is removed
    pub store_id: Option<i64>,
    /// `None` when the stored value is missing or unrecognised
    pub status: Option<SalespersonStatus>,
    pub base_treated: bool,
    pub daily_disparos: i64,
    pub last_status_type: Option<String>,
    /// `DD/MM/YYYY`, stamped from the current date on every status change
    pub last_status_date: Option<String>,
}

impl Salesperson {
    /// Status bucket name used by the panel histograms.
    pub fn status_key(&self) -> &'static str {
        self.status
            .as_ref()
            .map(SalespersonStatus::as_str)
            .unwrap_or(UNKNOWN_STATUS)
    }

    pub fn is_blocked(&self) -> bool {
        self.status == Some(SalespersonStatus::Blocked)
    }
}

/// Request body for creating a salesperson.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalespersonRequest {
    pub name: String,
    pub email: String,
    pub store_id: Option<i64>,
    pub status: String,
}

impl CreateSalespersonRequest {
    /// Check the fields and return the parsed initial status and store id.
    pub fn validate(&self) -> Result<(SalespersonStatus, i64), AppError> {
        require_min_len("Name", &self.name, 2)?;
        require_max_len("Name", &self.name, 100)?;
        require_email("Email", &self.email)?;
        let store_id = self
            .store_id
            .ok_or_else(|| AppError::Validation("Store is required".to_string()))?;
        let status = parse_status(&self.status)?;
        Ok((status, store_id))
    }
}

/// Full set of fields for inserting a salesperson row.
#[derive(Debug, Clone)]
pub struct NewSalesperson {
    pub name: String,
    pub email: Option<String>,
    pub store_id: Option<i64>,
    pub status: SalespersonStatus,
    pub base_treated: bool,
    pub daily_disparos: i64,
    pub last_status_type: Option<String>,
    pub last_status_date: Option<String>,
}

/// Request body for changing a salesperson's status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

impl UpdateStatusRequest {
    pub fn validate(&self) -> Result<SalespersonStatus, AppError> {
        parse_status(&self.status)
    }
}

/// Request body for setting today's outreach count.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyDisparosRequest {
    pub value: i64,
}

impl DailyDisparosRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_negative("Daily disparos", self.value)?;
        require_at_most("Daily disparos", self.value, MAX_BUCKET)
    }
}

/// Response body of the base-treated toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTreatedToggled {
    pub id: i64,
    pub base_treated: bool,
}

fn parse_status(value: &str) -> Result<SalespersonStatus, AppError> {
    SalespersonStatus::from_str(value).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid status '{}': expected one of Connected, Restricted, Blocked, Disconnected",
            value
        ))
    })
}
