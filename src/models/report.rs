//! Report request model.

use serde::Deserialize;

use super::require_max_len;
use crate::errors::AppError;

/// Longest accepted follow-up note.
pub const MAX_NOTE_LEN: usize = 500;

/// Request body for generating a store report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub store_id: Option<i64>,
    /// Free-text follow-up note; blank means "use the placeholder sentence"
    #[serde(default)]
    pub note: Option<String>,
}

impl GenerateReportRequest {
    /// Check the fields and return the store id.
    pub fn validate(&self) -> Result<i64, AppError> {
        if let Some(note) = &self.note {
            require_max_len("Note", note, MAX_NOTE_LEN)?;
        }
        self.store_id
            .ok_or_else(|| AppError::Validation("Store is required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_request_validation() {
        let ok = GenerateReportRequest {
            store_id: Some(1),
            note: Some("Ligar para a base de março".into()),
        };
        assert_eq!(ok.validate().unwrap(), 1);

        let no_store = GenerateReportRequest {
            store_id: None,
            note: None,
        };
        assert!(matches!(no_store.validate(), Err(AppError::Validation(_))));

        let long_note = GenerateReportRequest {
            store_id: Some(1),
            note: Some("a".repeat(MAX_NOTE_LEN + 1)),
        };
        assert!(matches!(long_note.validate(), Err(AppError::Validation(_))));
    }
}
