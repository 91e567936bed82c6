//! Store ("loja") model.

use serde::{Deserialize, Serialize};

use super::{require_email, require_min_len, Salesperson};
use crate::errors::AppError;

/// An organizational unit owning salespeople.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
}

/// A store together with the salespeople referencing it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreWithSalespeople {
    #[serde(flatten)]
    pub store: Store,
    pub salespeople: Vec<Salesperson>,
}

/// Request body for creating a store and its initial manager.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub name: String,
    pub responsible: String,
    pub manager_name: String,
    pub manager_email: String,
}

impl CreateStoreRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_min_len("Store name", &self.name, 3)?;
        require_min_len("Responsible", &self.responsible, 3)?;
        require_min_len("Manager name", &self.manager_name, 2)?;
        require_email("Manager email", &self.manager_email)
    }
}

/// Request body for editing a store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreRequest {
    pub name: String,
    pub responsible: String,
}

impl UpdateStoreRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_min_len("Store name", &self.name, 3)?;
        require_min_len("Responsible", &self.responsible, 3)
    }
}
