use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload returned by the shop API on any non-success status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{}", message.as_deref().unwrap_or("unspecified server error"))]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub validation_errors: Option<BTreeMap<String, String>>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            validation_errors: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, detail: impl Into<String>) -> Self {
        self.validation_errors
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), detail.into());
        self
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.validation_errors
            .as_ref()
            .is_some_and(|fields| fields.get(field).is_some_and(|v| !v.is_empty()))
    }

    /// First field in `priority` order that the server flagged.
    pub fn first_flagged<'a>(&self, priority: &[&'a str]) -> Option<&'a str> {
        priority.iter().copied().find(|field| self.has_field(field))
    }
}
