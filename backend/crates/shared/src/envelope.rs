//! Response envelopes
//!
//! The `/api/*` backend wraps every payload as `{ success, data, pagination? }`
//! and every failure as `{ success: false, error | message, code?, errors? }`.

use serde::{Deserialize, Serialize};

/// Successful response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Page metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(alias = "totalPages", default)]
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Field-level validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(alias = "param", alias = "path")]
    pub field: String,
    #[serde(alias = "msg")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failure body
///
/// Every field is optional because error bodies come from several layers of
/// the backend (validation, auth middleware, CSRF middleware, proxies).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorEnvelope {
    /// Parse a raw body, tolerating non-JSON bodies (HTML error pages, empty bodies)
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_else(|_| Self {
            message: Some(String::from_utf8_lossy(body).trim().to_string())
                .filter(|m| !m.is_empty()),
            ..Self::default()
        })
    }

    /// Human readable description, `error` taking precedence over `message`
    pub fn description(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }

    /// Whether either text field contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .any(|text| text.contains(needle))
    }
}
