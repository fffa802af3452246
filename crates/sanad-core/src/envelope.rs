//! The backend response envelope
//!
//! Every SANAD backend response is wrapped in `{success, message, data}`.
//! Callers must branch on `success` before trusting `data`.

use serde::{Deserialize, Serialize};

/// Generic response envelope returned by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable status or error message
    #[serde(default)]
    pub message: String,
    /// Payload; absent or null on failures and on void operations
    #[serde(default)]
    pub data: Option<T>,
}
