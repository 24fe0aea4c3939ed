//! Submitted form responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// A submitted response to a form.
///
/// `response_data` maps field ids to submitted values; shape validation
/// belongs to the presentation layer, the backend stores it as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    /// Response identifier
    pub id: Uuid,
    /// Form this response belongs to
    pub form_id: Uuid,
    /// Field id -> submitted value
    pub response_data: JsonValue,
    /// Submitter address as reported by proxy headers ("unknown" if absent)
    pub ip_address: String,
    /// Submitter user agent ("unknown" if absent)
    pub user_agent: String,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResponse {
    /// Form the response targets
    pub form_id: Uuid,
    /// Field id -> submitted value
    pub response_data: JsonValue,
    /// Submitter address
    pub ip_address: String,
    /// Submitter user agent
    pub user_agent: String,
}
