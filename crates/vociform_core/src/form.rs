//! Form and form field types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of input a form field collects.
///
/// Voice input is a capture mechanism, not a field kind: any field can be
/// filled by transcription.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single line text input
    #[display("text")]
    Text,
    /// Multi-line text input
    #[display("textarea")]
    Textarea,
    /// Email address input
    #[display("email")]
    Email,
    /// Phone number input
    #[display("phone")]
    Phone,
    /// Date picker
    #[display("date")]
    Date,
    /// Dropdown or radio buttons
    #[display("select")]
    Select,
}

/// A single field definition inside a form.
///
/// # Examples
///
/// ```
/// use vociform_core::{FieldKind, FormField};
///
/// let field = FormField {
///     id: "q1".to_string(),
///     label: "Your name".to_string(),
///     kind: FieldKind::Text,
///     required: true,
///     options: vec![],
/// };
/// assert!(field.required);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Stable identifier within the form (response keys reference it)
    pub id: String,
    /// Label shown to respondents
    pub label: String,
    /// Kind of input collected
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Whether a response must include this field
    #[serde(default)]
    pub required: bool,
    /// Choices for select fields (empty otherwise)
    #[serde(default)]
    pub options: Vec<String>,
}

/// A form owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    /// Form identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Title shown to respondents
    pub title: String,
    /// Optional longer description
    pub description: String,
    /// Ordered field definitions
    pub fields: Vec<FormField>,
    /// Inactive forms are hidden from respondents
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a form.
///
/// # Examples
///
/// ```
/// use vociform_core::NewForm;
///
/// let form = NewForm {
///     title: "Customer survey".to_string(),
///     description: String::new(),
///     fields: vec![],
/// };
/// assert!(form.fields.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewForm {
    /// Title shown to respondents
    pub title: String,
    /// Optional longer description
    #[serde(default)]
    pub description: String,
    /// Ordered field definitions
    pub fields: Vec<FormField>,
}
