//! New-topic form validation for Palaver.
//!
//! Validation is pure: a form is bound from submitted data, checked, and on
//! failure yields field-level error messages for re-rendering. Nothing here
//! touches the database.

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// Maximum length for a topic subject (in characters).
pub const MAX_SUBJECT_LENGTH: usize = 255;

/// Maximum length for a post message (in characters).
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Validate that a string is not empty after trimming whitespace.
fn not_empty_trimmed(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty_trimmed")
            .with_message("This field is required.".into()));
    }
    Ok(())
}

/// Form data for starting a new topic.
///
/// Both fields default to empty strings so that a submission with missing
/// keys binds to an (invalid) empty form instead of being rejected outright.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewTopicForm {
    /// Topic subject line.
    #[serde(default)]
    #[validate(
        custom(function = not_empty_trimmed),
        length(max = 255, message = "Subject must be at most 255 characters.")
    )]
    pub subject: String,

    /// First post message body.
    #[serde(default)]
    #[validate(
        custom(function = not_empty_trimmed),
        length(max = 10000, message = "Message must be at most 10000 characters.")
    )]
    pub message: String,
}

impl NewTopicForm {
    /// Bind a form from submitted values.
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Check the form, returning field-level errors on failure.
    pub fn check(&self) -> Result<(), FormErrors> {
        self.validate().map_err(FormErrors::from)
    }

    /// Subject with surrounding whitespace removed, for persistence.
    pub fn subject_trimmed(&self) -> &str {
        self.subject.trim()
    }

    /// Message with surrounding whitespace removed, for persistence.
    pub fn message_trimmed(&self) -> &str {
        self.message.trim()
    }
}

/// Field-level validation errors, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the error messages for a field.
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over (field, messages) pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }

        Self { fields }
    }
}
