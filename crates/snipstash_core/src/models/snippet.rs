//! Snippet records and the write-side normalization rules.

use crate::constants::MAX_TITLE_CHARS;
use crate::error::{MissingFields, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored piece of code, as persisted and as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub language: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a snippet.
///
/// Every field is optional on the wire so absent fields surface as
/// validation failures instead of body-decoding errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSnippetRequest {
    pub title: Option<String>,
    pub language: Option<String>,
    pub code: Option<String>,
}

/// Request payload for updating a snippet. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSnippetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Normalized, validated snippet content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetFields {
    pub title: String,
    pub language: String,
    pub code: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl SnippetFields {
    /// Trim, lowercase and length-check raw field values.
    ///
    /// # Returns
    /// Normalized fields: title and code trimmed, language trimmed and lowercased.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when a field is absent or blank, or when the
    /// trimmed title is longer than [`MAX_TITLE_CHARS`].
    pub fn validate(
        title: Option<&str>,
        language: Option<&str>,
        code: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let (title, language, code) = (non_blank(title), non_blank(language), non_blank(code));
        let (Some(title), Some(language), Some(code)) = (title, language, code) else {
            return Err(ValidationError::missing(MissingFields {
                title: title.is_none(),
                language: language.is_none(),
                code: code.is_none(),
            }));
        };

        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::message(format!(
                "Title must be at most {} characters.",
                MAX_TITLE_CHARS
            )));
        }

        Ok(Self {
            title: title.to_string(),
            language: language.to_lowercase(),
            code: code.to_string(),
        })
    }
}

impl CreateSnippetRequest {
    /// Build a create payload from plain strings.
    pub fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            language: Some(language.into()),
            code: Some(code.into()),
        }
    }

    /// Validate and normalize this payload.
    ///
    /// # Errors
    /// See [`SnippetFields::validate`].
    pub fn validate(&self) -> Result<SnippetFields, ValidationError> {
        SnippetFields::validate(
            self.title.as_deref(),
            self.language.as_deref(),
            self.code.as_deref(),
        )
    }
}

impl UpdateSnippetRequest {
    /// Return `true` when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.language.is_none() && self.code.is_none()
    }
}

impl Snippet {
    /// Create a new snippet with a fresh id and the current timestamp.
    pub fn new(fields: SnippetFields) -> Self {
        let SnippetFields {
            title,
            language,
            code,
        } = fields;
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            language,
            code,
            created_at: Utc::now(),
        }
    }

    /// Merge a partial update into this snippet and re-validate the result.
    ///
    /// The id and creation timestamp are carried over unchanged.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when the merged record violates field rules.
    pub fn merged_with(&self, update: &UpdateSnippetRequest) -> Result<Self, ValidationError> {
        let fields = SnippetFields::validate(
            Some(update.title.as_deref().unwrap_or(&self.title)),
            Some(update.language.as_deref().unwrap_or(&self.language)),
            Some(update.code.as_deref().unwrap_or(&self.code)),
        )?;
        Ok(Self {
            id: self.id.clone(),
            title: fields.title,
            language: fields.language,
            code: fields.code,
            created_at: self.created_at,
        })
    }
}
