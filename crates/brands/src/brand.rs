use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use brandhub_core::{DomainError, DomainResult, ObjectSchema, PropertySchema, ValidationErrors};

brandhub_core::uuid_newtype!(
    /// Brand identifier, assigned by the store on insert.
    pub struct BrandId,
    "BrandId"
);

/// Longest accepted brand name, in characters.
pub const NAME_MAX_LENGTH: usize = 255;

/// Schema every brand creation payload must satisfy.
pub fn brand_schema() -> ObjectSchema {
    ObjectSchema::new()
        .property(
            "name",
            PropertySchema::string().min_length(1).max_length(NAME_MAX_LENGTH),
        )
        .required("name")
}

/// A persisted brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Brand {
    /// Materialize a new brand with a fresh id, stamped at `at`.
    pub fn create(new: NewBrand, at: DateTime<Utc>) -> Self {
        Self {
            id: BrandId::new(),
            name: new.name,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Validated input for creating a brand.
///
/// The only ways to obtain one check the name, so a `NewBrand` always
/// carries a non-blank, trimmed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBrand {
    name: String,
}

impl NewBrand {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if trimmed.chars().count() > NAME_MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "name cannot be longer than {NAME_MAX_LENGTH} characters"
            )));
        }
        Ok(Self {
            name: trimmed.to_string(),
        })
    }

    /// Validate a raw request body against [`brand_schema`].
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        brand_schema().validate(payload)?;

        // The schema guarantees a non-blank string within the length limit.
        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
