//! JSON-schema-style validation of inbound payloads.
//!
//! A schema describes an object: which properties are required and what
//! each property must look like. Validation is a pure function of the schema
//! and the payload; failures are collected per field as [`Violation`]
//! records so clients can render them next to the offending input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// JSON value types a property can be constrained to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl JsonType {
    /// JSON-schema name of the type (`"string"`, `"integer"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::Boolean => "boolean",
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::Null => "null",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Number => value.is_number(),
            JsonType::Integer => value.is_i64() || value.is_u64(),
            JsonType::Boolean => value.is_boolean(),
            JsonType::Object => value.is_object(),
            JsonType::Array => value.is_array(),
            JsonType::Null => value.is_null(),
        }
    }
}

impl core::fmt::Display for JsonType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints for a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySchema {
    kind: JsonType,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl PropertySchema {
    pub fn new(kind: JsonType) -> Self {
        Self {
            kind,
            min_length: None,
            max_length: None,
        }
    }

    pub fn string() -> Self {
        Self::new(JsonType::String)
    }

    /// Minimum length in characters (strings only, measured after trimming).
    pub fn min_length(mut self, limit: usize) -> Self {
        self.min_length = Some(limit);
        self
    }

    /// Maximum length in characters (strings only, measured after trimming).
    pub fn max_length(mut self, limit: usize) -> Self {
        self.max_length = Some(limit);
        self
    }

    pub fn kind(&self) -> JsonType {
        self.kind
    }

    fn check(&self, value: &Value) -> Option<Violation> {
        if !self.kind.matches(value) {
            return Some(Violation::type_mismatch(self.kind));
        }

        let Some(s) = value.as_str() else {
            return None;
        };
        let len = s.trim().chars().count();

        if let Some(limit) = self.min_length {
            if len < limit {
                return Some(Violation::min_length(limit));
            }
        }
        if let Some(limit) = self.max_length {
            if len > limit {
                return Some(Violation::max_length(limit));
            }
        }
        None
    }
}

/// Schema for an object payload.
///
/// Properties not listed are ignored (additional properties are allowed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchema {
    properties: Vec<(String, PropertySchema)>,
    required: Vec<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.push((name.into(), schema));
        self
    }

    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Validate `payload` against the schema.
    ///
    /// `null` values and strings that are empty after trimming count as
    /// absent, so a blank required field reports `required` rather than a
    /// length violation.
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let Some(obj) = payload.as_object() else {
            errors.push("body", Violation::type_mismatch(JsonType::Object));
            return Err(errors);
        };

        let present = |name: &str| obj.get(name).filter(|v| !is_blank(v));

        for name in &self.required {
            if present(name.as_str()).is_none() {
                errors.push(name.clone(), Violation::required(name));
            }
        }

        for (name, schema) in &self.properties {
            let Some(value) = present(name.as_str()) else {
                continue;
            };
            if let Some(violation) = schema.check(value) {
                errors.push(name.clone(), violation);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// One failed rule: which keyword failed, a readable message, and
/// keyword-specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub keyword: String,
    pub message: String,
    pub params: Value,
}

impl Violation {
    pub fn required(field: &str) -> Self {
        Self {
            keyword: "required".to_string(),
            message: "is a required property".to_string(),
            params: json!({ "missingProperty": field }),
        }
    }

    pub fn type_mismatch(expected: JsonType) -> Self {
        Self {
            keyword: "type".to_string(),
            message: format!("must be {expected}"),
            params: json!({ "type": expected.as_str() }),
        }
    }

    pub fn min_length(limit: usize) -> Self {
        Self {
            keyword: "minLength".to_string(),
            message: format!("must NOT have fewer than {limit} characters"),
            params: json!({ "limit": limit }),
        }
    }

    pub fn max_length(limit: usize) -> Self {
        Self {
            keyword: "maxLength".to_string(),
            message: format!("must NOT have more than {limit} characters"),
            params: json!({ "limit": limit }),
        }
    }
}

/// Violations keyed by field name, in the order they were found per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<Violation>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, violation: Violation) {
        self.0.entry(field.into()).or_default().push(violation);
    }

    pub fn get(&self, field: &str) -> Option<&[Violation]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Violation])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, violations) in self.iter() {
            for v in violations {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field} {}", v.message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn name_schema() -> ObjectSchema {
        ObjectSchema::new()
            .property("name", PropertySchema::string().min_length(1).max_length(10))
            .required("name")
    }

    #[test]
    fn empty_string_is_reported_as_missing() {
        let errors = name_schema().validate(&json!({ "name": "" })).unwrap_err();
        let name = errors.get("name").unwrap();
        assert_eq!(name.len(), 1);
        assert_eq!(name[0], Violation::required("name"));
    }

    #[test]
    fn required_violation_serializes_with_missing_property() {
        let errors = name_schema().validate(&json!({})).unwrap_err();
        let body = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            body,
            json!({
                "name": [{
                    "keyword": "required",
                    "message": "is a required property",
                    "params": { "missingProperty": "name" }
                }]
            })
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let errors = name_schema().validate(&json!({ "name": null })).unwrap_err();
        assert_eq!(errors.get("name").unwrap()[0].keyword, "required");
    }

    #[test]
    fn wrong_type_reports_type_keyword() {
        let errors = name_schema().validate(&json!({ "name": 42 })).unwrap_err();
        let v = &errors.get("name").unwrap()[0];
        assert_eq!(v.keyword, "type");
        assert_eq!(v.message, "must be string");
        assert_eq!(v.params, json!({ "type": "string" }));
    }

    #[test]
    fn too_long_reports_max_length() {
        let errors = name_schema()
            .validate(&json!({ "name": "abcdefghijk" }))
            .unwrap_err();
        let v = &errors.get("name").unwrap()[0];
        assert_eq!(v.keyword, "maxLength");
        assert_eq!(v.params, json!({ "limit": 10 }));
    }

    #[test]
    fn length_is_measured_on_trimmed_characters() {
        // Ten non-ASCII chars padded with spaces: within a limit of 10.
        let padded = format!("  {}  ", "é".repeat(10));
        assert!(name_schema().validate(&json!({ "name": padded })).is_ok());
    }

    #[test]
    fn min_length_applies_to_optional_properties() {
        let schema = ObjectSchema::new().property("code", PropertySchema::string().min_length(3));
        let errors = schema.validate(&json!({ "code": "ab" })).unwrap_err();
        assert_eq!(errors.get("code").unwrap()[0].keyword, "minLength");
        assert!(schema.validate(&json!({})).is_ok());
    }

    #[test]
    fn non_object_payload_is_rejected_under_body() {
        let errors = name_schema().validate(&json!(["name"])).unwrap_err();
        let v = &errors.get("body").unwrap()[0];
        assert_eq!(v.keyword, "type");
        assert_eq!(v.params, json!({ "type": "object" }));
    }

    #[test]
    fn unknown_properties_are_ignored() {
        assert!(name_schema()
            .validate(&json!({ "name": "Patagonia", "founded": 1973 }))
            .is_ok());
    }

    #[test]
    fn every_failing_field_is_reported() {
        let schema = name_schema()
            .property("country", PropertySchema::string())
            .required("country");
        let errors = schema.validate(&json!({ "name": 7 })).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("country").unwrap()[0].keyword, "required");
        assert_eq!(errors.get("name").unwrap()[0].keyword, "type");
    }

    #[test]
    fn display_joins_field_messages() {
        let errors = name_schema().validate(&json!({})).unwrap_err();
        assert_eq!(errors.to_string(), "name is a required property");
    }

    proptest! {
        #[test]
        fn non_blank_names_within_limit_validate(name in "[A-Za-z0-9'][A-Za-z0-9' ]{0,9}") {
            let result = name_schema().validate(&json!({ "name": name }));
            prop_assert!(result.is_ok());
        }

        #[test]
        fn blank_names_yield_one_required_violation(name in "[ \t\n]{0,8}") {
            let errors = name_schema().validate(&json!({ "name": name })).unwrap_err();
            prop_assert_eq!(errors.len(), 1);
            let violations = errors.get("name").unwrap();
            prop_assert_eq!(violations.len(), 1);
            prop_assert_eq!(&violations[0].keyword, "required");
        }
    }
}
