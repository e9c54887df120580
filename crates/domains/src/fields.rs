//! Raw field-mapping reader shared by every entity validator.
//!
//! Validators call [`Fields::require`] for all of their fields first and only
//! then read typed values, so a payload that is both incomplete and mistyped
//! always reports the missing property.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{EntityKind, ValidationError};

pub(crate) struct Fields<'a> {
    entity: EntityKind,
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(entity: EntityKind, payload: &'a Value) -> Self {
        Self {
            entity,
            map: payload.as_object(),
        }
    }

    /// Fails on the first absent field. Absent means missing, `null` or `""`.
    pub(crate) fn require(&self, names: &[&'static str]) -> Result<(), ValidationError> {
        match names.iter().find(|name| !self.is_present(name)) {
            Some(&field) => Err(ValidationError::MissingProperty {
                entity: self.entity,
                field,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn string(&self, name: &'static str) -> Result<String, ValidationError> {
        match self.get(name) {
            Some(Value::String(value)) => Ok(value.clone()),
            _ => Err(self.invalid(name)),
        }
    }

    /// RFC 3339 timestamp string.
    pub(crate) fn timestamp(&self, name: &'static str) -> Result<DateTime<Utc>, ValidationError> {
        let raw = match self.get(name) {
            Some(Value::String(raw)) => raw,
            _ => return Err(self.invalid(name)),
        };
        DateTime::parse_from_rfc3339(raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|_| self.invalid(name))
    }

    pub(crate) fn count(&self, name: &'static str) -> Result<u64, ValidationError> {
        self.get(name)
            .and_then(Value::as_u64)
            .ok_or_else(|| self.invalid(name))
    }

    /// Deletion flag: a JSON boolean or the text `"true"` / `"false"` that
    /// storage engines emit when casting a boolean column.
    pub(crate) fn flag(&self, name: &'static str) -> Result<bool, ValidationError> {
        match self.get(name) {
            Some(Value::Bool(flag)) => Ok(*flag),
            Some(Value::String(text)) if text == "true" => Ok(true),
            Some(Value::String(text)) if text == "false" => Ok(false),
            _ => Err(self.invalid(name)),
        }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.and_then(|map| map.get(name))
    }

    fn is_present(&self, name: &str) -> bool {
        match self.get(name) {
            None | Some(Value::Null) => false,
            Some(Value::String(text)) => !text.is_empty(),
            Some(_) => true,
        }
    }

    fn invalid(&self, field: &'static str) -> ValidationError {
        ValidationError::InvalidType {
            entity: self.entity,
            field,
        }
    }
}
